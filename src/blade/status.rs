//! `GET /` status surface (spec.md §4.8).

use serde_json::{json, Value};

use crate::domain::models::Intent;

use super::context::BladeContext;

/// Builds the status JSON. Role-specific state that fails to serialize is
/// replaced by its string rendering rather than aborting the response
/// (spec.md §4.8).
pub async fn build_status(ctx: &BladeContext) -> Value {
    let state = ctx.state.lock().await;

    let current_intent = match &state.current_intent {
        Some(intent) => intent_or_string(intent),
        None => Value::Null,
    };

    json!({
        "blade": ctx.self_blade,
        "topology": ctx.topology,
        "current_intent": current_intent,
        "task_running": state.current_task.is_some(),
    })
}

fn intent_or_string(intent: &Intent) -> Value {
    serde_json::to_value(intent).unwrap_or_else(|_| Value::String(format!("{intent:?}")))
}

//! Pure and semi-pure orchestration logic sitting between domain models and
//! adapters: the weighted chooser, intent memoization, per-role resolvers,
//! and the orchestrator loop that drives them (spec.md §4).

pub mod intent_cache;
pub mod orchestrator_loop;
pub mod resolvers;
pub mod weighted_chooser;

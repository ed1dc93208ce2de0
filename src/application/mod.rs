//! Process-orchestration layer sitting above the domain/services core
//! (mirrors the teacher's `application` module).

pub mod launcher;

pub use launcher::Launcher;

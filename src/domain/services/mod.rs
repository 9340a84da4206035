//! Domain Services
//!
//! Stateless logic over domain types.

pub mod clone_script;

pub use clone_script::{parse_output, CloneScript, RemoteAction, ScriptEvent};

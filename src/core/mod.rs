//! Core behaviour – scroll tracking, block transforms, and page content.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The scroll
//! tracker is single-threaded (`Rc`) and lives on the event-loop task.

pub mod block;
pub mod content;
pub mod dot_grid;
pub mod gradient;
pub mod rotation;
pub mod route;
pub mod tracker;
pub mod transform;

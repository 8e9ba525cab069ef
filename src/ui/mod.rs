//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* page content and block transforms and turns
//! them into cells on the terminal.  No scroll bookkeeping happens here
//! beyond the smooth-scroll animator.

pub mod layout;
pub mod nav;
pub mod page_widget;
pub mod smooth_scroll;
pub mod theme;

//! Perfect Research Terminal User Interface (TUI)
//!
//! Interactive admin client: document search plus one sortable, filterable,
//! paginated table per admin resource.

pub mod app;
pub mod components;
pub mod events;
pub mod handlers;
pub mod screens;
pub mod traits;
pub mod ui;

pub use app::{App, Screen};
pub use events::AppEvent;

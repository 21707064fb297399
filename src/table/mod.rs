//! Tabular view core
//!
//! Pure data side of the data table: records, column descriptors, the sort /
//! filter / page state values and the view pipeline that combines them.
//! Nothing in here knows about the terminal; the ratatui component lives in
//! `research_tui::components::data_table`.

pub mod column;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod state;

pub use column::Column;
pub use error::TableError;
pub use pipeline::{compare_values, render, DerivedView, PageView};
pub use record::{FieldValue, JsonRecord, Record};
pub use state::{AriaSort, PageSize, PageState, SortDirection, SortSpec, SortState};

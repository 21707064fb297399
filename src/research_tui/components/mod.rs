//! Reusable UI components for the Perfect Research TUI

pub mod data_table;

pub use data_table::{DataTable, TableLabels};

//! Errors raised while turning caller input into table state

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Invalid page size {0}. Allowed sizes: 5, 10, 15, 20, 25")]
    InvalidPageSize(usize),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Page must be 1 or greater, got {0}")]
    InvalidPage(usize),
}

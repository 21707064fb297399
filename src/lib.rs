//! Perfect Research terminal client
//!
//! A generic sortable, filterable, paginated data table ([`table`]) driven
//! by typed records from the Perfect Research REST API ([`api`]), shown in
//! an interactive ratatui client ([`research_tui`]) or printed by the
//! command line ([`cli`], [`report`]).

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod report;
pub mod research_tui;
pub mod table;

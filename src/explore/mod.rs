//! Column exploration helpers for in-memory tables
//!
//! Classifies columns by declared type, picks a chart kind per column,
//! computes per-column summary statistics, and filters the column set by
//! name and category. Purely derived from the table schema; nothing here
//! is persisted.

pub mod classify;
pub mod summary;

pub use classify::{chart_kind, classify, column_groups, filter_columns, ChartKind, ColumnClass};
pub use summary::{summarize, ColumnSummary};

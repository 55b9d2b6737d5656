//! Column classification and chart-kind selection

use arrow::datatypes::{DataType, Schema};

/// The four UI grouping categories; every column lands in exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    Numeric,
    StringBoolean,
    Temporal,
    Other,
}

impl ColumnClass {
    /// Fixed display order of the categories
    pub const ALL: [ColumnClass; 4] = [
        ColumnClass::Numeric,
        ColumnClass::StringBoolean,
        ColumnClass::Temporal,
        ColumnClass::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnClass::Numeric => "Numerical",
            ColumnClass::StringBoolean => "String / Boolean",
            ColumnClass::Temporal => "Temporal",
            ColumnClass::Other => "Others",
        }
    }
}

/// Place a column type into its grouping category
pub fn classify(data_type: &DataType) -> ColumnClass {
    if data_type.is_numeric() {
        ColumnClass::Numeric
    } else if is_string_or_boolean(data_type) {
        ColumnClass::StringBoolean
    } else if data_type.is_temporal() {
        ColumnClass::Temporal
    } else {
        ColumnClass::Other
    }
}

fn is_string_or_boolean(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View | DataType::Boolean
    )
}

/// Chart rendered for a column of the given type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Binned value histogram (floats)
    Histogram,
    /// Per-value frequency bars (strings, booleans, integers)
    FrequencyBar,
    /// Time-binned histogram
    TemporalHistogram,
    Unsupported,
}

/// Select the chart kind for a column type
pub fn chart_kind(data_type: &DataType) -> ChartKind {
    if data_type.is_floating() {
        ChartKind::Histogram
    } else if is_string_or_boolean(data_type) || data_type.is_integer() {
        ChartKind::FrequencyBar
    } else if data_type.is_temporal() {
        ChartKind::TemporalHistogram
    } else {
        ChartKind::Unsupported
    }
}

/// Group column names by category, in fixed category order, dropping
/// empty groups
pub fn column_groups(schema: &Schema) -> Vec<(ColumnClass, Vec<String>)> {
    ColumnClass::ALL
        .iter()
        .filter_map(|&class| {
            let columns: Vec<String> = schema
                .fields()
                .iter()
                .filter(|f| classify(f.data_type()) == class)
                .map(|f| f.name().clone())
                .collect();
            (!columns.is_empty()).then_some((class, columns))
        })
        .collect()
}

/// Filter column names by case-insensitive substring and category
///
/// An empty search term matches every name; an empty class list disables
/// the category filter.
pub fn filter_columns(schema: &Schema, search_term: &str, classes: &[ColumnClass]) -> Vec<String> {
    let needle = search_term.to_lowercase();
    schema
        .fields()
        .iter()
        .filter(|f| needle.is_empty() || f.name().to_lowercase().contains(&needle))
        .filter(|f| classes.is_empty() || classes.contains(&classify(f.data_type())))
        .map(|f| f.name().clone())
        .collect()
}

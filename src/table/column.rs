//! Column descriptors

use serde::{Deserialize, Serialize};

use super::error::TableError;

/// Declares which field a column shows, its header label, and whether the
/// header accepts sort requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub sortable: bool,
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Find a column by key
pub fn find<'a>(columns: &'a [Column], key: &str) -> Option<&'a Column> {
    columns.iter().find(|c| c.key == key)
}

/// Resolve a caller-supplied sort key (CLI flag, config) against the columns
pub fn resolve_sort_key<'a>(columns: &'a [Column], key: &str) -> Result<&'a Column, TableError> {
    let column = find(columns, key).ok_or_else(|| TableError::UnknownColumn(key.to_string()))?;
    if !column.sortable {
        return Err(TableError::NotSortable(key.to_string()));
    }
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Nom").sortable(),
            Column::new("actions", "Actions"),
        ]
    }

    #[test]
    fn test_resolve_sort_key() {
        let cols = columns();
        assert_eq!(resolve_sort_key(&cols, "name").unwrap().label, "Nom");
        assert_eq!(
            resolve_sort_key(&cols, "actions"),
            Err(TableError::NotSortable("actions".to_string()))
        );
        assert_eq!(
            resolve_sort_key(&cols, "nope"),
            Err(TableError::UnknownColumn("nope".to_string()))
        );
    }
}

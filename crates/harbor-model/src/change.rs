//! Generic list change events

use serde::Serialize;

/// Structural change to a list model, parameterized by the model's role type.
///
/// Row ranges are inclusive, matching how list views consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListChange<R> {
    /// Rows `first..=last` were inserted
    RowsInserted { first: usize, last: usize },
    /// Rows `first..=last` were removed
    RowsRemoved { first: usize, last: usize },
    /// The whole model was replaced
    Reset,
    /// Fields of a single row changed
    DataChanged { row: usize, roles: Vec<R> },
    /// Row count changed
    CountChanged,
}

impl<R> ListChange<R> {
    pub fn inserted(row: usize) -> Self {
        ListChange::RowsInserted {
            first: row,
            last: row,
        }
    }

    pub fn removed(row: usize) -> Self {
        ListChange::RowsRemoved {
            first: row,
            last: row,
        }
    }

    pub fn data_changed(row: usize, roles: Vec<R>) -> Self {
        ListChange::DataChanged { row, roles }
    }

    /// Returns true for row insertions, removals and resets
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ListChange::RowsInserted { .. } | ListChange::RowsRemoved { .. } | ListChange::Reset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_helpers() {
        let change: ListChange<u8> = ListChange::inserted(3);
        assert_eq!(change, ListChange::RowsInserted { first: 3, last: 3 });
        assert!(change.is_structural());

        let change: ListChange<u8> = ListChange::data_changed(1, vec![7]);
        assert!(!change.is_structural());
    }
}

// In crates/projections/src/table.rs

use serde::Serialize;

/// A table with fixed column headers whose rows are rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &'static [&'static str]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Swaps in a fresh set of rows. Nothing from the previous render survives.
    pub fn repopulate(&mut self, rows: impl IntoIterator<Item = Vec<String>>) {
        self.rows.clear();
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Vec<&str> {
        match self.columns.iter().position(|c| *c == name) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// One `label: value` line of the statistics block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

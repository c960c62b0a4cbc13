//! Fixed-size windows over the raw rows of a dataset.

use crate::record::{Dataset, TripRecord};

/// Rows shown per page of raw data.
pub const PAGE_SIZE: usize = 5;

/// Returns the rows at `[cursor, cursor + PAGE_SIZE)` and the next cursor.
///
/// The window is clipped to the dataset. An empty slice means every row has
/// been shown already.
pub fn next_page(dataset: &Dataset, cursor: usize) -> (&[TripRecord], usize) {
    let records = dataset.records();
    let start = cursor.min(records.len());
    let end = cursor.saturating_add(PAGE_SIZE).min(records.len());
    (&records[start..end], cursor.saturating_add(PAGE_SIZE))
}

/// Iterates over successive non-empty pages, starting from the first row.
pub struct Pager<'a> {
    dataset: &'a Dataset,
    cursor: usize,
}

impl<'a> Pager<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Pager { dataset, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for Pager<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        let (rows, cursor) = next_page(self.dataset, self.cursor);
        if rows.is_empty() {
            return None;
        }
        self.cursor = cursor;
        Some(rows)
    }
}

//! Key-based quicksort
//!
//! An explicit quicksort with Hoare partitioning, so the order of equal keys
//! is deterministic for a given input. Every entry point copies its input and
//! returns a new vector; the input is never reordered.
//!
//! The sort is not stable: callers that need a tie-break between equal keys
//! must fold it into the key (e.g. `(price, title)`).

use std::convert::Infallible;

use crate::error::ErpResult;
use crate::models::{Row, Table};

/// Sort copies of `items` by `key`, optionally in reverse order
pub fn sort<T, K, F>(items: &[T], key: F, reverse: bool) -> Vec<T>
where
    T: Clone,
    K: PartialOrd + Clone,
    F: Fn(&T) -> K,
{
    match try_sort(items, |item| Ok::<_, Infallible>(key(item)), reverse) {
        Ok(sorted) => sorted,
        Err(never) => match never {},
    }
}

/// Sort copies of `items` by their own order
pub fn sort_values<T>(items: &[T], reverse: bool) -> Vec<T>
where
    T: PartialOrd + Clone,
{
    sort(items, T::clone, reverse)
}

/// Sort copies of `items` by a key that may fail to be extracted
///
/// Keys are computed once per element before any comparison. The first
/// extraction error is returned and nothing is sorted.
pub fn try_sort<T, K, E, F>(items: &[T], key: F, reverse: bool) -> Result<Vec<T>, E>
where
    T: Clone,
    K: PartialOrd + Clone,
    F: Fn(&T) -> Result<K, E>,
{
    let mut keyed = items
        .iter()
        .map(|item| -> Result<(K, T), E> { Ok((key(item)?, item.clone())) })
        .collect::<Result<Vec<_>, E>>()?;

    quicksort(&mut keyed);

    let mut sorted: Vec<T> = keyed.into_iter().map(|(_, item)| item).collect();
    if reverse {
        sorted.reverse();
    }
    Ok(sorted)
}

/// Sort the rows of a table by the raw text of one column
///
/// Rows shorter than `column` sort first.
pub fn sort_table_by_column(table: &Table, column: usize, reverse: bool) -> Table {
    let rows = sort(
        table.rows(),
        |row: &Row| row.cell(column).map(str::to_string),
        reverse,
    );
    Table::from_rows(rows)
}

/// Sort the rows of a table by a key derived from one column's cell
pub fn sort_table_by_column_with<K, F>(
    table: &Table,
    column: usize,
    key: F,
    reverse: bool,
) -> ErpResult<Table>
where
    K: PartialOrd + Clone,
    F: Fn(&str) -> ErpResult<K>,
{
    let rows = try_sort(table.rows(), |row: &Row| key(row.text(column)?), reverse)?;
    Ok(Table::from_rows(rows))
}

fn quicksort<K: PartialOrd + Clone, T>(items: &mut [(K, T)]) {
    if items.len() < 2 {
        return;
    }
    let split = hoare_partition(items);
    let (low, high) = items.split_at_mut(split + 1);
    quicksort(low);
    quicksort(high);
}

/// Partition around the first element's key
///
/// Returns `p` such that every key in `[0, p]` is `<=` the pivot and every key
/// in `[p + 1, len)` is `>=` it. `p` is always below `len - 1`, so both halves
/// are non-empty.
fn hoare_partition<K: PartialOrd + Clone, T>(items: &mut [(K, T)]) -> usize {
    let pivot = items[0].0.clone();
    let mut low = 0;
    let mut high = items.len() - 1;

    loop {
        while items[low].0 < pivot {
            low += 1;
        }
        while items[high].0 > pivot {
            high -= 1;
        }
        if low >= high {
            return high;
        }
        items.swap(low, high);
        low += 1;
        high -= 1;
    }
}

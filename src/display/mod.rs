//! Display formatting for terminal output
//!
//! Everything here returns `String`s; callers decide where to print them.

pub mod report;
pub mod table;

pub use report::{format_average, format_list, format_map, format_pairs, format_result};
pub use table::{format_grid, format_row_details, format_rows};

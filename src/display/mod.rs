//! Console rendering

pub mod table;

pub use table::{balance_table, render_two_column};

//! Quote section builders.
//!
//! Each section turns part of the quote snapshot into display data and
//! renders its HTML fragment for the token map.

pub mod appendix;
pub mod customer;
pub mod summary_table;
pub mod totals;

pub use appendix::{AppendixRow, AppendixTable, FabricClass};
pub use customer::customer_info_html;
pub use summary_table::{SummaryRow, SummaryTable};
pub use totals::QuoteTotals;

//! Co-occurrence graphs over CSV column labels.
//!
//! Every data row links each pair of columns that both hold a value; the
//! accumulated edge weights rank which labels tend to appear together.

pub mod cooccurrence;
pub mod line;
pub mod query;
pub mod report;

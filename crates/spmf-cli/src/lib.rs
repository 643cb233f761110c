//! Library components of the `spmf` command-line tool.

pub mod logging;
pub mod output;
pub mod summary;

//! Report formatting for the command line

pub mod formatter;
pub mod report;

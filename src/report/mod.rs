//! Reporting utilities: formatted terminal output for assessments.

pub mod format;

pub use format::*;

//! Validation and autofix for daily journal markdown files.
//!
//! A journal is a sequence of day entries, each opened by a
//! `## YYYY-MM-DD (Weekday)` header and expected to carry a fixed set of
//! template sections. Parsing yields entries plus typed problems; coverage
//! adds missing dates and weekday mismatches; autofix inserts missing
//! template sections (and, on request, whole day entries).
pub mod config;
pub mod coverage;
pub mod fix;
pub mod model;
pub mod output;
pub mod parse;
pub mod problems;
pub mod report;
pub mod solutions;
pub mod template;
pub mod verify;

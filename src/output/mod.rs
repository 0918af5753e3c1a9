//! Report model and renderers

pub mod report;
pub mod table;
pub mod formatter;

pub mod a001_bug_report;
pub mod a002_suggestion;
pub mod common;

pub mod entry_details;
pub mod states;
pub mod ui;

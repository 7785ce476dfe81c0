pub mod list;

pub use list::state::{create_state as bug_list_state, BugListState};
pub use list::BugReportList;

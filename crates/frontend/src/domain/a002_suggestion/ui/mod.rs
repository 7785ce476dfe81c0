pub mod list;

pub use list::state::{create_state as suggestion_list_state, SuggestionListState};
pub use list::SuggestionList;

pub mod fetch_state;
pub mod resource;

pub use fetch_state::FetchState;
pub use resource::{use_list_resource, ListResource};

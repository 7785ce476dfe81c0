pub mod api_utils;
pub mod components;
pub mod data;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod row_actions;
pub mod supabase;

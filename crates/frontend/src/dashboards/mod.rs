pub mod d400_admin_dashboard;

pub use d400_admin_dashboard::ui::AdminDashboard;

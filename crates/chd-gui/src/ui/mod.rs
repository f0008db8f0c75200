pub mod form_view;
pub mod result_view;
pub mod sidebar;
pub mod theme;

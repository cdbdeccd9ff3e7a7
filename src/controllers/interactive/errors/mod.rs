pub mod explorer_error;
pub mod render_error;

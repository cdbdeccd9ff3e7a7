pub mod bookmark;
pub mod colour;
pub mod complex;
pub mod fractal_params;
pub mod iteration_buffer;
pub mod iteration_policy;
pub mod pixel_buffer;
pub mod plane_region;
pub mod point;
pub mod section;
pub mod viewport_size;

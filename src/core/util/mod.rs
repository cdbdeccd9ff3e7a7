pub mod calculate_sections;
pub mod pixel_to_complex_coords;

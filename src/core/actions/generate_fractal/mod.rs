pub mod generate_fractal_sections;
pub mod generate_fractal_serial;
pub mod ports;
pub mod worker_pool;

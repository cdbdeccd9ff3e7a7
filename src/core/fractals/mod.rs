pub mod escape_time;
pub mod fatou;
pub mod julia;
pub mod mandelbrot;

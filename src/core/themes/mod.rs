pub mod assignment;
pub mod palette;
pub mod theme;

use serde::{Deserialize, Serialize};

/// A pixel position in viewport space, origin at the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

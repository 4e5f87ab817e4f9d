//! Plane geometry used by the bolt generator.
//!
//! Coordinates are canvas units with the origin at the top-left corner and `y` growing
//! downwards, the same orientation as the SVG output.

pub(crate) mod point;
pub(crate) mod vector;

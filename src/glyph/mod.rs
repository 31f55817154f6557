pub mod compose;
pub mod pattern;
pub mod quadrant;
pub mod segment;
pub mod style;

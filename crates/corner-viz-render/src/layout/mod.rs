pub mod axes;
pub mod grid;
pub mod margins;

pub mod axes_draw;
pub mod corner;
pub mod hist1d;
pub mod hist2d;

pub mod app;
pub mod overlay;
pub mod panel;
pub mod timeline;


pub use app::*;

pub mod console;
pub mod json;

pub use console::{render_banner, render_console};
pub use json::render_json;

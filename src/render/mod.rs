//! Rendering adapter that materializes pass results outside the core.

mod html;
mod json;

pub use html::{indicator_html, node_html, to_html, HtmlOptions, ScaleStyle};
pub use json::{to_json, JsonFormat};

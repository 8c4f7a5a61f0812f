mod json;

pub use json::{is_truthy, json_number, preview_body, value_text};

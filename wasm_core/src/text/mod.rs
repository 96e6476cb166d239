pub mod color;
pub mod encoding;
pub mod json;
pub mod jwt;
pub mod markdown;
pub mod meta;
pub mod regex_tester;
pub mod slug;
pub mod stats;

pub use markdown::markdown_to_html;

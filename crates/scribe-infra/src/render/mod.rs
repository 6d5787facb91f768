//! Comment fragment rendering.

mod html;

pub use html::HtmlCommentRenderer;

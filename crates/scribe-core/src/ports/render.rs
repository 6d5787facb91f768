//! Comment rendering capability.

use crate::domain::Comment;

/// Renders a comment into a markup fragment the client inserts into the
/// page without a reload. Supplied by the rendering collaborator; the
/// endpoint core only invokes it and passes the result through.
pub trait CommentRenderer: Send + Sync {
    fn render_comment_fragment(&self, comment: &Comment, author_name: &str) -> String;
}

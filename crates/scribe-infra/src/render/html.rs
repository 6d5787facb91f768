//! HTML comment fragment renderer.
//!
//! Produces the markup fragment the client inserts after posting a
//! comment. User-supplied text is escaped; the surrounding structure
//! matches the comment partial of the page-rendering collaborator.

use scribe_core::domain::Comment;
use scribe_core::ports::CommentRenderer;

pub struct HtmlCommentRenderer;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

impl CommentRenderer for HtmlCommentRenderer {
    fn render_comment_fragment(&self, comment: &Comment, author_name: &str) -> String {
        format!(
            concat!(
                "<div class=\"comment\" data-comment-id=\"{id}\">\n",
                "  <div class=\"comment-meta\">\n",
                "    <span class=\"comment-author\">{author}</span>\n",
                "    <time datetime=\"{timestamp}\">{display_time}</time>\n",
                "  </div>\n",
                "  <p class=\"comment-body\">{body}</p>\n",
                "</div>"
            ),
            id = comment.id,
            author = escape(author_name),
            timestamp = comment.created_at.to_rfc3339(),
            display_time = comment.created_at.format("%b %e, %Y %H:%M"),
            body = escape(&comment.body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn fragment_contains_comment_id_and_body() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "Nice post!".into());
        let html =
            HtmlCommentRenderer.render_comment_fragment(&comment, "Ada");

        assert!(html.contains(&format!("data-comment-id=\"{}\"", comment.id)));
        assert!(html.contains("Nice post!"));
        assert!(html.contains("Ada"));
    }

    #[test]
    fn user_text_is_escaped() {
        let comment = Comment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "<script>alert(1)</script>".into(),
        );
        let html = HtmlCommentRenderer.render_comment_fragment(&comment, "A & B");

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B"));
    }
}

//! Domain entities - the core business objects.

mod comment;
mod engagement;
mod notification;
mod post;
mod user;

pub use comment::Comment;
pub use engagement::{EdgeKind, EngagementEdge, ToggleOutcome};
pub use notification::{Notification, NotificationKind};
pub use post::{Post, PostStatus};
pub use user::User;

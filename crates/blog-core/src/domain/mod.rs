//! Domain entities - the core business objects.

mod comment;
mod page;
mod post;
mod tag;
mod user;

pub use comment::{Comment, CommentChanges, NewComment};
pub use page::{Page, PageRequest};
pub use post::{NewPost, Post, PostChanges, PostDetails, PostFilter};
pub use tag::{Tag, TagChanges};
pub use user::{NewUser, User, UserChanges};

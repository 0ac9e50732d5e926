//! Domain entities - the core business objects.

mod category;
mod post;
mod user;

pub use category::{Category, NewCategory};
pub use post::{NewPost, Post, PostChanges};
pub use user::{NewUser, User};

//! SeaORM entity definitions mirroring the migration schema.

pub mod category;
pub mod post;
pub mod user;

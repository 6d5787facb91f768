//! SeaORM entities and conversions to/from domain types.

pub mod comment;
pub mod engagement;
pub mod notification;
pub mod post;
pub mod user;

//! Request middleware: authentication extractors and error responses.

pub mod auth;
pub mod error;

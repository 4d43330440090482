// src/domain/mod.rs
pub mod error;
pub(crate) mod id;
pub mod question;
pub mod tag;
pub mod vote;

pub use error::{ApiError, DomainError};
pub use question::{NewQuestion, Question};
pub use tag::Tag;
pub use vote::{VoteDirection, VoteRecord};

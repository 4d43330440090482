// src/infrastructure/mod.rs
pub mod config;
pub mod http;
pub mod vote_store;

pub use config::Config;
pub use http::HttpQuestionApi;
pub use vote_store::{InMemoryVoteStore, JsonFileVoteStore};

// src/application/mod.rs
pub mod banner;
pub mod question_board;
pub mod vote_tracker;

pub use banner::Banner;
pub use question_board::{QuestionApi, QuestionBoard, VoteOutcome};
pub use vote_tracker::{PendingVote, VoteAction, VoteStore, VoteTracker};

// src/domain/error.rs
use crate::constants::{
    MSG_FIELDS_REQUIRED, MSG_QUESTIONS_FAILED, MSG_SUBMIT_FAILED, MSG_TAGS_FAILED,
    MSG_UNVOTE_FAILED, MSG_VOTE_CONFLICT, MSG_VOTE_FAILED,
};
use thiserror::Error;

/// Failure of a call against the remote question service.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{}", MSG_TAGS_FAILED)]
    TagsUnavailable(#[source] ApiError),
    #[error("{}", MSG_QUESTIONS_FAILED)]
    QuestionsUnavailable(#[source] ApiError),
    #[error("{}", MSG_VOTE_FAILED)]
    VoteFailed(#[source] ApiError),
    #[error("{}", MSG_UNVOTE_FAILED)]
    UnvoteFailed(#[source] ApiError),
    #[error("{}", MSG_VOTE_CONFLICT)]
    VoteConflict(String),
    #[error("A vote on question {0} is still waiting for the server")]
    VotePending(String),
    #[error("{}", MSG_FIELDS_REQUIRED)]
    MissingFields,
    #[error("{}", MSG_SUBMIT_FAILED)]
    SubmitFailed(#[source] ApiError),
    #[error("Question not found: {0}")]
    QuestionNotFound(String),
    #[error("Tag not found: {0}")]
    TagNotFound(String),
    #[error("Invalid tag slug: {0:?}")]
    InvalidSlug(String),
    #[error("Vote store error: {0}")]
    StoreError(String),
}

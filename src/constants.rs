// src/constants.rs
//
// Application-wide constants: defaults, persistence keys and the messages
// shown in the error banner.

/// Base URL used when neither the config file nor `--api-url` names one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Seconds an error stays in the banner before it is dismissed.
///
/// Used in: `application/banner.rs`, `infrastructure/config.rs`
pub const BANNER_TTL_SECS: u64 = 5;

/// Directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "tech-interviewer";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const VOTES_FILE_NAME: &str = "votes.json";

/// Single key under which the vote record is persisted.
///
/// Used in: `infrastructure/vote_store.rs`
pub const VOTE_RECORD_KEY: &str = "votedQuestions";

// Banner messages
pub const MSG_TAGS_FAILED: &str = "Failed to load tags. Please try again later.";
pub const MSG_QUESTIONS_FAILED: &str = "Failed to load questions for this tag.";
pub const MSG_VOTE_FAILED: &str = "Failed to register your vote. Please try again.";
pub const MSG_UNVOTE_FAILED: &str = "Failed to undo your vote. Please try again.";
pub const MSG_VOTE_CONFLICT: &str =
    "You can only vote once per question. Click your previous vote to undo it first.";
pub const MSG_FIELDS_REQUIRED: &str = "Please fill out all required fields.";
pub const MSG_SUBMIT_FAILED: &str =
    "Failed to add your question. Please check your inputs and try again.";
pub const MSG_NO_QUESTIONS: &str = "No questions found for this topic. Add the first one!";

// src/domain/question.rs
use crate::domain::{id, VoteDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(deserialize_with = "id::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "id::deserialize")]
    pub tag_id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub votes_up: u32,
    #[serde(default)]
    pub votes_down: u32,
}

impl Question {
    pub fn votes(&self, direction: VoteDirection) -> u32 {
        match direction {
            VoteDirection::Up => self.votes_up,
            VoteDirection::Down => self.votes_down,
        }
    }

    fn votes_mut(&mut self, direction: VoteDirection) -> &mut u32 {
        match direction {
            VoteDirection::Up => &mut self.votes_up,
            VoteDirection::Down => &mut self.votes_down,
        }
    }

    pub fn increment(&mut self, direction: VoteDirection) {
        let count = self.votes_mut(direction);
        *count = count.saturating_add(1);
    }

    /// Floors at zero.
    pub fn decrement(&mut self, direction: VoteDirection) {
        let count = self.votes_mut(direction);
        *count = count.saturating_sub(1);
    }
}

/// Body of `POST /api/questions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub tag_id: String,
}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        tag_id: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tag_id: tag_id.into(),
        }
    }

    /// All three fields must carry non-whitespace text.
    pub fn is_complete(&self) -> bool {
        [&self.question, &self.answer, &self.tag_id]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

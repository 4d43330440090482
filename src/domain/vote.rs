// src/domain/vote.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directions this client has voted, keyed by question id.
///
/// Holds at most one direction per question, so a client can never hold an
/// up and a down vote on the same question at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteRecord(BTreeMap<String, VoteDirection>);

impl VoteRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<VoteDirection> {
        self.0.get(question_id).copied()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    /// Returns the previous direction, if any.
    pub fn insert(&mut self, question_id: &str, direction: VoteDirection) -> Option<VoteDirection> {
        self.0.insert(question_id.to_string(), direction)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<VoteDirection> {
        self.0.remove(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, VoteDirection)> {
        self.0.iter().map(|(id, dir)| (id.as_str(), *dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_existing_vote_when_inserting_other_direction_then_replaces_entry() {
        let mut record = VoteRecord::new();
        record.insert("7", VoteDirection::Up);

        let previous = record.insert("7", VoteDirection::Down);

        assert_eq!(previous, Some(VoteDirection::Up));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("7"), Some(VoteDirection::Down));
    }

    #[test]
    fn given_record_when_serializing_then_uses_flat_lowercase_map() {
        let mut record = VoteRecord::new();
        record.insert("7", VoteDirection::Up);
        record.insert("9", VoteDirection::Down);

        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(json, r#"{"7":"up","9":"down"}"#);
    }
}

// src/application/vote_tracker.rs
use crate::domain::{DomainError, Question, VoteDirection, VoteRecord};
use tracing::debug;

/// Persistence for the local vote record.
///
/// Loaded once when the tracker is built, saved after every mutation.
pub trait VoteStore {
    fn load(&mut self) -> Result<VoteRecord, DomainError>;

    fn save(&mut self, record: &VoteRecord) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Cast(VoteDirection),
    Retract(VoteDirection),
}

impl VoteAction {
    pub fn direction(&self) -> VoteDirection {
        match self {
            VoteAction::Cast(d) | VoteAction::Retract(d) => *d,
        }
    }
}

/// A tentative vote applied locally and not yet acknowledged by the server.
///
/// Resolve it with [`VoteTracker::confirm`] or [`VoteTracker::rollback`].
#[derive(Debug, Clone)]
#[must_use = "a pending vote must be confirmed or rolled back"]
pub struct PendingVote {
    action: VoteAction,
    snapshot: Question,
}

impl PendingVote {
    pub fn question_id(&self) -> &str {
        &self.snapshot.id
    }

    pub fn action(&self) -> VoteAction {
        self.action
    }

    /// The question as it was before the tentative delta.
    pub fn snapshot(&self) -> &Question {
        &self.snapshot
    }
}

pub struct VoteTracker<S: VoteStore> {
    store: S,
    record: VoteRecord,
}

impl<S: VoteStore> VoteTracker<S> {
    pub fn load(mut store: S) -> Result<Self, DomainError> {
        let record = store.load()?;
        debug!(votes = record.len(), "Loaded vote record");
        Ok(Self { store, record })
    }

    pub fn has_voted(&self, question_id: &str) -> bool {
        self.record.contains(question_id)
    }

    pub fn vote_type(&self, question_id: &str) -> Option<VoteDirection> {
        self.record.get(question_id)
    }

    pub fn record(&self) -> &VoteRecord {
        &self.record
    }

    /// Decide what a click on `direction` means for this question.
    ///
    /// Voting again in the recorded direction retracts; voting the other
    /// way while a vote is recorded is a conflict.
    pub fn plan(&self, question_id: &str, direction: VoteDirection) -> Result<VoteAction, DomainError> {
        match self.record.get(question_id) {
            None => Ok(VoteAction::Cast(direction)),
            Some(existing) if existing == direction => Ok(VoteAction::Retract(direction)),
            Some(_) => Err(DomainError::VoteConflict(question_id.to_string())),
        }
    }

    /// Apply the optimistic delta to `question` and record it locally.
    ///
    /// On a conflict nothing changes. If the record cannot be saved the
    /// question is left as it was.
    pub fn begin(
        &mut self,
        question: &mut Question,
        direction: VoteDirection,
    ) -> Result<PendingVote, DomainError> {
        let action = self.plan(&question.id, direction)?;
        let snapshot = question.clone();

        let mut record = self.record.clone();
        match action {
            VoteAction::Cast(d) => {
                question.increment(d);
                record.insert(&question.id, d);
            }
            VoteAction::Retract(d) => {
                question.decrement(d);
                record.remove(&question.id);
            }
        }

        if let Err(e) = self.commit(record) {
            *question = snapshot;
            return Err(e);
        }

        debug!(question_id = %question.id, ?action, "Applied tentative vote");
        Ok(PendingVote { action, snapshot })
    }

    /// Replace the tentative question with the server's copy.
    pub fn confirm(&self, question: &mut Question, pending: PendingVote, authoritative: Question) {
        debug!(
            question_id = %pending.question_id(),
            votes_up = authoritative.votes_up,
            votes_down = authoritative.votes_down,
            "Vote acknowledged"
        );
        *question = authoritative;
    }

    /// Undo the tentative delta: restore the snapshot and the previous
    /// record entry.
    ///
    /// The in-memory record is restored even when saving it fails, so the
    /// next click is planned against what the server actually holds. The
    /// save error is still returned.
    pub fn rollback(&mut self, question: &mut Question, pending: PendingVote) -> Result<(), DomainError> {
        let PendingVote { action, snapshot } = pending;
        match action {
            VoteAction::Cast(_) => {
                self.record.remove(&snapshot.id);
            }
            VoteAction::Retract(d) => {
                self.record.insert(&snapshot.id, d);
            }
        }
        debug!(question_id = %snapshot.id, ?action, "Rolling back tentative vote");
        *question = snapshot;
        self.store.save(&self.record)
    }

    /// Forget every local vote.
    pub fn clear(&mut self) -> Result<(), DomainError> {
        self.commit(VoteRecord::new())
    }

    fn commit(&mut self, record: VoteRecord) -> Result<(), DomainError> {
        self.store.save(&record)?;
        self.record = record;
        Ok(())
    }
}

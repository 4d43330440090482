// src/application/question_board.rs
use crate::application::banner::Banner;
use crate::application::vote_tracker::{VoteAction, VoteStore, VoteTracker};
use crate::domain::tag::validate_slug;
use crate::domain::{ApiError, DomainError, NewQuestion, Question, Tag, VoteDirection};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Remote question service.
#[async_trait]
pub trait QuestionApi: Send + Sync {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;

    async fn list_questions_by_tag_slug(&self, slug: &str) -> Result<Vec<Question>, ApiError>;

    /// Add one vote in `direction`; returns the server's copy of the question.
    async fn vote(&self, question_id: &str, direction: VoteDirection) -> Result<Question, ApiError>;

    /// Withdraw one vote in `direction`; returns the server's copy of the question.
    async fn unvote(&self, question_id: &str, direction: VoteDirection)
        -> Result<Question, ApiError>;

    async fn create_question(&self, new_question: &NewQuestion) -> Result<Question, ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    pub action: VoteAction,
    pub question: Question,
}

/// Working set of tags and questions for the selected tag, with the local
/// vote tracker and the error banner.
pub struct QuestionBoard<A: QuestionApi, S: VoteStore> {
    api: A,
    tracker: VoteTracker<S>,
    banner: Banner,
    tags: Vec<Tag>,
    selected: Option<Tag>,
    questions: Vec<Question>,
    pending: HashSet<String>,
}

impl<A: QuestionApi, S: VoteStore> QuestionBoard<A, S> {
    pub fn new(api: A, tracker: VoteTracker<S>, banner: Banner) -> Self {
        Self {
            api,
            tracker,
            banner,
            tags: Vec::new(),
            selected: None,
            questions: Vec::new(),
            pending: HashSet::new(),
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn selected_tag(&self) -> Option<&Tag> {
        self.selected.as_ref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// True while a vote on this question awaits the server. An entry left
    /// pending by an abandoned call stays stale until [`Self::refresh`].
    pub fn is_pending(&self, question_id: &str) -> bool {
        self.pending.contains(question_id)
    }

    pub fn tracker(&self) -> &VoteTracker<S> {
        &self.tracker
    }

    pub fn has_voted(&self, question_id: &str) -> bool {
        self.tracker.has_voted(question_id)
    }

    pub fn vote_type(&self, question_id: &str) -> Option<VoteDirection> {
        self.tracker.vote_type(question_id)
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut Banner {
        &mut self.banner
    }

    /// Fetch all tags. A selected tag still on the server is replaced by its
    /// fresh copy; otherwise the first tag is selected and its questions
    /// loaded.
    pub async fn load_tags(&mut self) -> Result<(), DomainError> {
        let result = self.api.list_tags().await;
        let tags = match result {
            Ok(tags) => tags,
            Err(e) => return Err(self.report(DomainError::TagsUnavailable(e))),
        };
        info!(count = tags.len(), "Loaded tags");
        self.tags = tags;

        let refreshed = self
            .selected
            .as_ref()
            .and_then(|s| self.tags.iter().find(|t| t.id == s.id))
            .cloned();
        match refreshed {
            Some(tag) => self.selected = Some(tag),
            None => {
                self.selected = None;
                self.questions.clear();
                if let Some(first) = self.tags.first().map(|t| t.slug.clone()) {
                    self.select_tag(&first).await?;
                }
            }
        }
        Ok(())
    }

    /// Select a loaded tag by slug and fetch its questions. On failure the
    /// previous selection and questions are kept.
    pub async fn select_tag(&mut self, slug: &str) -> Result<(), DomainError> {
        if let Err(e) = validate_slug(slug) {
            return Err(self.report(e));
        }
        let Some(tag) = self.tags.iter().find(|t| t.slug == slug).cloned() else {
            return Err(self.report(DomainError::TagNotFound(slug.to_string())));
        };

        let questions = self.fetch_questions(&tag.slug).await?;
        debug!(slug = %tag.slug, count = questions.len(), "Selected tag");
        self.selected = Some(tag);
        self.questions = questions;
        self.pending.clear();
        Ok(())
    }

    /// Refetch the questions of the selected tag, discarding any local
    /// tentative state.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let Some(slug) = self.selected.as_ref().map(|t| t.slug.clone()) else {
            return Ok(());
        };
        self.questions = self.fetch_questions(&slug).await?;
        self.pending.clear();
        Ok(())
    }

    async fn fetch_questions(&mut self, slug: &str) -> Result<Vec<Question>, DomainError> {
        let result = self.api.list_questions_by_tag_slug(slug).await;
        match result {
            Ok(questions) => Ok(questions),
            Err(e) if e.is_not_found() => Err(self.report(DomainError::TagNotFound(slug.to_string()))),
            Err(e) => Err(self.report(DomainError::QuestionsUnavailable(e))),
        }
    }

    /// Cast, retract, or reject a vote on a question of the working set.
    ///
    /// The count changes locally before the server is called. The server's
    /// reply replaces the local question; a failed call rolls the change
    /// back.
    pub async fn cast_vote(
        &mut self,
        question_id: &str,
        direction: VoteDirection,
    ) -> Result<VoteOutcome, DomainError> {
        let Some(index) = self.questions.iter().position(|q| q.id == question_id) else {
            return Err(self.report(DomainError::QuestionNotFound(question_id.to_string())));
        };
        if self.pending.contains(question_id) {
            return Err(self.report(DomainError::VotePending(question_id.to_string())));
        }

        let pending = match self.tracker.begin(&mut self.questions[index], direction) {
            Ok(pending) => pending,
            Err(e) => return Err(self.report(e)),
        };
        let action = pending.action();
        self.pending.insert(question_id.to_string());

        let reply = match action {
            VoteAction::Cast(d) => self.api.vote(question_id, d).await,
            VoteAction::Retract(d) => self.api.unvote(question_id, d).await,
        };
        self.pending.remove(question_id);

        match reply {
            Ok(authoritative) => {
                self.tracker.confirm(&mut self.questions[index], pending, authoritative);
                info!(question_id, ?action, "Vote recorded");
                Ok(VoteOutcome {
                    action,
                    question: self.questions[index].clone(),
                })
            }
            Err(api_error) => {
                if let Err(e) = self.tracker.rollback(&mut self.questions[index], pending) {
                    warn!(question_id, error = %e, "Could not persist vote rollback");
                }
                let error = match action {
                    VoteAction::Cast(_) => DomainError::VoteFailed(api_error),
                    VoteAction::Retract(_) => DomainError::UnvoteFailed(api_error),
                };
                Err(self.report(error))
            }
        }
    }

    /// Validate and submit a new question. It joins the working set when it
    /// belongs to the selected tag.
    pub async fn submit_question(&mut self, new_question: NewQuestion) -> Result<Question, DomainError> {
        if !new_question.is_complete() {
            return Err(self.report(DomainError::MissingFields));
        }

        let result = self.api.create_question(&new_question).await;
        let created = match result {
            Ok(created) => created,
            Err(e) => return Err(self.report(DomainError::SubmitFailed(e))),
        };
        info!(question_id = %created.id, tag_id = %created.tag_id, "Question created");

        let same_tag = self
            .selected
            .as_ref()
            .is_some_and(|t| t.id == created.tag_id);
        if same_tag && self.question(&created.id).is_none() {
            self.questions.push(created.clone());
        }
        Ok(created)
    }

    fn report(&mut self, error: DomainError) -> DomainError {
        match std::error::Error::source(&error) {
            Some(cause) => warn!(error = %error, cause = %cause, "Operation failed"),
            None => warn!(error = %error, "Operation failed"),
        }
        self.banner.show(error.to_string());
        error
    }
}

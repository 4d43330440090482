// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::QuestionApi;
use crate::domain::{ApiError, NewQuestion, Question, Tag, VoteDirection};

pub fn sample_tag(id: &str, name: &str, slug: &str) -> Tag {
    Tag {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: format!("Questions about {name}"),
    }
}

pub fn sample_question(id: &str, tag_id: &str, votes_up: u32, votes_down: u32) -> Question {
    Question {
        id: id.to_string(),
        tag_id: tag_id.to_string(),
        question: format!("Question {id}?"),
        answer: format!("Answer {id}."),
        votes_up,
        votes_down,
    }
}

#[derive(Debug, Default)]
struct FakeServer {
    tags: Vec<Tag>,
    questions: BTreeMap<u64, Question>,
    next_id: u64,
    calls: Vec<String>,
    fail_listing: bool,
    fail_votes: bool,
    fail_create: bool,
}

impl FakeServer {
    fn unavailable() -> ApiError {
        ApiError::Status {
            status: 500,
            message: "Internal server error".to_string(),
        }
    }

    fn question_mut(&mut self, id: &str) -> Result<&mut Question, ApiError> {
        id.parse::<u64>()
            .ok()
            .and_then(|key| self.questions.get_mut(&key))
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Question not found".to_string(),
            })
    }
}

/// In-process stand-in for the question service.
///
/// Keeps authoritative counts the way the real server does, so a refetch
/// after a failed vote shows what the server actually recorded. Clones
/// share state.
///
/// # Examples
///
/// ```
/// use tech_interviewer::util::testing::{sample_question, sample_tag, MockQuestionApi};
///
/// let api = MockQuestionApi::builder()
///     .with_tag(sample_tag("1", "Arrays", "arrays"))
///     .with_question(sample_question("7", "1", 3, 0))
///     .build();
/// assert_eq!(api.server_question("7").unwrap().votes_up, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockQuestionApi {
    server: Arc<Mutex<FakeServer>>,
}

impl MockQuestionApi {
    pub fn builder() -> MockQuestionApiBuilder {
        MockQuestionApiBuilder::new()
    }

    fn lock(&self) -> MutexGuard<'_, FakeServer> {
        self.server.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Calls seen so far, e.g. `"GET tags"`, `"PUT vote 7 up"`, `"POST question 1"`.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn server_question(&self, id: &str) -> Option<Question> {
        self.lock().question_mut(id).ok().cloned()
    }

    /// Replace the server's tag with the same id.
    pub fn update_tag(&self, tag: Tag) {
        let mut server = self.lock();
        if let Some(existing) = server.tags.iter_mut().find(|t| t.id == tag.id) {
            *existing = tag;
        }
    }

    pub fn fail_listing(&self, fail: bool) {
        self.lock().fail_listing = fail;
    }

    pub fn fail_votes(&self, fail: bool) {
        self.lock().fail_votes = fail;
    }

    pub fn fail_create(&self, fail: bool) {
        self.lock().fail_create = fail;
    }
}

#[async_trait]
impl QuestionApi for MockQuestionApi {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let mut server = self.lock();
        server.calls.push("GET tags".to_string());
        if server.fail_listing {
            return Err(FakeServer::unavailable());
        }
        Ok(server.tags.clone())
    }

    async fn list_questions_by_tag_slug(&self, slug: &str) -> Result<Vec<Question>, ApiError> {
        let mut server = self.lock();
        server.calls.push(format!("GET questions {slug}"));
        if server.fail_listing {
            return Err(FakeServer::unavailable());
        }
        let tag_id = server
            .tags
            .iter()
            .find(|t| t.slug == slug)
            .map(|t| t.id.clone())
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Tag not found".to_string(),
            })?;
        Ok(server
            .questions
            .values()
            .filter(|q| q.tag_id == tag_id)
            .cloned()
            .collect())
    }

    async fn vote(&self, question_id: &str, direction: VoteDirection) -> Result<Question, ApiError> {
        let mut server = self.lock();
        server.calls.push(format!("PUT vote {question_id} {direction}"));
        if server.fail_votes {
            return Err(FakeServer::unavailable());
        }
        let question = server.question_mut(question_id)?;
        question.increment(direction);
        Ok(question.clone())
    }

    async fn unvote(&self, question_id: &str, direction: VoteDirection) -> Result<Question, ApiError> {
        let mut server = self.lock();
        server.calls.push(format!("PUT unvote {question_id} {direction}"));
        if server.fail_votes {
            return Err(FakeServer::unavailable());
        }
        let question = server.question_mut(question_id)?;
        question.decrement(direction);
        Ok(question.clone())
    }

    async fn create_question(&self, new_question: &NewQuestion) -> Result<Question, ApiError> {
        let mut server = self.lock();
        server.calls.push(format!("POST question {}", new_question.tag_id));
        if server.fail_create {
            return Err(FakeServer::unavailable());
        }
        if !server.tags.iter().any(|t| t.id == new_question.tag_id) {
            return Err(ApiError::Status {
                status: 404,
                message: "Tag does not exist".to_string(),
            });
        }
        server.next_id += 1;
        let id = server.next_id;
        let question = Question {
            id: id.to_string(),
            tag_id: new_question.tag_id.clone(),
            question: new_question.question.clone(),
            answer: new_question.answer.clone(),
            votes_up: 0,
            votes_down: 0,
        };
        server.questions.insert(id, question.clone());
        Ok(question)
    }
}

/// Builder for MockQuestionApi
pub struct MockQuestionApiBuilder {
    server: FakeServer,
}

impl MockQuestionApiBuilder {
    pub fn new() -> Self {
        Self {
            server: FakeServer::default(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.server.tags.push(tag);
        self
    }

    /// Question ids must be numeric, as the server assigns them.
    pub fn with_question(mut self, question: Question) -> Self {
        let id: u64 = question.id.parse().expect("numeric question id");
        self.server.next_id = self.server.next_id.max(id);
        self.server.questions.insert(id, question);
        self
    }

    pub fn build(self) -> MockQuestionApi {
        MockQuestionApi {
            server: Arc::new(Mutex::new(self.server)),
        }
    }
}

impl Default for MockQuestionApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "mio", "wiremock"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

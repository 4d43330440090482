use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::PathBuf;
use tech_interviewer::application::{Banner, QuestionBoard, VoteTracker};
use tech_interviewer::infrastructure::{HttpQuestionApi, JsonFileVoteStore};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub type HttpBoard = QuestionBoard<HttpQuestionApi, JsonFileVoteStore>;

/// Temporary vote file that lives as long as the fixture
#[allow(dead_code)]
pub struct TestVotes {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestVotes {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("votes.json");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn store(&self) -> JsonFileVoteStore {
        JsonFileVoteStore::new(&self.path)
    }
}

#[allow(dead_code)]
pub fn http_api(server: &MockServer) -> Result<HttpQuestionApi> {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .context("Failed to create HTTP client")?;
    Ok(HttpQuestionApi::with_client(client, &server.uri()))
}

/// Board wired to the mock server and a vote file, as the binary wires it
#[allow(dead_code)]
pub fn http_board(server: &MockServer, votes: &TestVotes) -> Result<HttpBoard> {
    let tracker = VoteTracker::load(votes.store())?;
    Ok(QuestionBoard::new(http_api(server)?, tracker, Banner::default()))
}

#[allow(dead_code)]
pub fn tag_json(id: &str, name: &str, slug: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("Questions about {name}"),
        "slug": slug,
    })
}

#[allow(dead_code)]
pub fn question_json(id: &str, tag_id: &str, votes_up: u32, votes_down: u32) -> Value {
    json!({
        "id": id,
        "question": format!("Question {id}?"),
        "answer": format!("Answer {id}."),
        "tagId": tag_id,
        "votesUp": votes_up,
        "votesDown": votes_down,
    })
}

#[allow(dead_code)]
pub async fn mount_tags(server: &MockServer, tags: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tags": tags })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_questions(server: &MockServer, slug: &str, questions: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/api/questions/tag/slug/{slug}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "questions": questions })))
        .mount(server)
        .await;
}

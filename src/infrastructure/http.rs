// src/infrastructure/http.rs
use crate::application::QuestionApi;
use crate::domain::{ApiError, NewQuestion, Question, Tag, VoteDirection};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Deserialize)]
struct TagsResponse {
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct QuestionsResponse {
    questions: Vec<Question>,
}

#[derive(Deserialize)]
struct QuestionResponse {
    question: Question,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest {
    vote_type: VoteDirection,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// [`QuestionApi`] over the service's JSON REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpQuestionApi {
    client: Client,
    base_url: String,
}

impl HttpQuestionApi {
    /// `timeout` of `None` lets a request wait indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// `questions/{id}/{action}` with the id percent-encoded as one path
    /// segment.
    fn question_url(&self, question_id: &str, action: &str) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.url("questions")).map_err(|e| ApiError::Transport(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Not a base URL: {}", self.base_url)))?
            .push(question_id)
            .push(action);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl QuestionApi for HttpQuestionApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let response: TagsResponse = self.send(self.client.get(self.url("tags"))).await?;
        Ok(response.tags)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_questions_by_tag_slug(&self, slug: &str) -> Result<Vec<Question>, ApiError> {
        let url = self.url(&format!("questions/tag/slug/{slug}"));
        let response: QuestionsResponse = self.send(self.client.get(url)).await?;
        Ok(response.questions)
    }

    #[instrument(level = "debug", skip(self))]
    async fn vote(&self, question_id: &str, direction: VoteDirection) -> Result<Question, ApiError> {
        let url = self.question_url(question_id, "vote")?;
        let body = VoteRequest { vote_type: direction };
        let response: QuestionResponse = self.send(self.client.put(url).json(&body)).await?;
        Ok(response.question)
    }

    #[instrument(level = "debug", skip(self))]
    async fn unvote(
        &self,
        question_id: &str,
        direction: VoteDirection,
    ) -> Result<Question, ApiError> {
        let url = self.question_url(question_id, "unvote")?;
        let body = VoteRequest { vote_type: direction };
        let response: QuestionResponse = self.send(self.client.put(url).json(&body)).await?;
        Ok(response.question)
    }

    #[instrument(level = "debug", skip(self, new_question), fields(tag_id = %new_question.tag_id))]
    async fn create_question(&self, new_question: &NewQuestion) -> Result<Question, ApiError> {
        let request = self.client.post(self.url("questions")).json(new_question);
        let response: QuestionResponse = self.send(request).await?;
        Ok(response.question)
    }
}

mod helpers;

use anyhow::Result;
use helpers::{http_board, mount_questions, mount_tags, question_json, tag_json, TestVotes};
use serde_json::json;
use std::time::Duration;
use tech_interviewer::application::VoteAction;
use tech_interviewer::domain::{DomainError, NewQuestion, VoteDirection};
use tech_interviewer::ports::TerminalPresenter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_single_tag_with_no_questions_when_loading_then_shows_empty_state() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![json!({ "id": 1, "name": "Arrays", "slug": "arrays" })]).await;
    Mock::given(method("GET"))
        .and(path("/api/questions/tag/slug/arrays"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "questions": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    let mut board = http_board(&server, &votes)?;

    // Act
    board.load_tags().await?;
    let text = TerminalPresenter::new().render_questions(
        board.selected_tag(),
        board.questions(),
        board.tracker().record(),
    );

    // Assert
    assert_eq!(board.selected_tag().map(|t| t.id.as_str()), Some("1"));
    assert!(text.contains("No questions found for this topic."));
    Ok(())
}

#[tokio::test]
async fn given_failing_vote_when_casting_then_banner_shown_and_refetch_restores_server_count(
) -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![question_json("7", "1", 3, 0)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/questions/7/vote"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Invalid vote request" })))
        .expect(1)
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;

    // Act
    let result = board.cast_vote("7", VoteDirection::Up).await;

    // Assert
    assert!(matches!(result, Err(DomainError::VoteFailed(_))));
    assert_eq!(
        board.banner().message(),
        Some("Failed to register your vote. Please try again.")
    );
    assert!(!board.has_voted("7"));
    board.refresh().await?;
    assert_eq!(board.question("7").map(|q| q.votes_up), Some(3));
    Ok(())
}

#[tokio::test]
async fn given_vote_when_restarting_then_vote_record_survives() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![question_json("7", "1", 3, 0)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/questions/7/vote"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "question": question_json("7", "1", 4, 0) })),
        )
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    let mut first_session = http_board(&server, &votes)?;
    first_session.load_tags().await?;
    first_session.cast_vote("7", VoteDirection::Up).await?;
    drop(first_session);

    // Act
    let mut second_session = http_board(&server, &votes)?;
    second_session.load_tags().await?;
    let conflict = second_session.cast_vote("7", VoteDirection::Down).await;

    // Assert
    assert_eq!(second_session.vote_type("7"), Some(VoteDirection::Up));
    assert!(matches!(conflict, Err(DomainError::VoteConflict(_))));
    Ok(())
}

#[tokio::test]
async fn given_recorded_vote_when_retracting_then_unvote_mirrored_to_server() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![question_json("7", "1", 4, 0)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/questions/7/unvote"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "question": question_json("7", "1", 3, 0) })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    std::fs::write(&votes.path, r#"{"votedQuestions":{"7":"up"}}"#)?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;

    // Act
    let outcome = board.cast_vote("7", VoteDirection::Up).await?;

    // Assert
    assert_eq!(outcome.action, VoteAction::Retract(VoteDirection::Up));
    assert_eq!(outcome.question.votes_up, 3);
    assert!(!board.has_voted("7"));
    let saved = std::fs::read_to_string(&votes.path)?;
    assert!(!saved.contains(r#""7""#));
    Ok(())
}

#[tokio::test]
async fn given_server_without_unvote_route_when_retracting_then_vote_kept_and_count_restored(
) -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![question_json("7", "1", 4, 0)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/questions/7/unvote"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 Not Found"))
        .expect(1)
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    std::fs::write(&votes.path, r#"{"votedQuestions":{"7":"up"}}"#)?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;

    // Act
    let result = board.cast_vote("7", VoteDirection::Up).await;

    // Assert
    assert!(matches!(result, Err(DomainError::UnvoteFailed(_))));
    assert_eq!(
        board.banner().message(),
        Some("Failed to undo your vote. Please try again.")
    );
    assert_eq!(board.vote_type("7"), Some(VoteDirection::Up));
    assert_eq!(board.question("7").map(|q| q.votes_up), Some(4));
    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&votes.path)?)?;
    assert_eq!(saved["votedQuestions"]["7"], "up");
    Ok(())
}

#[tokio::test]
async fn given_vote_abandoned_mid_flight_when_voting_again_then_rejected_until_refresh(
) -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![question_json("7", "1", 3, 0)]).await;
    Mock::given(method("PUT"))
        .and(path("/api/questions/7/vote"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "question": question_json("7", "1", 4, 0) }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;
    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        board.cast_vote("7", VoteDirection::Up),
    )
    .await;
    assert!(abandoned.is_err());

    // Act
    let second = board.cast_vote("7", VoteDirection::Up).await;

    // Assert
    assert!(board.is_pending("7"));
    assert!(matches!(second, Err(DomainError::VotePending(ref id)) if id == "7"));
    assert_eq!(board.question("7").map(|q| q.votes_up), Some(4));

    board.refresh().await?;
    assert!(!board.is_pending("7"));
    assert_eq!(board.question("7").map(|q| q.votes_up), Some(3));
    Ok(())
}

#[tokio::test]
async fn given_empty_answer_when_submitting_then_no_post_is_issued() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    mount_questions(&server, "arrays", vec![]).await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let votes = TestVotes::new()?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;

    // Act
    let result = board
        .submit_question(NewQuestion::new("What is a heap?", "", "1"))
        .await;

    // Assert
    assert!(matches!(result, Err(DomainError::MissingFields)));
    Ok(())
}

#[tokio::test]
async fn given_submitted_question_when_refetching_tag_then_listed_exactly_once() -> Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_tags(&server, vec![tag_json("1", "Arrays", "arrays")]).await;
    Mock::given(method("GET"))
        .and(path("/api/questions/tag/slug/arrays"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "questions": [] })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/questions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "question": question_json("42", "1", 0, 0) })),
        )
        .mount(&server)
        .await;
    mount_questions(&server, "arrays", vec![question_json("42", "1", 0, 0)]).await;
    let votes = TestVotes::new()?;
    let mut board = http_board(&server, &votes)?;
    board.load_tags().await?;
    assert!(board.questions().is_empty());

    // Act
    board
        .submit_question(NewQuestion::new("Question 42?", "Answer 42.", "1"))
        .await?;
    let after_submit = board.questions().len();
    board.refresh().await?;

    // Assert
    assert_eq!(after_submit, 1);
    assert_eq!(board.questions().iter().filter(|q| q.id == "42").count(), 1);
    Ok(())
}

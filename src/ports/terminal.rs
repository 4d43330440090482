// src/ports/terminal.rs
use crate::constants::MSG_NO_QUESTIONS;
use crate::domain::{Question, Tag, VoteDirection, VoteRecord};
use crate::application::{VoteAction, VoteOutcome};
use std::fmt::Write;

/// Plain-text rendering of the board for a terminal.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }

    /// One line per tag; the selected tag is marked with `>`.
    pub fn render_tags(&self, tags: &[Tag], selected: Option<&Tag>) -> String {
        if tags.is_empty() {
            return "No topics available.\n".to_string();
        }
        let mut out = String::from("Topics\n");
        for tag in tags {
            let marker = if selected.is_some_and(|s| s.id == tag.id) { ">" } else { " " };
            let _ = writeln!(out, "{marker} {:<24} [{}]", tag.name, tag.slug);
        }
        out
    }

    pub fn render_questions(
        &self,
        tag: Option<&Tag>,
        questions: &[Question],
        votes: &VoteRecord,
    ) -> String {
        let mut out = String::new();
        if let Some(tag) = tag {
            let _ = writeln!(out, "{}", tag.name);
            if !tag.description.is_empty() {
                let _ = writeln!(out, "{}", tag.description);
            }
            out.push('\n');
        }

        let _ = writeln!(out, "Questions ({})", questions.len());
        if questions.is_empty() {
            let _ = writeln!(out, "{MSG_NO_QUESTIONS}");
            return out;
        }
        for question in questions {
            out.push('\n');
            out.push_str(&self.render_question(question, votes.get(&question.id)));
        }
        out
    }

    /// The user's own vote is marked with `*`.
    pub fn render_question(&self, question: &Question, user_vote: Option<VoteDirection>) -> String {
        let up_mark = if user_vote == Some(VoteDirection::Up) { "*" } else { "" };
        let down_mark = if user_vote == Some(VoteDirection::Down) { "*" } else { "" };
        let mut out = String::new();
        let _ = writeln!(out, "#{} {}", question.id, question.question);
        for line in question.answer.lines() {
            let _ = writeln!(out, "    {line}");
        }
        let _ = writeln!(
            out,
            "    ▲ {}{up_mark}  ▼ {}{down_mark}",
            question.votes_up, question.votes_down
        );
        out
    }

    pub fn render_vote_outcome(&self, outcome: &VoteOutcome) -> String {
        let verb = match outcome.action {
            VoteAction::Cast(_) => "Voted",
            VoteAction::Retract(_) => "Withdrew",
        };
        format!(
            "{verb} {} on #{}: ▲ {}  ▼ {}\n",
            outcome.action.direction(),
            outcome.question.id,
            outcome.question.votes_up,
            outcome.question.votes_down
        )
    }

    pub fn render_votes(&self, votes: &VoteRecord) -> String {
        if votes.is_empty() {
            return "No votes cast yet.\n".to_string();
        }
        let mut out = String::new();
        for (question_id, direction) in votes.iter() {
            let _ = writeln!(out, "#{question_id}\t{direction}");
        }
        out
    }

    pub fn render_banner(&self, message: &str) -> String {
        format!("! {message}\n")
    }
}

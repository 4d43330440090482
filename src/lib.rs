// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::path::Path;
use std::process::ExitCode;
use anyhow::{bail, Context, Result};
use application::{Banner, QuestionApi, QuestionBoard, VoteStore, VoteTracker};
use domain::NewQuestion;
use infrastructure::{Config, HttpQuestionApi, JsonFileVoteStore};
use ports::TerminalPresenter;
use tracing::{debug, info};
use crate::cli::args::{Args, Command, ConfigAction};

/// Runs one command. Failures the board reports through its banner are
/// printed as a banner and turn into a failing exit code.
pub async fn run(args: Args) -> Result<ExitCode> {
    debug!(?args, "Starting techiv with arguments");

    if let Command::Config {
        action: ConfigAction::Init { path },
    } = &args.command
    {
        let written = init_config(path.as_deref())?;
        println!("Wrote default configuration to {}", written.display());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &args.votes_file {
        config.votes.path = path.to_string_lossy().into_owned();
    }
    debug!(?config, "Resolved configuration");

    // Initialize infrastructure
    let votes_path = config.votes_path()?;
    let store = JsonFileVoteStore::new(&votes_path);
    let tracker = VoteTracker::load(store)
        .with_context(|| format!("Failed to load vote record from {}", votes_path.display()))?;
    let api = HttpQuestionApi::new(&config.api.base_url, config.timeout())?;
    info!(base_url = %api.base_url(), "Using question service");

    // Initialize application
    let mut board = QuestionBoard::new(api, tracker, Banner::new(config.banner_ttl()));
    let presenter = TerminalPresenter::new();

    match execute(&mut board, &presenter, args.command).await {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => match board.banner().message() {
            Some(message) => {
                debug!(error = ?e, "Command failed");
                eprint!("{}", presenter.render_banner(message));
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}

/// Run one command against the board and return what to print.
pub async fn execute<A, S>(
    board: &mut QuestionBoard<A, S>,
    presenter: &TerminalPresenter,
    command: Command,
) -> Result<String>
where
    A: QuestionApi,
    S: VoteStore,
{
    let output = match command {
        Command::Tags { json } => {
            board.load_tags().await?;
            if json {
                serde_json::to_string_pretty(board.tags())? + "\n"
            } else {
                presenter.render_tags(board.tags(), board.selected_tag())
            }
        }
        Command::Questions { slug, json } => {
            board.load_tags().await?;
            if let Some(slug) = slug {
                board.select_tag(&slug).await?;
            }
            if json {
                serde_json::to_string_pretty(board.questions())? + "\n"
            } else {
                presenter.render_questions(
                    board.selected_tag(),
                    board.questions(),
                    board.tracker().record(),
                )
            }
        }
        Command::Vote {
            slug,
            question_id,
            direction,
        } => {
            board.load_tags().await?;
            board.select_tag(&slug).await?;
            let outcome = board.cast_vote(&question_id, direction.into()).await?;
            presenter.render_vote_outcome(&outcome)
        }
        Command::Add {
            tag_id,
            question,
            answer,
        } => {
            let created = board
                .submit_question(NewQuestion::new(question, answer, tag_id))
                .await?;
            format!("Added question\n{}", presenter.render_question(&created, None))
        }
        Command::Votes { json } => {
            let record = board.tracker().record();
            if json {
                serde_json::to_string_pretty(record)? + "\n"
            } else {
                presenter.render_votes(record)
            }
        }
        Command::Config { .. } => bail!("config commands do not use the question service"),
    };
    Ok(output)
}

/// Write a default config file; refuses to overwrite an existing one.
pub fn init_config(path: Option<&Path>) -> Result<std::path::PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Config::default_path().context("Could not find config directory")?,
    };
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    Config::create_default(&path)?;
    Ok(path)
}

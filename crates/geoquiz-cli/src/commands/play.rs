//! The `geoquiz play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use geoquiz_core::error::GenerationError;
use geoquiz_core::generator::QuestionGenerator;
use geoquiz_core::model::Dataset;
use geoquiz_core::report::QuizSummary;
use geoquiz_core::session::QuizSession;

use super::{fetch_dataset, make_generator, resolve_config};
use crate::render;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    /// One-based option number.
    Select(usize),
    Next,
    Previous,
    Restart,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "n" | "next" => Some(Input::Next),
            "p" | "prev" | "previous" => Some(Input::Previous),
            "r" | "restart" => Some(Input::Restart),
            "q" | "quit" | "exit" => Some(Input::Quit),
            other => other.parse().ok().filter(|n| *n >= 1).map(Input::Select),
        }
    }
}

pub async fn execute(
    dataset: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path.as_deref(), dataset, count, seed)?;
    let dataset = fetch_dataset(&config.dataset).await?;
    let mut generator = make_generator(&config);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = run(&dataset, &mut generator, stdin.lock(), &mut stdout.lock())?;

    if let (Some(dir), Some(summary)) = (output, summary) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("summary-{timestamp}.json"));
        summary.save_json(&path)?;
        eprintln!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Drive a session from line-based input until quit or end of input.
///
/// Returns the summary of the most recently finished quiz, if any.
fn run(
    dataset: &Dataset,
    generator: &mut QuestionGenerator,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Option<QuizSummary>> {
    let session = QuizSession::start(dataset, generator)?;
    play_session(
        session,
        |session| session.restart(dataset, generator),
        input,
        out,
    )
}

/// The event loop proper. A failed restart is reported and the current
/// session carries on.
fn play_session(
    mut session: QuizSession,
    mut restart: impl FnMut(&mut QuizSession) -> Result<(), GenerationError>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<Option<QuizSummary>> {
    let mut last_summary = None;
    render::question(out, &session)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = Input::parse(&line) else {
            writeln!(out, "Unrecognised input '{}'. Use 1-4, n, p, r or q.", line.trim())?;
            continue;
        };

        match command {
            Input::Select(number) => match session.submit_option(number - 1) {
                Ok(verdict) => {
                    writeln!(out, "{verdict}")?;
                    render::question(out, &session)?;
                }
                Err(e) => writeln!(out, "! {e}")?,
            },
            Input::Next => match session.advance() {
                Ok(_) => match session.summary() {
                    Some(summary) => {
                        render::summary(out, &summary)?;
                        last_summary = Some(summary);
                    }
                    None => render::question(out, &session)?,
                },
                Err(e) => writeln!(out, "! {e}")?,
            },
            Input::Previous => match session.retreat() {
                Ok(_) => render::question(out, &session)?,
                Err(e) => writeln!(out, "! {e}")?,
            },
            Input::Restart => match restart(&mut session) {
                Ok(()) => render::question(out, &session)?,
                Err(e) => writeln!(out, "! could not restart: {e}")?,
            },
            Input::Quit => break,
        }
    }

    Ok(last_summary)
}

//! The `geoquiz generate` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use geoquiz_core::model::Question;

use super::{fetch_dataset, make_generator, resolve_config};

pub async fn execute(
    dataset: Option<String>,
    count: Option<usize>,
    seed: Option<u64>,
    show_answers: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(config_path.as_deref(), dataset, count, seed)?;
    let dataset = fetch_dataset(&config.dataset).await?;
    let questions = make_generator(&config).generate_quiz(&dataset)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format.as_str() {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&questions)?)?,
        "text" => write_text(&mut out, &questions, show_answers)?,
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn write_text(out: &mut impl Write, questions: &[Question], show_answers: bool) -> Result<()> {
    for (i, question) in questions.iter().enumerate() {
        writeln!(out, "Q{}: {}", i + 1, question.prompt)?;
        for (j, option) in question.options.iter().enumerate() {
            writeln!(out, "   {}. {option}", j + 1)?;
        }
        if show_answers {
            writeln!(out, "(Correct Answer: {})", question.correct_answer)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

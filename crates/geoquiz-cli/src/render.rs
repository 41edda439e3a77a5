//! Terminal rendering of questions and summaries.

use std::io::{self, Write};

use comfy_table::{Cell, Table};

use geoquiz_core::report::QuizSummary;
use geoquiz_core::session::{OptionMark, QuizSession};

const BAR_WIDTH: usize = 20;

fn progress_bar(fraction: f64) -> String {
    let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Draw the current question with its options and the available controls.
pub fn question(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let Some(view) = session.current_view() else {
        return Ok(());
    };
    let progress = session.progress();

    writeln!(out)?;
    writeln!(
        out,
        "Question {}/{} {}  Score: {}",
        view.number,
        view.total,
        progress_bar(progress.fraction),
        session.score()
    )?;
    writeln!(out, "{}", view.prompt)?;

    for (i, option) in view.options.iter().enumerate() {
        let note = match view.mark(option) {
            OptionMark::Selectable | OptionMark::Neutral => "",
            OptionMark::ChosenCorrect => "  <- your answer (correct)",
            OptionMark::ChosenIncorrect => "  <- your answer (incorrect)",
            OptionMark::RevealedCorrect => "  <- correct answer",
        };
        writeln!(out, "  {}. {option}{note}", i + 1)?;
    }

    let mut controls = Vec::new();
    if !view.is_answered() {
        controls.push(format!("[1-{}] answer", view.options.len()));
    }
    if session.can_advance() {
        let label = if session.is_last_question() {
            "finish quiz"
        } else {
            "next question"
        };
        controls.push(format!("[n] {label}"));
    }
    if session.can_retreat() {
        controls.push("[p] previous".to_string());
    }
    controls.push("[r] restart".to_string());
    controls.push("[q] quit".to_string());
    writeln!(out, "{}", controls.join("  "))?;

    Ok(())
}

/// Draw the end-of-quiz results.
pub fn summary(out: &mut impl Write, summary: &QuizSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Final score: {}/{} ({:.0}%)",
        summary.score, summary.total, summary.percentage
    )?;
    writeln!(out, "{}", summary.feedback)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);
    for (i, outcome) in summary.outcomes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&outcome.prompt),
            Cell::new(outcome.chosen.as_deref().unwrap_or("-")),
            Cell::new(&outcome.correct_answer),
            Cell::new(if outcome.is_correct { "OK" } else { "X" }),
        ]);
    }
    writeln!(out, "\n{table}")?;
    writeln!(out, "[r] play again  [q] quit")?;

    Ok(())
}

//! Interactive prompt loop
//!
//! Suggests a guess each turn, reads the operator's report and feeds it to
//! the session. Runs until `q`/`quit` or end of input.

use crate::core::Pattern;
use crate::output::formatters::colored_guess;
use crate::session::{Command, CommandError, GameSession, Outcome, SessionState, parse_override};
use crate::solver::{ProposalSource, ScoringStrategy};
use colored::Colorize;
use std::io::{self, BufRead, Write};

const HELP: &str = "Enter the result:
  x for gray, y for yellow, g for green (e.g. xxygx)
  i  the game rejected the guess as invalid
  c  list the remaining candidates
  o  another word was played: o <word> <pattern>
  r  restart
  q  quit";

/// Drive `session` from `input`, writing prompts and reports to `out`
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails. Session
/// errors are reported to the operator and never end the loop.
pub fn run_interactive<S, R, W>(
    session: &mut GameSession<'_, S>,
    mut input: R,
    mut out: W,
) -> io::Result<()>
where
    S: ScoringStrategy,
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    writeln!(out, " {}", "Wordle Solver - Interactive Mode".bright_cyan().bold())?;
    writeln!(out, "{}\n", "═".repeat(60).bright_cyan())?;
    writeln!(out, "{HELP}\n")?;

    // Set after a failed proposal so bad input does not retry the search
    let mut stalled = false;

    loop {
        if session.state() == SessionState::AwaitingGuessChoice && !stalled {
            match session.next_guess() {
                Ok(_) => print_suggestion(session, &mut out)?,
                Err(e) => {
                    writeln!(out, "{} {e}", "✗".red().bold())?;
                    writeln!(out, "Restart (r), override (o) or quit (q).")?;
                    stalled = true;
                }
            }
        }

        let Some(line) = prompt(&mut input, &mut out, "Result")? else {
            break;
        };
        if matches!(line.to_lowercase().as_str(), "q" | "quit" | "exit") {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::IncompleteOverride) => {
                let Some(word) = prompt(&mut input, &mut out, "Word played")? else {
                    break;
                };
                let Some(pattern) = prompt(&mut input, &mut out, "Its result")? else {
                    break;
                };
                match parse_override(&word, &pattern) {
                    Ok(command) => command,
                    Err(e) => {
                        writeln!(out, "{} {e}", "✗".red().bold())?;
                        continue;
                    }
                }
            }
            Err(e) => {
                writeln!(out, "{} {e}", "✗".red().bold())?;
                continue;
            }
        };

        match session.apply(command) {
            Ok(outcome) => {
                stalled = false;
                report(session, command, &outcome, &mut out)?;
            }
            Err(e) => writeln!(out, "{} {e}", "✗".red().bold())?,
        }
    }

    writeln!(out, "\nBye!")?;
    Ok(())
}

fn print_suggestion<S: ScoringStrategy, W: Write>(
    session: &GameSession<'_, S>,
    out: &mut W,
) -> io::Result<()> {
    let Some(proposal) = session.pending_proposal() else {
        return Ok(());
    };

    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(
        out,
        "Turn {}: {} candidates remaining",
        session.turn(),
        session.pool().len()
    )?;
    writeln!(out, "{}", "─".repeat(60))?;

    let how = match proposal.source {
        ProposalSource::OpeningBook => "opening book",
        ProposalSource::SecondTurnBook => "second-turn book",
        ProposalSource::EarlyExit => "most likely answer",
        ProposalSource::Search => "best split",
    };
    writeln!(
        out,
        "\nSuggested guess: {} ({how})",
        proposal.guess.text().to_uppercase().bright_yellow().bold()
    )?;

    if let Some(scores) = &proposal.scores {
        for (word, record) in scores.ranked(5).iter().skip(1) {
            writeln!(
                out,
                "   also: {}  {:>10.3} {:>8.3}",
                word.text().to_uppercase(),
                record.primary,
                record.secondary
            )?;
        }
    }
    writeln!(out)
}

fn report<S: ScoringStrategy, W: Write>(
    session: &GameSession<'_, S>,
    command: Command,
    outcome: &Outcome,
    out: &mut W,
) -> io::Result<()> {
    match outcome {
        Outcome::Guess(guess) => writeln!(
            out,
            "Try instead: {}\n",
            guess.text().to_uppercase().bright_yellow().bold()
        ),
        Outcome::Candidates(words) => {
            writeln!(out, "{} candidates:", words.len())?;
            for row in words.chunks(10) {
                let row: Vec<String> = row.iter().map(|w| w.text().to_uppercase()).collect();
                writeln!(out, "  {}", row.join(" "))?;
            }
            writeln!(out)
        }
        Outcome::Refined { remaining } => {
            if let Some((word, pattern)) = session.last_feedback() {
                writeln!(out, "  {}", colored_guess(&word, pattern))?;
            }
            if let Command::Pattern(Pattern::PERFECT) | Command::ManualOverride(_, Pattern::PERFECT) =
                command
            {
                writeln!(
                    out,
                    "{}",
                    format!("✅ Solved in {} guesses! Restart (r) or quit (q).", session.turn() - 1)
                        .green()
                        .bold()
                )?;
            } else if session.is_solved() {
                let answer = session.pool().words()[0];
                writeln!(
                    out,
                    "1 candidate left: {}",
                    answer.text().to_uppercase().bright_green().bold()
                )?;
            } else {
                writeln!(out, "{remaining} candidates remain")?;
            }
            writeln!(out)
        }
        Outcome::Restarted => writeln!(out, "\n🔄 New game started!\n"),
    }
}

/// Print `label`, read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

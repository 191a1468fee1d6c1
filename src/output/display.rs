//! Display functions for command results

use super::formatters::{colored_guess, create_progress_bar};
use crate::commands::{AnalysisResult, BenchmarkResult, PrecomputeResult, SolveResult};
use crate::solver::ProposalSource;
use colored::Colorize;

/// Print the result of solving a word
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.target.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        let turn = i + 1;
        println!(
            "\nTurn {}: {} {}",
            turn,
            colored_guess(&step.word, step.pattern),
            step.pattern.to_emoji()
        );

        if verbose {
            println!(
                "  Candidates: {} → {}",
                step.candidates_before, step.candidates_after
            );
            match (step.source, step.score) {
                (ProposalSource::Search, Some(score)) => {
                    println!(
                        "  Score:      {:.3} (greens {:.3})",
                        score.primary, score.secondary
                    );
                }
                (ProposalSource::OpeningBook, _) => println!("  From the opening book"),
                (ProposalSource::SecondTurnBook, _) => println!("  From the second-turn book"),
                (ProposalSource::EarlyExit, _) => println!("  Most likely candidate"),
                (ProposalSource::Search, None) => {}
            }

            if step.candidates_after > 0 {
                let reduction = step.candidates_before as f64 / step.candidates_after as f64;
                println!(
                    "  Info gained: {:.3} bits ({reduction:.1}x reduction)",
                    reduction.log2()
                );
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.guesses.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.guesses.len())
                .red()
                .bold()
        );
    }
}

/// Print the result of word analysis
pub fn print_analysis_result(result: &AnalysisResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "GUESS ANALYSIS:".bright_cyan().bold(),
        result.word.text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    let total = result.total_candidates as f64;
    let bar = create_progress_bar(total - result.expected_remaining, total, 30);

    println!("\n📊 Against {} possible answers:", result.total_candidates);
    println!(
        "   Score:       {}",
        format!("{:.3} (greens {:.3})", result.score.primary, result.score.secondary)
            .bright_yellow()
    );
    println!(
        "   Rank:        {} (best: {} at {:.3})",
        result.rank,
        result.best.text().to_uppercase(),
        result.best_score.primary
    );
    println!(
        "   Elimination: [{}] {:.1} candidates expected to remain",
        bar.green(),
        result.expected_remaining
    );
    println!(
        "   Splits:      {} patterns, largest {}",
        result.buckets, result.largest_bucket
    );
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!("   Solved:           {}", result.solved);
    println!(
        "   Average guesses:  {}",
        format!("{:.3}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&guess_count, &count) in &result.distribution {
        let pct = (count as f64 / result.total_words as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guess_count}: {} {count:4} ({pct:5.1}%)", bar.green());
    }

    if !result.failed.is_empty() {
        let failed: Vec<String> = result
            .failed
            .iter()
            .map(|w| w.text().to_uppercase())
            .collect();
        println!(
            "\n❌ {} {}",
            "Not solved:".red().bold(),
            failed.join(" ")
        );
    }
}

/// Print a summary of a precomputed opening book
pub fn print_precompute_result(result: &PrecomputeResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "OPENING BOOK:".bright_cyan().bold(),
        result.book.opener().text().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n   {} second-turn replies in {:.2}s",
        result.book.reply_count(),
        result.duration.as_secs_f64()
    );
    for (pattern, reply) in result.book.replies().iter().take(10) {
        println!("   {} {}", pattern.to_emoji(), reply.text().to_uppercase());
    }
    if result.book.reply_count() > 10 {
        println!("   …");
    }
}

//! Display functions for command results

use super::formatters::{create_progress_bar, format_clock, letter_tiles, number_tiles};
use crate::commands::{
    BenchmarkResult, CheckReport, CurationSummary, EvalReport, LettersReport, NumbersReport,
};
use crate::core::{LETTER_RACK_SIZE, NUMBER_RACK_SIZE};
use crate::round::{NumbersOutcome, RoundKind};
use crate::solver::{ConundrumPuzzle, TargetOrigin};
use crate::storage::{HighScoreTable, MAX_HIGH_SCORES, Settings};
use colored::Colorize;

fn banner(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

/// Print a solved or generated target
pub fn print_numbers_report(report: &NumbersReport) {
    banner("NUMBERS");
    println!(
        "\n   Numbers:  {}",
        number_tiles(&report.numbers, NUMBER_RACK_SIZE)
    );
    println!(
        "   Target:   {}",
        report.target.to_string().bright_yellow().bold()
    );

    match report.origin {
        Some(TargetOrigin::Searched { attempts }) => {
            println!("   Origin:   random target, certified after {attempts} attempt(s)");
        }
        Some(TargetOrigin::Fallback) => {
            println!(
                "   Origin:   {}",
                "fallback from the largest numbers".yellow()
            );
        }
        None => {}
    }

    println!();
    match &report.solution {
        Some(solution) => {
            println!("{}", format!("✅ {solution}").green().bold());
            if let Some(steps) = solution.expr.steps() {
                for step in steps {
                    println!("   {step}");
                }
            }
        }
        None => println!(
            "{}",
            "❌ No solution using up to four numbers".red().bold()
        ),
    }
}

/// Print the score for an expression
pub fn print_eval_report(report: &EvalReport) {
    banner("EXPRESSION");
    println!(
        "\n   Numbers:    {}",
        number_tiles(&report.numbers, NUMBER_RACK_SIZE)
    );
    println!("   Target:     {}", report.target.to_string().bright_yellow());
    println!("   Expression: {}", report.expression);
    println!();

    let line = report.outcome.to_string();
    match &report.outcome {
        NumbersOutcome::Scored { score, .. } if *score > 0 => {
            println!("{}", format!("✅ {line}").green().bold());
        }
        NumbersOutcome::Scored { .. } => println!("{}", format!("➖ {line}").yellow()),
        _ => println!("{}", format!("❌ {line}").red().bold()),
    }
}

/// Print the longest word on a rack and any verdict
pub fn print_letters_report(report: &LettersReport) {
    banner("LETTERS");
    println!(
        "\n   Rack:     {}",
        letter_tiles(&report.letters, LETTER_RACK_SIZE)
    );
    println!("   Language: {}", report.language);

    match &report.longest {
        Some(word) => println!(
            "   Longest:  {} ({} letters)",
            word.bright_yellow().bold(),
            word.chars().count()
        ),
        None => println!("   Longest:  {}", "no word found".red()),
    }

    if let Some(verdict) = &report.verdict {
        println!();
        if verdict.score() > 0 {
            println!("{}", format!("✅ {verdict}").green().bold());
        } else {
            println!("{}", format!("❌ {verdict}").red().bold());
        }
    }
}

/// Print a dictionary lookup
pub fn print_check_report(report: &CheckReport) {
    let source = if report.local { "word list" } else { "online dictionary" };
    if report.valid {
        println!(
            "{} {} is a valid {} word ({source})",
            "✅".green(),
            report.word.to_uppercase().bright_yellow().bold(),
            report.language
        );
    } else {
        println!(
            "{} {} is not a valid {} word",
            "❌".red(),
            report.word.to_uppercase().bright_yellow().bold(),
            report.language
        );
    }
}

/// Print a scrambled conundrum, optionally with its answer
pub fn print_conundrum(puzzle: &ConundrumPuzzle, reveal: bool) {
    banner("CONUNDRUM");
    let letters: Vec<char> = puzzle.scrambled().chars().collect();
    println!(
        "\n   {}",
        letter_tiles(&letters, letters.len()).bright_yellow().bold()
    );
    if reveal {
        println!("\n   Answer: {}", puzzle.answer().green().bold());
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    banner("BENCHMARK RESULTS");

    println!("\n📊 {}", "Targets:".bright_cyan().bold());
    println!("   Racks tested:     {}", result.total_racks);
    println!("   Searched:         {}", result.searched.to_string().green());
    println!("   Fallback:         {}", result.fallback.to_string().yellow());
    println!(
        "   Out of range:     {}",
        result.out_of_range.to_string().red()
    );
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts)
            .bright_yellow()
            .bold()
    );
    println!("   Worst attempts:   {}", result.max_attempts);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Racks/second:     {:.1}", result.racks_per_second);

    if result.total_racks == 0 {
        return;
    }
    println!("\n📈 {}", "Numbers used by the witness:".bright_cyan().bold());
    for (operands, &count) in &result.operand_distribution {
        let pct = (count as f64 / result.total_racks as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {operands}: {} {count:5} ({pct:5.1}%)", bar.green());
    }
}

/// Print the high score table
pub fn print_high_scores(table: &HighScoreTable) {
    banner("HIGH SCORES");
    if table.is_empty() {
        println!("\n   No scores yet. Play a game!");
        return;
    }

    println!();
    for (i, entry) in table.entries().iter().enumerate() {
        let rank = format!("{:>2}.", i + 1);
        let rank = if i == 0 {
            rank.bright_yellow().bold()
        } else {
            rank.bright_black()
        };
        println!(
            "   {rank} {:>4} pts   {}   {} rounds",
            entry.score.to_string().bright_white().bold(),
            entry.date,
            entry.rounds
        );
    }
    println!("\n   Showing {} of {MAX_HIGH_SCORES}", table.len());
}

/// Print the round timers and sound toggle
pub fn print_settings(settings: &Settings) {
    banner("SETTINGS");
    println!();
    for kind in [RoundKind::Letters, RoundKind::Numbers, RoundKind::Conundrum] {
        println!(
            "   {:<10} {}",
            format!("{kind}:"),
            format_clock(settings.secs_for(kind)).bright_yellow()
        );
    }
    let sound = if settings.sound { "on".green() } else { "off".red() };
    println!("   {:<10} {sound}", "Sound:");
}

/// Print the files written by a curation run
pub fn print_curation_summary(summary: &CurationSummary) {
    banner("CURATION");
    println!("\n   Output: {}", summary.out_dir.display());
    for (name, count) in &summary.files {
        println!("   {name:<20} {count:>7} words");
    }
}

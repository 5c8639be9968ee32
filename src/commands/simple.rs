//! Simple interactive CLI mode
//!
//! A full seven-round game in plain text, without the TUI. The clock is
//! checked when an answer is entered: answers typed after it ran out count as
//! no answer.

use crate::core::{LETTER_RACK_SIZE, Language, NUMBER_RACK_SIZE, TileKind};
use crate::dictionary::{Dictionary, RemoteDictionary};
use crate::output::formatters::{countdown_bar, format_clock, letter_tiles, number_tiles};
use crate::round::{
    ActiveRound, ConundrumRound, Game, GuessOutcome, LettersRound, NumbersRound, Phase,
    Submission, TOTAL_ROUNDS,
};
use crate::solver::find_longest_word;
use crate::sound::{SoundCue, SoundEffects};
use crate::storage::{HighScoreStore, SaveOutcome, Settings};
use crate::wordlists::Lexicon;
use anyhow::{Context, Result};
use colored::Colorize;
use rand::rngs::ThreadRng;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tokio::runtime::Runtime;

/// Everything a line-mode game needs from the outside
pub struct SimpleContext<'a, R> {
    pub lexicon: &'a Lexicon,
    pub dictionary: &'a Dictionary<'a, R>,
    pub settings: Settings,
    pub high_scores: &'a HighScoreStore,
    pub sounds: &'a dyn SoundEffects,
    pub runtime: &'a Runtime,
}

/// Whether the player asked to leave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session<'a, 'c, R, I> {
    ctx: &'c SimpleContext<'a, R>,
    language: Language,
    input: I,
    rng: ThreadRng,
}

/// Play one game reading answers from `input`
///
/// Returns where the final score landed in the high score table, or `None`
/// if the player quit before the last round.
///
/// # Errors
///
/// Returns an error on an I/O failure or if a round cannot be set up.
pub fn run_simple<R: RemoteDictionary, I: BufRead>(
    ctx: &SimpleContext<'_, R>,
    language: Language,
    input: I,
) -> Result<Option<SaveOutcome>> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Countdown - Simple Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Seven rounds: three Letters, three Numbers and a final Conundrum.");
    println!("Type 'quit' at any prompt to leave.\n");

    let mut session = Session {
        ctx,
        language,
        input,
        rng: rand::rng(),
    };
    session.play()
}

impl<R: RemoteDictionary, I: BufRead> Session<'_, '_, R, I> {
    fn play(&mut self) -> Result<Option<SaveOutcome>> {
        let mut game = Game::new(self.language);

        while let Some(kind) = game.current_kind() {
            println!("{}", "─".repeat(60).cyan());
            println!(
                "{}",
                format!("Round {}/{TOTAL_ROUNDS}: {kind}", game.round_number())
                    .bright_cyan()
                    .bold()
            );
            println!("{}", "─".repeat(60).cyan());

            let round = game
                .start_round(&self.ctx.settings, self.ctx.lexicon, &mut self.rng)
                .context("Cannot start round")?;
            let (flow, score) = match round {
                ActiveRound::Letters(mut round) => (self.letters(&mut round)?, round.score()),
                ActiveRound::Numbers(mut round) => (self.numbers(&mut round)?, round.score()),
                ActiveRound::Conundrum(mut round) => (self.conundrum(&mut round)?, round.score()),
            };
            if flow == Flow::Quit {
                println!("\n👋 Thanks for playing!\n");
                return Ok(None);
            }

            game.record(score);
            println!(
                "\nRound score: {}   Total: {}\n",
                score.to_string().bright_yellow().bold(),
                game.total_score().to_string().bright_white().bold()
            );
        }

        self.finish(&game).map(Some)
    }

    fn letters(&mut self, round: &mut LettersRound) -> Result<Flow> {
        while round.phase() == Phase::Picking {
            println!("  {}", letter_tiles(round.rack().letters(), LETTER_RACK_SIZE));
            let Some(choice) = self.prompt("Vowel or consonant? (v/c)")? else {
                return Ok(Flow::Quit);
            };
            let kind = match choice.to_lowercase().as_str() {
                "v" | "vowel" => TileKind::Vowel,
                "c" | "consonant" => TileKind::Consonant,
                _ => {
                    println!("Type 'v' for a vowel or 'c' for a consonant");
                    continue;
                }
            };
            match round.draw(kind, &mut self.rng, Instant::now()) {
                Ok(_) => self.ctx.sounds.play(SoundCue::Click),
                Err(e) => {
                    self.ctx.sounds.play(SoundCue::Error);
                    println!("{}", e.to_string().red());
                }
            }
        }

        self.ctx.sounds.play(SoundCue::Reveal);
        println!(
            "\n  {}\n",
            letter_tiles(round.rack().letters(), LETTER_RACK_SIZE)
                .bright_yellow()
                .bold()
        );
        println!("You have {} seconds.", self.ctx.settings.letters_secs);
        let Some(word) = self.prompt("Your word")? else {
            return Ok(Flow::Quit);
        };

        let submission = if let Some(late) = round.tick(Instant::now()) {
            self.time_up();
            late
        } else {
            round.set_input(&word);
            round.submit()?
        };
        if let Submission::Checking(word) = submission {
            println!("Checking {word}...");
            self.ctx
                .runtime
                .block_on(round.check_word(self.ctx.dictionary, self.language))?;
        }

        if let Some(outcome) = round.outcome() {
            self.report(outcome.score(), &outcome.to_string());
        }
        if let Some(best) = find_longest_word(self.ctx.lexicon, round.rack().letters(), self.language)
        {
            println!("Longest possible: {}", best.bright_white().bold());
        }
        Ok(Flow::Continue)
    }

    fn numbers(&mut self, round: &mut NumbersRound) -> Result<Flow> {
        while round.phase() == Phase::Picking {
            println!("  {}", number_tiles(round.rack().numbers(), NUMBER_RACK_SIZE));
            let Some(choice) = self.prompt("Large or small? (l/s)")? else {
                return Ok(Flow::Quit);
            };
            let now = Instant::now();
            let drawn = match choice.to_lowercase().as_str() {
                "l" | "large" => round.draw_large(&mut self.rng, now),
                "s" | "small" => round.draw_small(&mut self.rng, now),
                _ => {
                    println!("Type 'l' for a large number or 's' for a small one");
                    continue;
                }
            };
            match drawn {
                Ok(_) => self.ctx.sounds.play(SoundCue::Click),
                Err(e) => {
                    self.ctx.sounds.play(SoundCue::Error);
                    println!("{}", e.to_string().red());
                }
            }
        }

        self.ctx.sounds.play(SoundCue::Reveal);
        println!(
            "\n  {}",
            number_tiles(round.rack().numbers(), NUMBER_RACK_SIZE)
        );
        if let Some(target) = round.target() {
            println!(
                "  Target: {}\n",
                target.value.to_string().bright_yellow().bold()
            );
        }
        println!("You have {} seconds.", self.ctx.settings.numbers_secs);
        let Some(expr) = self.prompt("Your expression")? else {
            return Ok(Flow::Quit);
        };

        if round.tick(Instant::now()).is_some() {
            self.time_up();
        } else {
            round.set_input(&expr);
            round.submit()?;
        }

        if let Some(outcome) = round.outcome() {
            self.report(outcome.score(), &outcome.to_string());
        }
        if let Some(target) = round.target() {
            println!("One solution: {}", target.solution.to_string().bright_white());
        }
        Ok(Flow::Continue)
    }

    fn conundrum(&mut self, round: &mut ConundrumRound) -> Result<Flow> {
        round.start(Instant::now())?;
        self.ctx.sounds.play(SoundCue::Reveal);
        let letters: Vec<char> = round.puzzle().scrambled().chars().collect();
        println!(
            "\n  {}\n",
            letter_tiles(&letters, letters.len()).bright_yellow().bold()
        );
        println!(
            "You have {} seconds. Type 'pass' to give up.",
            self.ctx.settings.conundrum_secs
        );

        while round.phase() == Phase::Playing {
            let Some(guess) = self.prompt("Your answer")? else {
                return Ok(Flow::Quit);
            };
            if round.tick(Instant::now()) {
                self.time_up();
                break;
            }
            if guess.eq_ignore_ascii_case("pass") {
                round.give_up()?;
                break;
            }

            round.set_input(&guess);
            match round.guess()? {
                GuessOutcome::Correct => {
                    self.report(round.score(), "Correct! +10 points");
                }
                GuessOutcome::Incorrect => {
                    self.ctx.sounds.play(SoundCue::Error);
                    println!("{}", "Not quite, try again".red());
                    if let Some(countdown) = round.countdown() {
                        let now = Instant::now();
                        println!(
                            "  ⏱  {} {}",
                            format_clock(countdown.remaining_secs(now)),
                            countdown_bar(countdown.fraction_remaining(now), 30).cyan()
                        );
                    }
                }
                GuessOutcome::Empty => {}
            }
        }

        if !round.is_solved() {
            println!(
                "The answer was {}",
                round.puzzle().answer().bright_white().bold()
            );
        }
        Ok(Flow::Continue)
    }

    fn finish(&self, game: &Game) -> Result<SaveOutcome> {
        self.ctx.sounds.play(SoundCue::GameOver);
        let total = game.total_score();

        println!("\n{}", "═".repeat(60).bright_cyan());
        println!(
            "{}",
            "           G A M E   O V E R           ".bright_green().bold()
        );
        println!("{}", "═".repeat(60).bright_cyan());
        println!(
            "\n  Final score: {}",
            total.to_string().bright_yellow().bold()
        );

        let saved = self
            .ctx
            .high_scores
            .save(total, game.rounds_played())
            .context("Cannot save the high score")?;
        if saved.is_high_score {
            println!(
                "  {}",
                format!("🏆 New high score! Rank #{}", saved.rank)
                    .bright_green()
                    .bold()
            );
        } else {
            println!("  Rank #{}", saved.rank);
        }
        println!();
        Ok(saved)
    }

    fn report(&self, score: u32, message: &str) {
        if score > 0 {
            self.ctx.sounds.play(SoundCue::Success);
            println!("{}", format!("✅ {message}").green().bold());
        } else {
            self.ctx.sounds.play(SoundCue::Error);
            println!("{}", format!("❌ {message}").red().bold());
        }
    }

    fn time_up(&self) {
        self.ctx.sounds.play(SoundCue::TimeUp);
        println!("{}", "⏰ Time's up!".yellow().bold());
    }

    /// Read one trimmed line; `None` on end of input or a quit command
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        print!("{label}: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if matches!(line.to_lowercase().as_str(), "quit" | "exit") {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}

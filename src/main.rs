//! Countdown - CLI
//!
//! Play Countdown in a TUI or line mode, or use the solvers directly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use countdown::{
    commands::{
        BenchmarkConfig, CurationInputs, SettingsUpdate, SimpleContext, analyze_letters,
        check_word, draw_conundrum, high_scores, rack_numbers, run_benchmark, run_curation,
        Source, run_simple, score_expression, solve_numbers, update_settings,
    },
    core::Language,
    dictionary::{Dictionary, RemoteFallback},
    output::{
        print_benchmark_result, print_check_report, print_conundrum, print_curation_summary,
        print_eval_report, print_high_scores, print_letters_report, print_numbers_report,
        print_settings,
    },
    sound,
    storage::DataDir,
    wordlists::Lexicon,
};
use std::io;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "countdown",
    about = "The Countdown word and numbers game, with solvers for every round",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dictionary language: en (default) or fr
    #[arg(short, long, global = true, default_value = "en")]
    lang: Language,

    /// Directory holding high scores and settings
    #[arg(long, global = true, env = "COUNTDOWN_DATA_DIR", default_value = ".countdown")]
    data_dir: PathBuf,

    /// Load word lists from a directory instead of the built-in ones
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Never query the online dictionary
    #[arg(long, global = true)]
    offline: bool,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI game (default)
    Play,

    /// Line-by-line game without the TUI
    Simple,

    /// Generate a target for a rack and show a solution
    Numbers {
        /// Six numbers, comma separated (dealt at random when omitted)
        #[arg(short, long, value_delimiter = ',')]
        numbers: Vec<u32>,

        /// Large numbers to deal when no numbers are given
        #[arg(short, long, default_value = "2")]
        large: usize,

        /// Solve for this target instead of generating one
        #[arg(short, long)]
        target: Option<u64>,
    },

    /// Score an arithmetic expression against a rack and target
    Eval {
        /// Expression, e.g. "(100 + 6) * 3"
        expression: String,

        /// The six rack numbers, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        numbers: Vec<u32>,

        /// Target value
        #[arg(short, long)]
        target: u64,
    },

    /// Find the longest word in a letter rack
    Letters {
        /// Up to nine letters, e.g. "GARDENIST"
        letters: String,

        /// Also score this word against the rack
        #[arg(long)]
        word: Option<String>,
    },

    /// Check whether a word is in the dictionary
    Check {
        /// Word to look up
        word: String,
    },

    /// Show a conundrum
    Conundrum {
        /// Scramble this answer instead of drawing one
        #[arg(short, long)]
        answer: Option<String>,

        /// Print the answer too
        #[arg(short, long)]
        reveal: bool,
    },

    /// Benchmark target generation
    Benchmark {
        /// Number of racks to test
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,

        /// Large numbers per rack (random 0-4 when omitted)
        #[arg(short, long)]
        large: Option<usize>,

        /// Seed of the first rack
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Show the high score table
    Scores {
        /// Remove every stored score
        #[arg(long)]
        clear: bool,
    },

    /// Show or change timer and sound settings
    Settings {
        /// Letters round duration in seconds
        #[arg(long)]
        letters: Option<u64>,

        /// Numbers round duration in seconds
        #[arg(long)]
        numbers: Option<u64>,

        /// Conundrum duration in seconds
        #[arg(long)]
        conundrum: Option<u64>,

        /// Turn sound cues on or off
        #[arg(long)]
        sound: Option<bool>,
    },

    /// Build cleaned word lists from raw dictionary files
    Curate {
        /// First-name lists to blacklist, as paths or http(s) URLs (repeatable)
        #[arg(long = "names")]
        names: Vec<Source>,

        /// Places CSV to blacklist (first column)
        #[arg(long)]
        places: Option<Source>,

        /// Common English words
        #[arg(long)]
        english_common: Option<Source>,

        /// French frequency list ("count word" per line)
        #[arg(long)]
        french_frequencies: Option<Source>,

        /// Full English reference dictionary, written as the game dictionary
        #[arg(long)]
        english_reference: Option<Source>,

        /// Full French reference dictionary, written as the game dictionary
        #[arg(long)]
        french_reference: Option<Source>,

        /// Existing English conundrum answers
        #[arg(long)]
        english_conundrums: Option<Source>,

        /// Download the upstream name, place and frequency lists left unset
        #[arg(long)]
        download: bool,

        /// Output directory, usable with --words
        #[arg(short, long, default_value = "data")]
        out: PathBuf,
    },
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins unless `-v` asks for debug output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("countdown=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Built-in lists, or the lists in `--words <dir>`
fn load_lexicon(runtime: &Runtime, words: Option<&Path>) -> Result<Lexicon> {
    match words {
        None => Ok(Lexicon::embedded()),
        Some(dir) => runtime
            .block_on(Lexicon::load_dir(dir))
            .with_context(|| format!("Cannot load word lists from {}", dir.display())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = Runtime::new().context("Cannot start the async runtime")?;
    let data_dir = DataDir::new(&cli.data_dir);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => {
            let lexicon = load_lexicon(&runtime, cli.words.as_deref())?;
            run_play_command(&lexicon, &data_dir, cli.lang, cli.offline, &runtime)
        }
        Commands::Simple => {
            let lexicon = load_lexicon(&runtime, cli.words.as_deref())?;
            run_simple_command(&lexicon, &data_dir, cli.lang, cli.offline, &runtime)
        }
        Commands::Numbers {
            numbers,
            large,
            target,
        } => run_numbers_command(&numbers, large, target),
        Commands::Eval {
            expression,
            numbers,
            target,
        } => {
            let report = score_expression(numbers, target, &expression)?;
            print_eval_report(&report);
            Ok(())
        }
        Commands::Letters { letters, word } => {
            let lexicon = load_lexicon(&runtime, cli.words.as_deref())?;
            let dictionary =
                Dictionary::new(&lexicon, RemoteFallback::from_offline_flag(cli.offline));
            let report = runtime.block_on(analyze_letters(
                &dictionary,
                &letters,
                word.as_deref(),
                cli.lang,
            ))?;
            print_letters_report(&report);
            Ok(())
        }
        Commands::Check { word } => {
            let lexicon = load_lexicon(&runtime, cli.words.as_deref())?;
            let dictionary =
                Dictionary::new(&lexicon, RemoteFallback::from_offline_flag(cli.offline));
            let report = runtime.block_on(check_word(&dictionary, &word, cli.lang));
            print_check_report(&report);
            Ok(())
        }
        Commands::Conundrum { answer, reveal } => {
            let lexicon = load_lexicon(&runtime, cli.words.as_deref())?;
            let puzzle = draw_conundrum(&lexicon, cli.lang, answer.as_deref(), &mut rand::rng())?;
            print_conundrum(&puzzle, reveal);
            Ok(())
        }
        Commands::Benchmark { count, large, seed } => run_benchmark_command(count, large, seed),
        Commands::Scores { clear } => {
            let table = high_scores(&data_dir.high_scores(), clear)?;
            print_high_scores(&table);
            Ok(())
        }
        Commands::Settings {
            letters,
            numbers,
            conundrum,
            sound,
        } => {
            let update = SettingsUpdate {
                letters_secs: letters,
                numbers_secs: numbers,
                conundrum_secs: conundrum,
                sound,
            };
            let settings = update_settings(&data_dir.settings(), update)?;
            print_settings(&settings);
            Ok(())
        }
        Commands::Curate {
            names,
            places,
            english_common,
            french_frequencies,
            english_reference,
            french_reference,
            english_conundrums,
            download,
            out,
        } => {
            let mut inputs = CurationInputs {
                names,
                places,
                english_common,
                french_frequencies,
                english_reference,
                french_reference,
                english_conundrums,
            };
            if download {
                inputs = inputs.with_upstream_defaults();
            }
            let summary = runtime.block_on(run_curation(&inputs, &out))?;
            print_curation_summary(&summary);
            Ok(())
        }
    }
}

fn run_numbers_command(numbers: &[u32], large: usize, target: Option<u64>) -> Result<()> {
    let mut rng = rand::rng();
    let rack = rack_numbers(numbers, large, &mut rng)?;
    let report = solve_numbers(rack, target, &mut rng)?;
    print_numbers_report(&report);
    Ok(())
}

fn run_benchmark_command(count: usize, large: Option<usize>, seed: u64) -> Result<()> {
    println!("Generating targets for {count} racks...");

    let config = BenchmarkConfig {
        count,
        large,
        seed,
        show_progress: true,
    };
    let result = run_benchmark(config)?;
    print_benchmark_result(&result);
    Ok(())
}

fn run_simple_command(
    lexicon: &Lexicon,
    data_dir: &DataDir,
    language: Language,
    offline: bool,
    runtime: &Runtime,
) -> Result<()> {
    let dictionary = Dictionary::new(lexicon, RemoteFallback::from_offline_flag(offline));
    let settings = data_dir.settings().load();
    let high_scores = data_dir.high_scores();
    let sounds = sound::from_settings(settings.sound);

    let ctx = SimpleContext {
        lexicon,
        dictionary: &dictionary,
        settings,
        high_scores: &high_scores,
        sounds: sounds.as_ref(),
        runtime,
    };
    run_simple(&ctx, language, io::stdin().lock())?;
    Ok(())
}

fn run_play_command(
    lexicon: &Lexicon,
    data_dir: &DataDir,
    language: Language,
    offline: bool,
    runtime: &Runtime,
) -> Result<()> {
    use countdown::interactive::{App, run_tui};

    let settings = data_dir.settings().load();
    let app = App::new(
        lexicon,
        Dictionary::new(lexicon, RemoteFallback::from_offline_flag(offline)),
        settings,
        data_dir.high_scores(),
        sound::from_settings(settings.sound),
        language,
    );
    run_tui(app, runtime)
}

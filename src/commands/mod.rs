//! Command implementations

pub mod benchmark;
pub mod conundrum;
pub mod curate;
pub mod letters;
pub mod numbers;
pub mod records;
pub mod simple;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use conundrum::draw_conundrum;
pub use curate::{CurationInputs, CurationSummary, Source, run_curation};
pub use letters::{CheckReport, LettersReport, analyze_letters, check_word, parse_letters};
pub use numbers::{EvalReport, NumbersReport, rack_numbers, score_expression, solve_numbers};
pub use records::{SettingsUpdate, high_scores, update_settings};
pub use simple::{SimpleContext, run_simple};

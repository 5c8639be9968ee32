//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_benchmark_result, print_check_report, print_conundrum, print_curation_summary,
    print_eval_report, print_high_scores, print_letters_report, print_numbers_report,
    print_settings,
};

//! Countdown
//!
//! The Countdown word and numbers game: Letters, Numbers and Conundrum rounds,
//! their solvers, bilingual word lists and a terminal front end.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use countdown::solver::{evaluate, find_solution};
//!
//! // Search for an exact solution
//! let solution = find_solution(&[100, 75, 3, 6, 2, 1], 318).unwrap();
//! println!("{solution}");
//!
//! // Score a player's answer
//! assert_eq!(evaluate("(75 - 3) x [6 + 2]").unwrap(), 576);
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Word lists
pub mod wordlists;

// Word validation
pub mod dictionary;

// Round state machines
pub mod round;

// High scores and settings
pub mod storage;

// Audio cues
pub mod sound;

// Word list cleanup
pub mod curation;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

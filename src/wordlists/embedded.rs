//! Built-in dictionaries
//!
//! `build.rs` turns `data/*.txt` into four `&[&str]` constants:
//! [`ENGLISH_WORDS`], [`FRENCH_WORDS`], [`ENGLISH_CONUNDRUMS`] and
//! [`FRENCH_CONUNDRUMS`].

include!(concat!(env!("OUT_DIR"), "/wordlists.rs"));

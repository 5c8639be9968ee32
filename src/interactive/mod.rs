//! Interactive TUI interface

pub mod app;
pub mod rendering;

pub use app::{App, AppMode, Message, MessageStyle, run_tui};

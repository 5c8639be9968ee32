//! TUI rendering with ratatui
//!
//! Board, clock and score panels for the game.

use super::app::{App, AppMode, MessageStyle};
use crate::core::{LETTER_RACK_SIZE, NUMBER_RACK_SIZE};
use crate::output::formatters::{format_clock, letter_tiles, number_tiles};
use crate::round::{ActiveRound, Phase, ROUND_SCHEDULE, TOTAL_ROUNDS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Board
            Constraint::Percentage(40), // Scores and messages
        ])
        .split(chunks[1]);

    if app.mode == AppMode::GameOver {
        render_game_over(f, app, main_chunks[0]);
    } else {
        render_board(f, app, now, main_chunks[0]);
    }
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match (&app.round, app.mode) {
        (_, AppMode::GameOver) => "⏱  COUNTDOWN | Game Over".to_string(),
        (Some(round), AppMode::Playing) => format!(
            "⏱  COUNTDOWN | Round {}/{TOTAL_ROUNDS}: {}",
            app.game.round_number(),
            round.kind()
        ),
        (None, AppMode::Playing) => "⏱  COUNTDOWN".to_string(),
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, now: Instant, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Tiles
            Constraint::Length(3), // Clock
        ])
        .split(area);

    let tile_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let (title, content) = match &app.round {
        Some(ActiveRound::Letters(round)) => (
            " Letters ",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    letter_tiles(round.rack().letters(), LETTER_RACK_SIZE),
                    tile_style,
                )),
                Line::from(""),
                Line::from(format!(
                    "Vowels: {}  Consonants: {}",
                    round.rack().vowel_count(),
                    round.rack().consonant_count()
                )),
            ],
        ),
        Some(ActiveRound::Numbers(round)) => {
            let target = round.target().map_or_else(
                || "???".to_string(),
                |target| target.value.to_string(),
            );
            (
                " Numbers ",
                vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Target: "),
                        Span::styled(
                            target,
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(""),
                    Line::from(Span::styled(
                        number_tiles(round.rack().numbers(), NUMBER_RACK_SIZE),
                        tile_style,
                    )),
                ],
            )
        }
        Some(ActiveRound::Conundrum(round)) => {
            let letters: Vec<char> = if round.phase() == Phase::Ready {
                vec!['?'; round.puzzle().scrambled().chars().count()]
            } else {
                round.puzzle().scrambled().chars().collect()
            };
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(letter_tiles(&letters, letters.len()), tile_style)),
            ];
            if round.attempts() > 0 {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("Attempts: {}", round.attempts())));
            }
            (" Conundrum ", lines)
        }
        None => (" Board ", vec![Line::from("No round in progress")]),
    };

    let board = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(board, chunks[0]);

    render_clock(f, app, now, chunks[1]);
}

fn render_clock(f: &mut Frame, app: &App, now: Instant, area: Rect) {
    let countdown = app.round.as_ref().and_then(ActiveRound::countdown);
    let (percent, label, color) = match countdown {
        Some(countdown) => {
            let secs = countdown.remaining_secs(now);
            let color = match secs {
                0..=5 => Color::Red,
                _ if countdown.is_warning(now) => Color::Yellow,
                _ => Color::Green,
            };
            let percent = (countdown.fraction_remaining(now) * 100.0).round() as u16;
            (percent.min(100), format_clock(secs), color)
        }
        None => {
            let label = match app.phase() {
                Some(Phase::Checking) => "Checking word...",
                Some(Phase::Result) => "Round over",
                _ => "Clock stopped",
            };
            (0, label.to_string(), Color::DarkGray)
        }
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Clock ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(color))
        .percent(percent)
        .label(label);
    f.render_widget(gauge, area);
}

fn render_game_over(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Final score: "),
            Span::styled(
                app.game.total_score().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    if let Some(saved) = app.last_saved {
        lines.push(Line::from(format!("Rank #{}", saved.rank)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "High scores",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    for (i, entry) in app.table.entries().iter().enumerate() {
        lines.push(Line::from(format!(
            "{:>2}. {:>4} pts  {}",
            i + 1,
            entry.score,
            entry.date
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" 🎉 Game Over 🎉 ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Green)),
        );
    f.render_widget(paragraph, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TOTAL_ROUNDS as u16 + 3), // Scores
            Constraint::Min(4),                          // Messages
        ])
        .split(area);

    render_scores(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_scores(f: &mut Frame, app: &App, area: Rect) {
    let scores = app.game.scores();
    let current = scores.len();
    let mut items: Vec<ListItem> = ROUND_SCHEDULE
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let (score, style) = match scores.get(i) {
                Some(score) => (score.to_string(), Style::default().fg(Color::White)),
                None if i == current && app.mode == AppMode::Playing => (
                    "…".to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
            };
            ListItem::new(format!("{}. {kind:<10} {score:>3}", i + 1)).style(style)
        })
        .collect();
    items.push(ListItem::new(format!("   {:<10} {:>3}", "Total", app.game.total_score()))
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)));

    let list = List::new(items).block(
        Block::default()
            .title(" Scores ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green)),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, color) = match (app.mode, &app.round) {
        (AppMode::GameOver, _) => (" Press 'n' for a new game or 'q' to quit ", Color::Green),
        (AppMode::Playing, Some(round)) => match (round.phase(), round) {
            (Phase::Playing, ActiveRound::Letters(_)) => (" Your word ", Color::Yellow),
            (Phase::Playing, ActiveRound::Numbers(_)) => (
                " Your expression (+ - * / and brackets) ",
                Color::Yellow,
            ),
            (Phase::Playing, ActiveRound::Conundrum(_)) => (" Your answer ", Color::Yellow),
            (Phase::Checking, _) => (" Checking... ", Color::Cyan),
            _ => (" Waiting ", Color::DarkGray),
        },
        (AppMode::Playing, None) => (" Waiting ", Color::DarkGray),
    };

    let input = Paragraph::new(app.input())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match (app.mode, &app.round) {
        (AppMode::GameOver, _) => "n: New Game | q: Quit",
        (AppMode::Playing, Some(round)) => match (round.phase(), round) {
            (Phase::Picking, ActiveRound::Letters(_)) => "v: Vowel | c: Consonant | q: Quit",
            (Phase::Picking, _) => "l: Large | s: Small | q: Quit",
            (Phase::Ready, _) => "Enter: Reveal | q: Quit",
            (Phase::Playing, _) => "Enter: Submit | Backspace: Delete | Esc: Quit",
            (Phase::Checking, _) => "Checking the dictionary...",
            (Phase::Result, _) => "Enter: Next Round | q: Quit",
        },
        (AppMode::Playing, None) => "q: Quit",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, RemoteFallback};
    use crate::sound::Silent;
    use crate::storage::{HighScoreStore, Settings};
    use crate::wordlists::Lexicon;
    use crate::core::Language;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app, Instant::now())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_first_round() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(
            &lexicon,
            Dictionary::new(&lexicon, RemoteFallback::Disabled),
            Settings::default(),
            HighScoreStore::new(dir.path().join("high_scores.json")),
            Box::new(Silent),
            Language::English,
        );

        let text = rendered_text(&app);
        assert!(text.contains("Round 1/7: Letters"));
        assert!(text.contains("v: Vowel"));
        assert!(text.contains("Clock stopped"));
    }
}

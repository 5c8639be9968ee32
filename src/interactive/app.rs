//! TUI application state and logic

use crate::core::{Language, TileKind};
use crate::dictionary::{Dictionary, RemoteFallback};
use crate::round::{ActiveRound, Game, GuessOutcome, Phase, Submission};
use crate::solver::find_longest_word;
use crate::sound::{SoundCue, SoundEffects};
use crate::storage::{HighScoreStore, HighScoreTable, SaveOutcome, Settings};
use crate::wordlists::Lexicon;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// How long to wait for a key before advancing the clock
const TICK_RATE: Duration = Duration::from_millis(200);

/// Application state
pub struct App<'a> {
    pub lexicon: &'a Lexicon,
    pub dictionary: Dictionary<'a, RemoteFallback>,
    pub settings: Settings,
    pub high_scores: HighScoreStore,
    pub language: Language,
    pub game: Game,
    pub round: Option<ActiveRound>,
    pub mode: AppMode,
    pub messages: Vec<Message>,
    /// Table shown on the game over screen
    pub table: HighScoreTable,
    pub last_saved: Option<SaveOutcome>,
    pub should_quit: bool,
    sounds: Box<dyn SoundEffects>,
    last_tick_secs: Option<u64>,
    rng: ThreadRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Playing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<'a> App<'a> {
    #[must_use]
    pub fn new(
        lexicon: &'a Lexicon,
        dictionary: Dictionary<'a, RemoteFallback>,
        settings: Settings,
        high_scores: HighScoreStore,
        sounds: Box<dyn SoundEffects>,
        language: Language,
    ) -> Self {
        let mut app = Self {
            lexicon,
            dictionary,
            settings,
            high_scores,
            language,
            game: Game::new(language),
            round: None,
            mode: AppMode::Playing,
            messages: Vec::new(),
            table: HighScoreTable::default(),
            last_saved: None,
            should_quit: false,
            sounds,
            last_tick_secs: None,
            rng: rand::rng(),
        };
        app.add_message(
            "Welcome to Countdown! Seven rounds, highest total wins.",
            MessageStyle::Info,
        );
        app.start_round();
        app
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 6 messages
        if self.messages.len() > 6 {
            self.messages.remove(0);
        }
    }

    /// Phase of the current round, if one is running
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.round.as_ref().map(ActiveRound::phase)
    }

    fn start_round(&mut self) {
        self.last_tick_secs = None;
        match self
            .game
            .start_round(&self.settings, self.lexicon, &mut self.rng)
        {
            Ok(round) => {
                let hint = match &round {
                    ActiveRound::Letters(_) => {
                        "Pick nine letters: 'v' for a vowel, 'c' for a consonant"
                    }
                    ActiveRound::Numbers(_) => "Pick six numbers: 'l' for large, 's' for small",
                    ActiveRound::Conundrum(_) => {
                        "Final round! Press Enter to reveal the conundrum"
                    }
                };
                self.add_message(hint, MessageStyle::Info);
                self.round = Some(round);
            }
            Err(e) => {
                self.round = None;
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    pub fn new_game(&mut self) {
        self.game = Game::new(self.language);
        self.mode = AppMode::Playing;
        self.last_saved = None;
        self.messages.clear();
        self.add_message("New game started!", MessageStyle::Info);
        self.start_round();
    }

    /// Score the finished round and set up the next one
    pub fn next_round(&mut self) {
        let Some(round) = self.round.take() else {
            return;
        };
        self.game.record(round.score());
        if self.game.is_over() {
            self.finish_game();
        } else {
            self.start_round();
        }
    }

    fn finish_game(&mut self) {
        self.sounds.play(SoundCue::GameOver);
        self.mode = AppMode::GameOver;
        let total = self.game.total_score();

        match self.high_scores.save(total, self.game.rounds_played()) {
            Ok(saved) => {
                self.last_saved = Some(saved);
                if saved.is_high_score {
                    self.add_message(
                        &format!("🏆 New high score! Rank #{}", saved.rank),
                        MessageStyle::Success,
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not save high score");
                self.add_message(&format!("Score not saved: {e}"), MessageStyle::Error);
            }
        }
        self.table = self.high_scores.load();
        self.add_message(
            &format!("Game over! Final score {total}. 'n' for a new game, 'q' to quit."),
            MessageStyle::Info,
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        if self.mode == AppMode::GameOver {
            match key.code {
                KeyCode::Char('n') => self.new_game(),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match (self.phase(), key.code) {
            // 'q' is a letter while an answer is being typed
            (Some(Phase::Picking | Phase::Ready | Phase::Result) | None, KeyCode::Char('q')) => {
                self.should_quit = true;
            }
            (Some(Phase::Playing), KeyCode::Char(c)) => self.type_char(c),
            (Some(Phase::Playing), KeyCode::Backspace) => self.backspace(),
            (Some(Phase::Playing), KeyCode::Enter) => self.submit(),
            (Some(Phase::Picking), KeyCode::Char(c)) => self.pick(c, now),
            (Some(Phase::Ready), KeyCode::Enter) => self.start_conundrum(now),
            (Some(Phase::Result), KeyCode::Enter | KeyCode::Char('n')) => self.next_round(),
            _ => {}
        }
    }

    fn pick(&mut self, c: char, now: Instant) {
        let drawn = match (&mut self.round, c.to_ascii_lowercase()) {
            (Some(ActiveRound::Letters(round)), 'v') => {
                round.draw(TileKind::Vowel, &mut self.rng, now).map(|_| ())
            }
            (Some(ActiveRound::Letters(round)), 'c') => {
                round.draw(TileKind::Consonant, &mut self.rng, now).map(|_| ())
            }
            (Some(ActiveRound::Numbers(round)), 'l') => {
                round.draw_large(&mut self.rng, now).map(|_| ())
            }
            (Some(ActiveRound::Numbers(round)), 's') => {
                round.draw_small(&mut self.rng, now).map(|_| ())
            }
            _ => return,
        };

        match drawn {
            Ok(()) if self.phase() == Some(Phase::Playing) => {
                self.sounds.play(SoundCue::Reveal);
                self.add_message("Go! Type your answer and press Enter", MessageStyle::Info);
            }
            Ok(()) => self.sounds.play(SoundCue::Click),
            Err(e) => {
                self.sounds.play(SoundCue::Error);
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    fn start_conundrum(&mut self, now: Instant) {
        if let Some(ActiveRound::Conundrum(round)) = &mut self.round
            && round.start(now).is_ok()
        {
            self.sounds.play(SoundCue::Reveal);
            self.add_message("Unscramble the nine letters!", MessageStyle::Info);
        }
    }

    fn type_char(&mut self, c: char) {
        match &mut self.round {
            Some(ActiveRound::Letters(round)) => round.push_char(c),
            Some(ActiveRound::Numbers(round)) => round.push_char(c),
            Some(ActiveRound::Conundrum(round)) => round.push_char(c),
            None => {}
        }
    }

    fn backspace(&mut self) {
        match &mut self.round {
            Some(ActiveRound::Letters(round)) => round.pop_char(),
            Some(ActiveRound::Numbers(round)) => round.pop_char(),
            Some(ActiveRound::Conundrum(round)) => round.pop_char(),
            None => {}
        }
    }

    /// The text being typed in the current round
    #[must_use]
    pub fn input(&self) -> &str {
        match &self.round {
            Some(ActiveRound::Letters(round)) => round.input(),
            Some(ActiveRound::Numbers(round)) => round.input(),
            Some(ActiveRound::Conundrum(round)) => round.input(),
            None => "",
        }
    }

    fn submit(&mut self) {
        match &mut self.round {
            Some(ActiveRound::Letters(round)) => match round.submit() {
                Ok(Submission::Checking(word)) => {
                    self.add_message(&format!("Checking {word}..."), MessageStyle::Info);
                }
                Ok(Submission::Finished(_)) => self.announce_result(),
                Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
            },
            Some(ActiveRound::Numbers(round)) => match round.submit().map(|_| ()) {
                Ok(()) => self.announce_result(),
                Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
            },
            Some(ActiveRound::Conundrum(round)) => match round.guess() {
                Ok(GuessOutcome::Correct) => self.announce_result(),
                Ok(GuessOutcome::Incorrect) => {
                    self.sounds.play(SoundCue::Error);
                    self.add_message("Not quite, try again", MessageStyle::Error);
                }
                Ok(GuessOutcome::Empty) => {}
                Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
            },
            None => {}
        }
    }

    /// Whether a typed word is waiting on the dictionary
    #[must_use]
    pub fn needs_lookup(&self) -> bool {
        self.phase() == Some(Phase::Checking)
    }

    /// Run the pending dictionary lookup and score the word
    pub async fn resolve_lookup(&mut self) {
        let language = self.language;
        if let Some(ActiveRound::Letters(round)) = &mut self.round
            && round.phase() == Phase::Checking
        {
            if let Err(e) = round.check_word(&self.dictionary, language).await {
                tracing::warn!(error = %e, "lookup finished outside checking");
            }
            self.announce_result();
        }
    }

    /// Advance the clock: tick sounds, and auto-submit on expiry
    pub fn tick(&mut self, now: Instant) {
        let Some(round) = &mut self.round else {
            return;
        };

        if let Some(countdown) = round.countdown() {
            let secs = countdown.remaining_secs(now);
            if self.last_tick_secs != Some(secs) {
                self.last_tick_secs = Some(secs);
                if secs > 0 {
                    self.sounds.play(SoundCue::tick_for(secs));
                }
            }
        }

        let expired = match round {
            ActiveRound::Letters(round) => match round.tick(now) {
                Some(Submission::Finished(_)) => Some(true),
                Some(Submission::Checking(_)) => Some(false),
                None => None,
            },
            ActiveRound::Numbers(round) => round.tick(now).map(|_| true),
            ActiveRound::Conundrum(round) => round.tick(now).then_some(true),
        };

        if let Some(finished) = expired {
            self.sounds.play(SoundCue::TimeUp);
            self.add_message("⏰ Time's up!", MessageStyle::Error);
            if finished {
                self.announce_result();
            }
        }
    }

    fn announce_result(&mut self) {
        let (score, summary, hint) = match &self.round {
            Some(ActiveRound::Letters(round)) => (
                round.score(),
                round.outcome().map(ToString::to_string),
                find_longest_word(self.lexicon, round.rack().letters(), self.language)
                    .map(|word| format!("Longest possible: {word}")),
            ),
            Some(ActiveRound::Numbers(round)) => (
                round.score(),
                round.outcome().map(ToString::to_string),
                round
                    .target()
                    .map(|target| format!("One solution: {}", target.solution)),
            ),
            Some(ActiveRound::Conundrum(round)) => (
                round.score(),
                round.is_solved().then(|| "Correct! +10 points".to_string()),
                Some(format!("The answer was {}", round.puzzle().answer())),
            ),
            None => return,
        };

        if let Some(summary) = summary {
            if score > 0 {
                self.sounds.play(SoundCue::Success);
                self.add_message(&summary, MessageStyle::Success);
            } else {
                self.sounds.play(SoundCue::Error);
                self.add_message(&summary, MessageStyle::Error);
            }
        }
        if let Some(hint) = hint {
            self.add_message(&hint, MessageStyle::Info);
        }
        self.add_message("Press Enter for the next round", MessageStyle::Info);
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App, runtime: &Runtime) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: &Runtime,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app, Instant::now()))?;

        // Only process key press events (fixes Windows double-input bug)
        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }
        app.tick(Instant::now());

        if app.needs_lookup() {
            // Show the checking state while the lookup runs
            terminal.draw(|f| super::rendering::ui(f, &app, Instant::now()))?;
            runtime.block_on(app.resolve_lookup());
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::RoundKind;
    use crate::sound::Silent;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn new_app<'a>(lexicon: &'a Lexicon, dir: &std::path::Path) -> App<'a> {
        App::new(
            lexicon,
            Dictionary::new(lexicon, RemoteFallback::Disabled),
            Settings::default(),
            HighScoreStore::new(dir.join("high_scores.json")),
            Box::new(Silent),
            Language::English,
        )
    }

    fn fill_letters(app: &mut App, now: Instant) {
        for c in "vvvcccccc".chars() {
            app.handle_key(key(c), now);
        }
    }

    fn fill_numbers(app: &mut App, now: Instant) {
        for c in "lsssss".chars() {
            app.handle_key(key(c), now);
        }
    }

    /// Play the current round to its end by letting the clock run out
    fn expire_round(app: &mut App, now: Instant) {
        match app.round.as_ref().map(ActiveRound::kind) {
            Some(RoundKind::Letters) => fill_letters(app, now),
            Some(RoundKind::Numbers) => fill_numbers(app, now),
            Some(RoundKind::Conundrum) => app.handle_key(enter(), now),
            None => return,
        }
        app.tick(now + Duration::from_secs(301));
    }

    #[test]
    fn starts_with_letters_picking() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let app = new_app(&lexicon, dir.path());

        assert_eq!(app.mode, AppMode::Playing);
        assert_eq!(app.phase(), Some(Phase::Picking));
        assert_eq!(
            app.round.as_ref().map(ActiveRound::kind),
            Some(RoundKind::Letters)
        );
    }

    #[test]
    fn full_rack_starts_clock() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();

        fill_letters(&mut app, now);
        assert_eq!(app.phase(), Some(Phase::Playing));
        let countdown = app.round.as_ref().and_then(ActiveRound::countdown).unwrap();
        assert_eq!(countdown.remaining_secs(now), 30);
    }

    #[test]
    fn typing_edits_input() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();
        fill_letters(&mut app, now);

        for c in "abc".chars() {
            app.handle_key(key(c), now);
        }
        app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), now);
        assert_eq!(app.input(), "ab");
        // 'q' is a letter while typing
        app.handle_key(key('q'), now);
        assert!(!app.should_quit);
    }

    #[test]
    fn unavailable_word_ends_round() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();
        fill_letters(&mut app, now);

        // Ten letters never fit on a nine-letter rack
        for c in "zzzzzzzzzz".chars() {
            app.handle_key(key(c), now);
        }
        app.handle_key(enter(), now);
        assert_eq!(app.phase(), Some(Phase::Result));
        assert_eq!(app.round.as_ref().map(ActiveRound::score), Some(0));

        app.handle_key(enter(), now);
        assert_eq!(app.game.scores(), &[0]);
        assert_eq!(
            app.round.as_ref().map(ActiveRound::kind),
            Some(RoundKind::Numbers)
        );
    }

    #[tokio::test]
    async fn formable_word_goes_through_lookup() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();
        fill_letters(&mut app, now);

        let first = match &app.round {
            Some(ActiveRound::Letters(round)) => round.rack().letters()[0],
            _ => unreachable!(),
        };
        app.handle_key(key(first), now);
        app.handle_key(enter(), now);
        assert!(app.needs_lookup());

        // Keys are ignored while checking
        app.handle_key(enter(), now);
        assert!(app.needs_lookup());

        app.resolve_lookup().await;
        assert_eq!(app.phase(), Some(Phase::Result));
    }

    #[test]
    fn expiry_submits_numbers_round() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();
        expire_round(&mut app, now);
        app.handle_key(enter(), now);

        fill_numbers(&mut app, now);
        assert_eq!(app.phase(), Some(Phase::Playing));
        app.tick(now + Duration::from_secs(10));
        assert_eq!(app.phase(), Some(Phase::Playing));
        app.tick(now + Duration::from_secs(31));
        assert_eq!(app.phase(), Some(Phase::Result));
    }

    #[test]
    fn seven_rounds_end_the_game() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(&lexicon, dir.path());
        let now = Instant::now();

        while app.mode == AppMode::Playing {
            expire_round(&mut app, now);
            assert_eq!(app.phase(), Some(Phase::Result));
            app.handle_key(enter(), now);
        }

        assert_eq!(app.game.scores().len(), 7);
        assert_eq!(app.last_saved.map(|s| s.rank), Some(1));
        assert_eq!(app.table.len(), 1);

        app.handle_key(key('n'), now);
        assert_eq!(app.mode, AppMode::Playing);
        assert!(app.game.scores().is_empty());
    }

    #[test]
    fn quit_keys() {
        let lexicon = Lexicon::embedded();
        let dir = tempfile::tempdir().unwrap();
        let now = Instant::now();

        let mut app = new_app(&lexicon, dir.path());
        app.handle_key(key('q'), now);
        assert!(app.should_quit);

        let mut app = new_app(&lexicon, dir.path());
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), now);
        assert!(app.should_quit);

        let mut app = new_app(&lexicon, dir.path());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
        assert!(app.should_quit);
    }
}

//! Letters round

use super::{Countdown, Phase, RoundError, expect_phase};
use crate::core::{Language, LetterRack, TileKind, letters_score};
use crate::dictionary::{Dictionary, RemoteDictionary};
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

/// How a Letters round ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LettersOutcome {
    Accepted { word: String, score: u32 },
    /// Nothing was entered
    Empty,
    /// The word uses letters that are not on the rack
    UnavailableLetters { word: String },
    /// The dictionary does not know the word
    NotAWord { word: String },
}

impl LettersOutcome {
    #[must_use]
    pub const fn score(&self) -> u32 {
        match self {
            Self::Accepted { score, .. } => *score,
            _ => 0,
        }
    }
}

impl fmt::Display for LettersOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted { word, score } => write!(f, "Great word! {word} scores +{score} points"),
            Self::Empty => write!(f, "No word submitted"),
            Self::UnavailableLetters { word } => {
                write!(f, "{word}: you can only use the available letters!")
            }
            Self::NotAWord { word } => write!(f, "{word}: that's not a valid word!"),
        }
    }
}

/// Result of submitting a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Passed the rack check; the word must now be looked up
    Checking(String),
    /// Scored without a lookup
    Finished(LettersOutcome),
}

#[derive(Debug, Clone)]
pub struct LettersRound {
    rack: LetterRack,
    phase: Phase,
    duration: Duration,
    countdown: Option<Countdown>,
    input: String,
    pending: Option<String>,
    outcome: Option<LettersOutcome>,
}

impl LettersRound {
    /// A round with an empty rack and the given answer time
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            rack: LetterRack::new(),
            phase: Phase::Picking,
            duration,
            countdown: None,
            input: String::new(),
            pending: None,
            outcome: None,
        }
    }

    /// Draw one tile; the ninth tile starts the clock
    ///
    /// # Errors
    /// Fails outside `Picking` or when the rack refuses the tile.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        kind: TileKind,
        rng: &mut R,
        now: Instant,
    ) -> Result<char, RoundError> {
        expect_phase(self.phase, Phase::Picking)?;
        let letter = self.rack.draw(kind, rng)?;
        if self.rack.is_complete() {
            self.phase = Phase::Playing;
            self.countdown = Some(Countdown::start(self.duration, now));
        }
        Ok(letter)
    }

    /// Replace the word being typed; ignored outside `Playing`
    pub fn set_input(&mut self, input: &str) {
        if self.phase == Phase::Playing {
            self.input = input.to_string();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.phase == Phase::Playing && c.is_alphabetic() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.phase == Phase::Playing {
            self.input.pop();
        }
    }

    /// Submit the typed word and stop the clock
    ///
    /// Empty input and words the rack cannot spell end the round at once.
    /// Anything else moves to `Checking` until [`Self::complete_lookup`].
    ///
    /// # Errors
    /// Fails outside `Playing`.
    pub fn submit(&mut self) -> Result<Submission, RoundError> {
        expect_phase(self.phase, Phase::Playing)?;
        self.countdown = None;

        let word = self.input.trim().to_uppercase();
        if word.is_empty() {
            return Ok(Submission::Finished(self.finish(LettersOutcome::Empty).clone()));
        }
        if !self.rack.can_form(&word) {
            let outcome = LettersOutcome::UnavailableLetters { word };
            return Ok(Submission::Finished(self.finish(outcome).clone()));
        }

        self.phase = Phase::Checking;
        self.pending = Some(word.clone());
        Ok(Submission::Checking(word))
    }

    /// Score the pending word once its lookup has finished
    ///
    /// # Errors
    /// Fails outside `Checking`.
    pub fn complete_lookup(&mut self, valid: bool) -> Result<&LettersOutcome, RoundError> {
        expect_phase(self.phase, Phase::Checking)?;
        let word = self.pending.take().unwrap_or_default();
        let outcome = if valid {
            let score = letters_score(&word);
            LettersOutcome::Accepted { word, score }
        } else {
            LettersOutcome::NotAWord { word }
        };
        Ok(self.finish(outcome))
    }

    /// Look up the pending word and score it
    ///
    /// # Errors
    /// Fails outside `Checking`.
    pub async fn check_word<R: RemoteDictionary>(
        &mut self,
        dictionary: &Dictionary<'_, R>,
        language: Language,
    ) -> Result<&LettersOutcome, RoundError> {
        expect_phase(self.phase, Phase::Checking)?;
        let word = self.pending.clone().unwrap_or_default();
        let valid = dictionary.is_valid_word(&word, language).await;
        self.complete_lookup(valid)
    }

    /// Submit automatically once the clock runs out
    ///
    /// Returns `None` while the clock is still running or when no clock is
    /// set, which is every phase except `Playing`.
    pub fn tick(&mut self, now: Instant) -> Option<Submission> {
        let expired = self.countdown.is_some_and(|c| c.is_expired(now));
        if expired {
            tracing::debug!("letters clock expired");
            self.submit().ok()
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: LettersOutcome) -> &LettersOutcome {
        self.phase = Phase::Result;
        self.countdown = None;
        self.outcome.insert(outcome)
    }

    #[inline]
    #[must_use]
    pub const fn rack(&self) -> &LetterRack {
        &self.rack
    }

    #[inline]
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    #[must_use]
    pub const fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The word awaiting a dictionary lookup
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Option<&LettersOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.outcome.as_ref().map_or(0, LettersOutcome::score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LETTER_RACK_SIZE;
    use crate::dictionary::LookupError;
    use crate::wordlists::{Lexicon, WordList};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::future::Future;

    const THIRTY: Duration = Duration::from_secs(30);

    struct NoRemote;

    impl RemoteDictionary for NoRemote {
        fn lookup(
            &self,
            _word: &str,
            _language: Language,
        ) -> impl Future<Output = Result<bool, LookupError>> + Send {
            async { Err(LookupError::Disabled) }
        }
    }

    /// Fill a round with four vowels then five consonants
    fn playing_round(now: Instant) -> LettersRound {
        let mut rng = StdRng::seed_from_u64(21);
        let mut round = LettersRound::new(THIRTY);
        for i in 0..LETTER_RACK_SIZE {
            let kind = if i < 4 { TileKind::Vowel } else { TileKind::Consonant };
            round.draw(kind, &mut rng, now).unwrap();
        }
        round
    }

    /// Any word the rack can spell: its first letter
    fn formable(round: &LettersRound) -> String {
        round.rack().letters()[0].to_string()
    }

    #[test]
    fn full_rack_starts_clock() {
        let now = Instant::now();
        let mut rng = StdRng::seed_from_u64(1);
        let mut round = LettersRound::new(THIRTY);

        round.draw(TileKind::Vowel, &mut rng, now).unwrap();
        assert_eq!(round.phase(), Phase::Picking);
        assert!(round.countdown().is_none());

        let round = playing_round(now);
        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.countdown().map(Countdown::duration), Some(THIRTY));
    }

    #[test]
    fn quota_error_surfaces() {
        let now = Instant::now();
        let mut rng = StdRng::seed_from_u64(4);
        let mut round = LettersRound::new(THIRTY);
        for _ in 0..6 {
            round.draw(TileKind::Consonant, &mut rng, now).unwrap();
        }
        assert!(matches!(
            round.draw(TileKind::Consonant, &mut rng, now),
            Err(RoundError::Rack(_))
        ));
    }

    #[test]
    fn empty_submission_scores_zero() {
        let mut round = playing_round(Instant::now());
        let submission = round.submit().unwrap();

        assert_eq!(submission, Submission::Finished(LettersOutcome::Empty));
        assert_eq!(round.phase(), Phase::Result);
        assert!(round.countdown().is_none());
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn unavailable_letters_rejected_without_lookup() {
        let mut round = playing_round(Instant::now());
        // Ten copies of one letter can never fit a nine-tile rack
        round.set_input(&"Q".repeat(10));

        let submission = round.submit().unwrap();
        assert!(matches!(
            submission,
            Submission::Finished(LettersOutcome::UnavailableLetters { .. })
        ));
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn valid_word_goes_through_checking() {
        let mut round = playing_round(Instant::now());
        let word = formable(&round);
        round.set_input(&word.to_lowercase());

        assert_eq!(round.submit().unwrap(), Submission::Checking(word.clone()));
        assert_eq!(round.phase(), Phase::Checking);
        assert_eq!(round.pending(), Some(word.as_str()));
        assert!(round.submit().is_err());

        let outcome = round.complete_lookup(true).unwrap().clone();
        assert_eq!(outcome, LettersOutcome::Accepted { word, score: 1 });
        assert_eq!(round.phase(), Phase::Result);
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn failed_lookup_scores_zero() {
        let mut round = playing_round(Instant::now());
        round.set_input(&formable(&round));
        round.submit().unwrap();

        let outcome = round.complete_lookup(false).unwrap();
        assert!(matches!(outcome, LettersOutcome::NotAWord { .. }));
        assert_eq!(round.score(), 0);
    }

    #[tokio::test]
    async fn scores_ready_from_rack() {
        let lexicon = Lexicon::new(
            WordList::new(Language::English, ["ready"], Vec::<&str>::new()),
            WordList::default(),
        );
        let dictionary = Dictionary::new(&lexicon, NoRemote);
        let mut round = LettersRound {
            rack: LetterRack::from_letters("READYXJQZ".chars()).unwrap(),
            phase: Phase::Playing,
            duration: THIRTY,
            countdown: Some(Countdown::start(THIRTY, Instant::now())),
            input: String::new(),
            pending: None,
            outcome: None,
        };
        round.set_input("ready");
        round.submit().unwrap();

        let outcome = round
            .check_word(&dictionary, Language::English)
            .await
            .unwrap();
        assert_eq!(
            *outcome,
            LettersOutcome::Accepted {
                word: "READY".to_string(),
                score: 5
            }
        );
    }

    #[test]
    fn expiry_auto_submits_once() {
        let start = Instant::now();
        let mut round = playing_round(start);
        round.set_input(&formable(&round));

        assert!(round.tick(start + Duration::from_secs(10)).is_none());
        let submission = round.tick(start + THIRTY);
        assert!(matches!(submission, Some(Submission::Checking(_))));

        // Clock is gone once the round leaves Playing
        assert!(round.countdown().is_none());
        assert!(round.tick(start + Duration::from_secs(60)).is_none());
        assert_eq!(round.phase(), Phase::Checking);
    }

    #[test]
    fn tick_without_clock_is_noop() {
        let mut round = LettersRound::new(THIRTY);
        assert!(round.tick(Instant::now() + THIRTY).is_none());
        assert_eq!(round.phase(), Phase::Picking);
    }

    #[test]
    fn input_ignored_outside_playing() {
        let mut round = LettersRound::new(THIRTY);
        round.set_input("early");
        round.push_char('x');
        assert_eq!(round.input(), "");
    }
}

//! Formatting utilities for terminal output

/// Letters as tiles, padding unfilled slots with blanks
///
/// # Examples
/// ```
/// use countdown::output::formatters::letter_tiles;
///
/// assert_eq!(letter_tiles(&['R', 'E'], 4), "[R] [E] [ ] [ ]");
/// ```
#[must_use]
pub fn letter_tiles(letters: &[char], slots: usize) -> String {
    let blanks = slots.saturating_sub(letters.len());
    letters
        .iter()
        .map(|c| format!("[{c}]"))
        .chain(std::iter::repeat_n("[ ]".to_string(), blanks))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbers as tiles, padding unfilled slots with blanks
#[must_use]
pub fn number_tiles(numbers: &[u32], slots: usize) -> String {
    let blanks = slots.saturating_sub(numbers.len());
    numbers
        .iter()
        .map(|n| format!("[{n:>3}]"))
        .chain(std::iter::repeat_n("[   ]".to_string(), blanks))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max).max(0.0) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar for the fraction of answer time left
#[must_use]
pub fn countdown_bar(fraction_remaining: f64, width: usize) -> String {
    create_progress_bar(fraction_remaining, 1.0, width)
}

/// Seconds as `m:ss`
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_tiles_full_rack() {
        let letters: Vec<char> = "READYXJQZ".chars().collect();
        assert_eq!(
            letter_tiles(&letters, 9),
            "[R] [E] [A] [D] [Y] [X] [J] [Q] [Z]"
        );
    }

    #[test]
    fn letter_tiles_empty_rack() {
        assert_eq!(letter_tiles(&[], 2), "[ ] [ ]");
    }

    #[test]
    fn number_tiles_pad_to_width() {
        assert_eq!(number_tiles(&[100, 7], 3), "[100] [  7] [   ]");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn countdown_bar_clamps() {
        assert_eq!(countdown_bar(1.5, 4), "████");
        assert_eq!(countdown_bar(-0.5, 4), "░░░░");
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(30), "0:30");
        assert_eq!(format_clock(300), "5:00");
        assert_eq!(format_clock(9), "0:09");
    }
}

//! Keystroke quiescence detection for the search box.
//!
//! Every keystroke rewrites the pending text and restarts the window; the
//! debouncer emits only once input has been quiet for [`DEBOUNCE_MS`]. Time
//! is injected through the `now` parameters so tests control the clock.

use std::time::{Duration, Instant};

use crate::filter::normalize;

/// Quiet period after the last keystroke before a query is emitted.
pub const DEBOUNCE_MS: u64 = 300;

/// Distinct-until-changed debouncer over raw search input.
///
/// Emissions are normalized (see [`normalize`]); two raw inputs that
/// normalize to the same string produce one emission. The caller is expected
/// to invoke [`poll`](SearchDebouncer::poll) once per frame.
#[derive(Debug)]
pub struct SearchDebouncer {
    /// Raw text of the most recent keystroke and when it landed.
    pending: Option<(String, Instant)>,
    last_emitted: Option<String>,
    window: Duration,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self {
            pending: None,
            last_emitted: None,
            window: Duration::from_millis(DEBOUNCE_MS),
        }
    }

    /// Record a keystroke, replacing any pending text and restarting the
    /// quiet window.
    pub fn keystroke(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now));
    }

    /// Emit the pending query if the window has elapsed.
    ///
    /// Returns the normalized query, or `None` when nothing is pending, the
    /// window is still open, or the normalized value equals the previous
    /// emission. A suppressed duplicate still clears the pending slot.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = match &self.pending {
            Some((_, at)) => *at + self.window,
            None => return None,
        };
        if now < deadline {
            return None;
        }

        let (raw, _) = self.pending.take()?;
        let query = normalize(&raw);
        if self.last_emitted.as_deref() == Some(query.as_str()) {
            return None;
        }
        self.last_emitted = Some(query.clone());
        Some(query)
    }

    /// Whether a keystroke is waiting for its window to close.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_rapid_keystrokes_emit_once_after_quiet() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new();

        debouncer.keystroke("pik", start);
        debouncer.keystroke("pika", start + ms(30));
        debouncer.keystroke("Pikachu", start + ms(50));

        // Still inside the window of the last keystroke.
        assert_eq!(debouncer.poll(start + ms(340)), None);
        assert!(debouncer.is_pending());

        // 300ms after the last keystroke: exactly one emission, normalized.
        assert_eq!(
            debouncer.poll(start + ms(350)),
            Some("pikachu".to_string())
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + ms(400)), None);
    }

    #[test]
    fn test_each_keystroke_restarts_the_window() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new();

        debouncer.keystroke("m", start);
        assert_eq!(debouncer.poll(start + ms(299)), None);
        debouncer.keystroke("me", start + ms(299));

        // The first keystroke's deadline has passed, but the window was
        // restarted at 299ms.
        assert_eq!(debouncer.poll(start + ms(400)), None);
        assert_eq!(debouncer.poll(start + ms(599)), Some("me".to_string()));
    }

    #[test]
    fn test_duplicate_normalized_value_is_suppressed() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new();

        debouncer.keystroke("Mew", start);
        assert_eq!(debouncer.poll(start + ms(300)), Some("mew".to_string()));

        // Different raw text, same normalized value: no second emission.
        debouncer.keystroke("MEW", start + ms(500));
        assert_eq!(debouncer.poll(start + ms(800)), None);
        assert!(!debouncer.is_pending());

        // A genuinely new value still goes through.
        debouncer.keystroke("mewtwo", start + ms(900));
        assert_eq!(debouncer.poll(start + ms(1200)), Some("mewtwo".to_string()));
    }

    #[test]
    fn test_clearing_the_box_emits_empty_once() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new();

        debouncer.keystroke("ditto", start);
        assert_eq!(debouncer.poll(start + ms(300)), Some("ditto".to_string()));

        debouncer.keystroke("", start + ms(400));
        assert_eq!(debouncer.poll(start + ms(700)), Some(String::new()));

        debouncer.keystroke("", start + ms(800));
        assert_eq!(debouncer.poll(start + ms(1100)), None);
    }

    #[test]
    fn test_poll_without_keystroke_is_silent() {
        let mut debouncer = SearchDebouncer::new();
        assert_eq!(debouncer.poll(Instant::now()), None);
    }
}

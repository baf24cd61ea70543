#![forbid(unsafe_code)]

//! Incremental type-ahead search over item labels.
//!
//! Characters typed in quick succession build up a prefix; the first item
//! at or after the lead whose label starts with it (ignoring case) becomes
//! the target. Typing the same character repeatedly cycles through the items
//! starting with it. After [`TypeAheadConfig::period`] of idle time the
//! buffer starts over; hosts with a timer may call [`TypeAhead::reset`]
//! instead.

use std::time::Duration;

use web_time::Instant;

use crate::list::ListModel;

/// Idle period used when nothing else is configured.
pub const DEFAULT_TYPE_AHEAD_PERIOD: Duration = Duration::from_millis(1000);

/// Type-ahead tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeAheadConfig {
    /// Keys typed less than this apart extend the current prefix.
    pub period: Duration,
}

impl Default for TypeAheadConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_TYPE_AHEAD_PERIOD,
        }
    }
}

impl TypeAheadConfig {
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Defaults overridden by `LNF_TYPE_AHEAD_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("LNF_TYPE_AHEAD_MS")
            && let Ok(ms) = value.trim().parse::<u64>()
        {
            config.period = Duration::from_millis(ms);
        }
        config
    }
}

/// Type-ahead state for one list.
#[derive(Debug, Clone, Default)]
pub struct TypeAhead {
    config: TypeAheadConfig,
    typed: String,
    prefix: String,
    last_key: Option<Instant>,
}

impl TypeAhead {
    pub fn new(config: TypeAheadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TypeAheadConfig {
        &self.config
    }

    /// The prefix currently being matched.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Forget the typed characters.
    pub fn reset(&mut self) {
        self.typed.clear();
        self.prefix.clear();
        self.last_key = None;
    }

    /// Feed a typed character at `now`; returns the matching index.
    ///
    /// Only indices accepted by `choosable` can match.
    pub fn on_char<M, F>(
        &mut self,
        ch: char,
        lead: Option<usize>,
        model: &M,
        now: Instant,
        choosable: F,
    ) -> Option<usize>
    where
        M: ListModel + ?Sized,
        F: Fn(usize) -> bool,
    {
        if ch.is_control() {
            return None;
        }
        let len = model.len();
        if len == 0 {
            return None;
        }

        let within_period = self
            .last_key
            .is_some_and(|last| now.saturating_duration_since(last) < self.config.period);
        let mut start = lead.unwrap_or(0);
        if within_period {
            self.typed.push(ch);
            let mut prefix_chars = self.prefix.chars();
            if let (Some(only), None) = (prefix_chars.next(), prefix_chars.next())
                && only == ch
            {
                start += 1;
            } else {
                self.prefix.clone_from(&self.typed);
            }
        } else {
            if lead.is_some() {
                start += 1;
            }
            self.typed.clear();
            self.typed.push(ch);
            self.prefix.clone_from(&self.typed);
        }
        self.last_key = Some(now);

        if start >= len {
            start = 0;
        }
        let found = next_match(model, &self.prefix, start, choosable);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "type_ahead.match",
            prefix = %self.prefix,
            start,
            found = ?found
        );

        found
    }
}

/// First index accepted by `choosable`, at or after `start` (wrapping), whose
/// label starts with `prefix`, ignoring case.
pub fn next_match<M, F>(model: &M, prefix: &str, start: usize, choosable: F) -> Option<usize>
where
    M: ListModel + ?Sized,
    F: Fn(usize) -> bool,
{
    let len = model.len();
    if len == 0 {
        return None;
    }
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&index| {
            choosable(index)
                && model
                    .label(index)
                    .is_some_and(|label| starts_with_ignore_case(&label, prefix))
        })
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text.next() == Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUIT: [&str; 6] = ["apple", "Banana", "blueberry", "cherry", "avocado", "beet"];

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn any(_index: usize) -> bool {
        true
    }

    #[test]
    fn prefix_matching_ignores_case() {
        assert!(starts_with_ignore_case("Banana", "ba"));
        assert!(starts_with_ignore_case("banana", "BAN"));
        assert!(!starts_with_ignore_case("ba", "ban"));
        assert!(starts_with_ignore_case("anything", ""));
    }

    #[test]
    fn next_match_wraps() {
        assert_eq!(next_match(&FRUIT[..], "a", 1, any), Some(4));
        assert_eq!(next_match(&FRUIT[..], "a", 5, any), Some(0));
        assert_eq!(next_match(&FRUIT[..], "z", 0, any), None);
    }

    #[test]
    fn next_match_skips_rejected_indices() {
        let not_banana = |index: usize| index != 1;
        assert_eq!(next_match(&FRUIT[..], "b", 0, not_banana), Some(2));
        assert_eq!(next_match(&FRUIT[..], "ban", 0, not_banana), None);
        assert_eq!(next_match(&FRUIT[..], "ban", 0, any), Some(1));
    }

    #[test]
    fn quick_keys_extend_the_prefix() {
        let base = Instant::now();
        let mut search = TypeAhead::default();
        assert_eq!(search.on_char('b', None, &FRUIT[..], at(base, 0), any), Some(1));
        assert_eq!(search.on_char('l', Some(1), &FRUIT[..], at(base, 100), any), Some(2));
        assert_eq!(search.prefix(), "bl");
    }

    #[test]
    fn repeated_char_cycles() {
        let base = Instant::now();
        let mut search = TypeAhead::default();
        assert_eq!(search.on_char('b', Some(0), &FRUIT[..], at(base, 0), any), Some(1));
        assert_eq!(search.on_char('b', Some(1), &FRUIT[..], at(base, 50), any), Some(2));
        assert_eq!(search.on_char('b', Some(2), &FRUIT[..], at(base, 100), any), Some(5));
        assert_eq!(search.on_char('b', Some(5), &FRUIT[..], at(base, 150), any), Some(1));
        assert_eq!(search.prefix(), "b");
    }

    #[test]
    fn cycling_skips_rejected_indices() {
        let base = Instant::now();
        let mut search = TypeAhead::default();
        let not_blueberry = |index: usize| index != 2;
        assert_eq!(search.on_char('b', Some(0), &FRUIT[..], at(base, 0), not_blueberry), Some(1));
        assert_eq!(search.on_char('b', Some(1), &FRUIT[..], at(base, 50), not_blueberry), Some(5));
    }

    #[test]
    fn idle_period_restarts_after_the_lead() {
        let base = Instant::now();
        let config = TypeAheadConfig::default().with_period(Duration::from_millis(500));
        let mut search = TypeAhead::new(config);
        assert_eq!(search.on_char('b', Some(0), &FRUIT[..], at(base, 0), any), Some(1));
        assert_eq!(search.on_char('a', Some(1), &FRUIT[..], at(base, 900), any), Some(4));
        assert_eq!(search.prefix(), "a");
    }

    #[test]
    fn reset_forgets_the_buffer() {
        let base = Instant::now();
        let mut search = TypeAhead::default();
        search.on_char('b', None, &FRUIT[..], base, any);
        search.reset();
        assert_eq!(search.prefix(), "");
        assert_eq!(search.on_char('c', Some(1), &FRUIT[..], at(base, 10), any), Some(3));
    }

    #[test]
    fn control_characters_and_empty_models_do_nothing() {
        let mut search = TypeAhead::default();
        let empty: [&str; 0] = [];
        assert_eq!(search.on_char('\n', None, &FRUIT[..], Instant::now(), any), None);
        assert_eq!(search.on_char('a', None, &empty[..], Instant::now(), any), None);
    }
}

//! Touch classification for note cards.

use std::time::{Duration, Instant};

/// Holding a card at least this long counts as a long-press.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    LongPress,
}

/// Classify a touch from its down/up instants on the same card. An `up`
/// that precedes `down` is treated as a zero-length hold.
pub fn classify_gesture(down: Instant, up: Instant) -> Gesture {
    classify_hold(up.saturating_duration_since(down))
}

pub fn classify_hold(held: Duration) -> Gesture {
    if held >= LONG_PRESS_THRESHOLD {
        Gesture::LongPress
    } else {
        Gesture::Tap
    }
}

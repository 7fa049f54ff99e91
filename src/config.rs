//! Playback timing configuration.

/// Default dot duration in milliseconds.
pub const DEFAULT_DOT_MS: u32 = 60;

/// Playback timing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Dot duration in milliseconds. Every element and gap length is
    /// an integer multiple of it.
    pub dot_ms: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            dot_ms: DEFAULT_DOT_MS,
        }
    }
}

impl PlayerConfig {
    /// Create config with an explicit dot duration.
    pub fn with_dot_ms(dot_ms: u32) -> Self {
        Self {
            dot_ms: dot_ms.max(1), // Avoid div by zero
        }
    }

    /// Create config for a given speed in words per minute.
    ///
    /// PARIS timing: dot = 1.2 / WPM seconds
    pub fn with_wpm(wpm: u32) -> Self {
        Self::with_dot_ms(1_200 / wpm.max(1))
    }
}

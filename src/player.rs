//! Double-buffered Morse playback scheduler.
//!
//! Pure logic, no hardware dependencies. Consumes elapsed-time deltas,
//! produces a boolean keying signal through a caller-supplied sink.
//! Fully testable on host.
//!
//! # Architecture
//!
//! Two fixed buffers exchange live/next roles. A new message is staged
//! into the next buffer while the live one keeps playing; the swap at
//! message end is a role exchange, never a byte copy. The read-head is
//! accumulated elapsed time divided by the dot duration, so every
//! update does a bounded, constant amount of work and never blocks.

use crate::buffer::{MorseBuffer, DEFAULT_BUFFER_LEN};
use crate::config::PlayerConfig;
use crate::encoder::encode_into;
use crate::error::EncodeError;

/// Boolean keying output sink.
///
/// Invoked exactly once per [`MorsePlayer::update`] call while a
/// message is live or staged. The value is a level for the current
/// dot duration; hardware timing within a tick is the caller's
/// responsibility.
pub trait KeySink {
    /// Set the key line on or off.
    fn signal(&mut self, on: bool);
}

/// Any `FnMut(bool)` closure is a sink.
impl<F: FnMut(bool)> KeySink for F {
    #[inline]
    fn signal(&mut self, on: bool) {
        self(on)
    }
}

/// Double-buffered playback scheduler.
///
/// # Example
///
/// ```
/// use rust_morse_beacon::config::PlayerConfig;
/// use rust_morse_beacon::player::MorsePlayer;
///
/// let mut player: MorsePlayer = MorsePlayer::new(PlayerConfig::default());
/// player.set_message("CQ CQ", true).unwrap();
///
/// let mut key = |on: bool| { /* drive LED or TX line */ };
/// loop {
///     player.update(10, &mut key);
///     # break;
///     // sleep one tick...
/// }
/// ```
pub struct MorsePlayer<const N: usize = DEFAULT_BUFFER_LEN> {
    buffers: [MorseBuffer<N>; 2],
    /// Index of the live buffer; `1 - live` is the staged one.
    live: usize,
    /// Repeat flag of the live message.
    repeat: bool,
    /// Repeat flag the staged message carries into the swap.
    repeat_next: bool,
    /// Milliseconds since the live read-head was last reset.
    elapsed_ms: u32,
    config: PlayerConfig,
}

impl<const N: usize> MorsePlayer<N> {
    /// Create an idle player.
    ///
    /// Both buffers are allocated here, once, and reused for the
    /// player's lifetime. `const` so a player can live in a `static`.
    pub const fn new(config: PlayerConfig) -> Self {
        Self {
            buffers: [MorseBuffer::new(), MorseBuffer::new()],
            live: 0,
            repeat: false,
            repeat_next: false,
            elapsed_ms: 0,
            config,
        }
    }

    /// Update configuration (e.g., change speed).
    ///
    /// Takes effect from the next update call.
    pub fn set_config(&mut self, config: PlayerConfig) {
        self.config = config;
    }

    /// Get current configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Dot duration in milliseconds.
    #[inline]
    pub fn dot_ms(&self) -> u32 {
        self.config.dot_ms
    }

    /// Check if no message is live or staged.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.buffers[0].is_empty() && self.buffers[1].is_empty()
    }

    /// Length of one pass of the live message in milliseconds.
    #[inline]
    pub fn message_duration_ms(&self) -> u32 {
        self.live().bit_len().saturating_mul(self.config.dot_ms)
    }

    /// Stage a message to play after the current one completes, or
    /// immediately if nothing is live.
    ///
    /// Encodes into the next-role buffer; the live buffer is never
    /// touched while it may still be playing. The in-flight message's
    /// repeat flag is cleared, so a repeating message finishes its
    /// current pass and then hands off. On error the staged buffer
    /// reads empty (a previously queued message is discarded) and the
    /// live message plays on unaffected.
    pub fn set_message(&mut self, text: &str, repeat: bool) -> Result<(), EncodeError> {
        encode_into(text, &mut self.buffers[1 - self.live])?;
        self.repeat_next = repeat;
        self.repeat = false;
        Ok(())
    }

    /// Advance playback by `elapsed_ms` and emit one signal level.
    ///
    /// No-op while idle; otherwise the sink is invoked exactly once.
    /// Arbitrarily large deltas are legal: the read-head lands
    /// further into the message, or past its end, which triggers the
    /// hand-off below.
    ///
    /// At the end of the live message the buffer roles swap (unless
    /// the message repeats) and the read-head resets. Every bit read
    /// is length-checked, so when the message ends with nothing
    /// staged the sink sees `false` and the key line is released.
    pub fn update<S: KeySink>(&mut self, elapsed_ms: u32, sink: &mut S) {
        if self.is_idle() {
            return;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let mut bit_index = self.elapsed_ms / self.config.dot_ms;

        // Read-head past the live message: hand off or restart.
        if bit_index >= self.live().bit_len() {
            if !self.repeat {
                self.swap_buffers();
            }
            self.elapsed_ms = 0;
            bit_index = 0;
        }

        let on = self.live().bit(bit_index).unwrap_or(false);
        sink.signal(on);
    }

    /// Stop the live message after its current pass completes.
    ///
    /// Clears the repeat flag only; playback is not interrupted
    /// mid-pass.
    pub fn stop(&mut self) {
        self.repeat = false;
    }

    /// Interrupt the live message immediately.
    ///
    /// The live buffer reads empty from here on. The next update call
    /// hands off to a staged message if one is pending; otherwise the
    /// player is idle and the sink is not invoked again. The caller
    /// owns the final key level after an interrupt.
    pub fn interrupt(&mut self) {
        self.buffers[self.live].clear();
        self.repeat = false;
    }

    #[inline]
    fn live(&self) -> &MorseBuffer<N> {
        &self.buffers[self.live]
    }

    /// Exchange live/next roles.
    ///
    /// The staged repeat flag is consumed, and the old live buffer is
    /// cleared so it cannot be mistaken for a pending message.
    fn swap_buffers(&mut self) {
        self.live = 1 - self.live;
        self.repeat = self.repeat_next;
        self.repeat_next = false;
        self.buffers[1 - self.live].clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collecting_updates<const N: usize>(
        player: &mut MorsePlayer<N>,
        step_ms: u32,
        count: usize,
    ) -> Vec<bool> {
        let mut out = Vec::new();
        let mut sink = |on: bool| out.push(on);
        for _ in 0..count {
            player.update(step_ms, &mut sink);
        }
        out
    }

    #[test]
    fn test_idle_player_never_signals() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        let out = collecting_updates(&mut player, 60, 10);
        assert!(out.is_empty());
        assert!(player.is_idle());
    }

    #[test]
    fn test_single_dot_playback() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("E", false).unwrap();

        // E encodes to 0,0,0,1,0,0,0. First update swaps the staged
        // buffer in and emits bit 0; one update per dot duration then
        // walks the bitmap; the final update hands off to the (empty)
        // next buffer and releases the key.
        let out = collecting_updates(&mut player, 60, 8);
        assert_eq!(
            out,
            [false, false, false, true, false, false, false, false]
        );

        // Message consumed: no further callbacks.
        assert!(player.is_idle());
        assert!(collecting_updates(&mut player, 60, 4).is_empty());
    }

    #[test]
    fn test_repeat_restarts_from_bit_zero() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("E", true).unwrap();

        // Two full passes: the dot must appear in both.
        let out = collecting_updates(&mut player, 60, 15);
        let dots = out.iter().filter(|&&on| on).count();
        assert_eq!(dots, 2);
        assert!(!player.is_idle());
    }

    #[test]
    fn test_stop_finishes_current_pass() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("E", true).unwrap();

        // Swap in and play into the first pass.
        let mut first = collecting_updates(&mut player, 60, 4);
        player.stop();
        // Pass completes (3 more bits), then hand-off to empty: idle.
        first.extend(collecting_updates(&mut player, 60, 4));
        assert_eq!(
            first,
            [false, false, false, true, false, false, false, false]
        );
        assert!(player.is_idle());
    }

    #[test]
    fn test_interrupt_truncates_immediately() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("SOS", false).unwrap();

        collecting_updates(&mut player, 60, 5);
        player.interrupt();

        // Nothing staged: no further callback invocations at all.
        let tail = collecting_updates(&mut player, 60, 3);
        assert!(tail.is_empty());
        assert!(player.is_idle());
    }

    #[test]
    fn test_interrupt_hands_off_to_staged_message() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("O", false).unwrap();
        collecting_updates(&mut player, 60, 3);

        player.set_message("E", false).unwrap();
        player.interrupt();

        // Next update swaps the staged message straight in.
        let out = collecting_updates(&mut player, 60, 8);
        assert_eq!(
            out,
            [false, false, false, true, false, false, false, false]
        );
        assert!(player.is_idle());
    }

    #[test]
    fn test_large_delta_skips_ahead() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("E", false).unwrap();

        let mut out = Vec::new();
        let mut sink = |on: bool| out.push(on);
        player.update(60, &mut sink); // swap in, bit 0
        player.update(180, &mut sink); // jump to bit 3: the dot
        assert_eq!(out, [false, true]);
    }

    #[test]
    fn test_config_change_takes_effect() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::with_dot_ms(10));
        player.set_message("E", false).unwrap();
        assert_eq!(player.dot_ms(), 10);

        player.set_config(PlayerConfig::with_wpm(20));
        assert_eq!(player.dot_ms(), 60);

        // Playback still walks one bit per dot duration.
        let out = collecting_updates(&mut player, 60, 4);
        assert_eq!(out, [false, false, false, true]);
    }

    #[test]
    fn test_message_duration() {
        let mut player: MorsePlayer<64> = MorsePlayer::new(PlayerConfig::default());
        player.set_message("E", false).unwrap();

        // Nothing live yet: staged message has no duration.
        assert_eq!(player.message_duration_ms(), 0);

        let mut sink = |_on: bool| {};
        player.update(60, &mut sink);
        // 7 bits at 60 ms each.
        assert_eq!(player.message_duration_ms(), 7 * 60);
    }
}

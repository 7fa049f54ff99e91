//! Text to Morse timing encoder.
//!
//! Pure logic, no hardware dependencies. Converts an ASCII message
//! into a packed dot-duration bitmap inside a [`MorseBuffer`]. Fully
//! testable on host.
//!
//! # Timing
//!
//! Standard element and gap lengths, all in dot durations:
//! - dot = 1 on, dash = 3 on
//! - gap between elements = 1 off
//! - gap between characters = 3 off
//! - gap between words = 7 off
//!
//! The character gap is realized as 2 off-durations appended before
//! each character, joining the 1-duration element gap that follows.
//! The word gap is realized as 4 off-durations for the space, joining
//! the 3-duration character gap of the next character. Every message
//! ends with 3 extra off-durations so a repeated or queued message
//! never runs into the current one.

use crate::buffer::{BitWriter, MorseBuffer, MIN_BUFFER_LEN};
use crate::error::EncodeError;

/// Keying element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Dit,
    Dah,
}

impl Element {
    /// Signal-on length in dot durations.
    #[inline]
    pub fn on_durations(self) -> u32 {
        match self {
            Element::Dit => 1,
            Element::Dah => 3,
        }
    }
}

use Element::{Dah, Dit};

/// Patterns for `A`..=`Z`.
const LETTERS: [&[Element]; 26] = [
    &[Dit, Dah],                // A
    &[Dah, Dit, Dit, Dit],      // B
    &[Dah, Dit, Dah, Dit],      // C
    &[Dah, Dit, Dit],           // D
    &[Dit],                     // E
    &[Dit, Dit, Dah, Dit],      // F
    &[Dah, Dah, Dit],           // G
    &[Dit, Dit, Dit, Dit],      // H
    &[Dit, Dit],                // I
    &[Dit, Dah, Dah, Dah],      // J
    &[Dah, Dit, Dah],           // K
    &[Dit, Dah, Dit, Dit],      // L
    &[Dah, Dah],                // M
    &[Dah, Dit],                // N
    &[Dah, Dah, Dah],           // O
    &[Dit, Dah, Dah, Dit],      // P
    &[Dah, Dah, Dit, Dah],      // Q
    &[Dit, Dah, Dit],           // R
    &[Dit, Dit, Dit],           // S
    &[Dah],                     // T
    &[Dit, Dit, Dah],           // U
    &[Dit, Dit, Dit, Dah],      // V
    &[Dit, Dah, Dah],           // W
    &[Dah, Dit, Dit, Dah],      // X
    &[Dah, Dit, Dah, Dah],      // Y
    &[Dah, Dah, Dit, Dit],      // Z
];

/// Patterns for `0`..=`9`.
const DIGITS: [&[Element]; 10] = [
    &[Dah, Dah, Dah, Dah, Dah], // 0
    &[Dit, Dah, Dah, Dah, Dah], // 1
    &[Dit, Dit, Dah, Dah, Dah], // 2
    &[Dit, Dit, Dit, Dah, Dah], // 3
    &[Dit, Dit, Dit, Dit, Dah], // 4
    &[Dit, Dit, Dit, Dit, Dit], // 5
    &[Dah, Dit, Dit, Dit, Dit], // 6
    &[Dah, Dah, Dit, Dit, Dit], // 7
    &[Dah, Dah, Dah, Dit, Dit], // 8
    &[Dah, Dah, Dah, Dah, Dit], // 9
];

/// Look up the Morse pattern for a character, case-insensitively.
///
/// Returns `None` outside letters and digits. The space character has
/// no pattern; it is pure gap timing.
pub fn pattern(c: char) -> Option<&'static [Element]> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
        c @ '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        _ => None,
    }
}

/// Encode `text` into `buf` as a dot-duration bitmap.
///
/// Deterministic and idempotent: the same text always produces the
/// same bytes. On success the header holds the payload bit count; on
/// any failure the header is forced to zero so the buffer reads as
/// empty, never as a partially valid message.
pub fn encode_into<const N: usize>(
    text: &str,
    buf: &mut MorseBuffer<N>,
) -> Result<(), EncodeError> {
    if N < MIN_BUFFER_LEN {
        return Err(EncodeError::InvalidCapacity);
    }

    let mut writer = BitWriter::new(buf);
    match encode_message(&mut writer, text) {
        Ok(()) => {
            writer.finish();
            Ok(())
        }
        Err(e) => {
            writer.abandon();
            Err(e)
        }
    }
}

fn encode_message<const N: usize>(
    writer: &mut BitWriter<'_, N>,
    text: &str,
) -> Result<(), EncodeError> {
    for c in text.chars() {
        encode_char(writer, c)?;
    }
    // Message-end padding: separates this message from a repeat of
    // itself or from the next staged message.
    writer.append_run(false, 3)
}

fn encode_char<const N: usize>(
    writer: &mut BitWriter<'_, N>,
    c: char,
) -> Result<(), EncodeError> {
    // A space is four dot durations of silence. Combined with the two
    // off-durations at the start of the next character and the one at
    // the start of its first element, this forms the seven-dot word
    // separation.
    if c == ' ' {
        return writer.append_run(false, 4);
    }

    let elements = pattern(c).ok_or(EncodeError::UnsupportedCharacter)?;

    // Two off-durations before the character; with the element gap
    // below this forms the three-dot character separation.
    writer.append_run(false, 2)?;
    for &element in elements {
        writer.append_run(false, 1)?;
        writer.append_run(true, element.on_durations())?;
    }
    Ok(())
}

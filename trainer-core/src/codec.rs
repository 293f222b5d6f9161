//! Bidirectional mapping between characters and dot/dash patterns

use std::collections::HashMap;
use std::sync::OnceLock;

/// Marker emitted for a pattern that matches no known code
pub const UNKNOWN_CHAR: char = '?';

/// Canonical codes for the 41-symbol training alphabet
const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('/', "-..-."),
    ('=', "-...-"),
];

fn reverse_table() -> &'static HashMap<&'static str, char> {
    static REVERSE: OnceLock<HashMap<&'static str, char>> = OnceLock::new();
    REVERSE.get_or_init(|| MORSE_TABLE.iter().map(|(ch, pat)| (*pat, *ch)).collect())
}

/// Look up the dot/dash pattern for a character.
///
/// The word separator passes through as `" "`; letters match regardless of
/// case; characters outside the training alphabet return `None` and produce
/// no pulses.
pub fn encode_char(ch: char) -> Option<&'static str> {
    if ch == ' ' {
        return Some(" ");
    }
    let upper = ch.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, pat)| *pat)
}

/// Decode a dot/dash pattern back into a character.
///
/// Unrecognised patterns decode to [`UNKNOWN_CHAR`]; never an error.
pub fn decode_pattern(pattern: &str) -> char {
    reverse_table().get(pattern).copied().unwrap_or(UNKNOWN_CHAR)
}

/// All characters of the supported alphabet, in table order
pub fn supported_alphabet() -> impl Iterator<Item = char> {
    MORSE_TABLE.iter().map(|(ch, _)| *ch)
}

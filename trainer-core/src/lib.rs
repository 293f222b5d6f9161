//! # Trainer Core
//!
//! Morse-code operator trainer core: the signal timing engine (text to
//! timed pulses, keyed pulses back to text), progressive lesson
//! generation, and copy grading. Transport and UI stay outside; anything
//! that keys or samples a physical line does so through [`hal::SignalLine`].

pub mod codec;
pub mod console;
pub mod grade;
pub mod hal;
pub mod lesson;
pub mod rx;
pub mod tx;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use codec::{decode_pattern, encode_char, UNKNOWN_CHAR};
pub use grade::{levenshtein, score_edit_distance, score_positional, GradeResult};
pub use hal::{LineError, SignalLine, SounderSim};
pub use lesson::{generate_groups, lesson_alphabet, KOCH_SEQUENCE};
pub use rx::{DecoderState, Receiver};
pub use tx::{play_char, send_dah, send_dit, transmit, SendSession};
pub use types::{Element, TimingProfile, TrainerConfig};

/// Trainer library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for most training sessions: 20 WPM elements with
/// 12 WPM effective spacing, 10 ms receiver sampling
pub fn default_config() -> TrainerConfig {
    TrainerConfig::default()
}

//! Core configuration and timing types for the trainer

use std::time::Duration;

/// Morse signal elements
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Element {
    /// Dit (short element)
    Dit,
    /// Dah (long element)
    Dah,
}

impl Element {
    /// Returns the duration of this element in dot units
    pub const fn duration_units(&self) -> u32 {
        match self {
            Element::Dit => 1,
            Element::Dah => 3,
        }
    }

    /// Returns the printable symbol for this element
    pub const fn symbol(&self) -> char {
        match self {
            Element::Dit => '.',
            Element::Dah => '-',
        }
    }

    /// Parse a pattern symbol into an element
    pub const fn from_symbol(sym: char) -> Option<Element> {
        match sym {
            '.' => Some(Element::Dit),
            '-' => Some(Element::Dah),
            _ => None,
        }
    }
}

/// Absolute pulse and gap durations derived from a speed pair.
///
/// Element speed comes from the nominal WPM; when the effective WPM is lower,
/// the inter-character and inter-word gaps stretch while dots and dashes keep
/// their nominal length (Farnsworth spacing). Callers must derive a fresh
/// profile whenever a speed may have changed; profiles are never cached
/// across a speed change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimingProfile {
    /// Dot length (the basic unit, 1200 ms / WPM)
    pub dot: Duration,
    /// Dash length (3 dots)
    pub dash: Duration,
    /// Gap between elements of one character (1 dot)
    pub intra_gap: Duration,
    /// Gap between characters (3 dots, stretched by the spacing scale)
    pub inter_char_gap: Duration,
    /// Gap between words (7 dots, stretched by the spacing scale)
    pub inter_word_gap: Duration,
}

impl TimingProfile {
    /// Derive a profile from a nominal and an effective speed.
    ///
    /// Zero speeds are floored to 1 WPM; an effective speed of 0 means
    /// "same as nominal". Effective speeds above nominal never compress
    /// spacing below the canonical 3/7 dot gaps.
    pub fn new(wpm: u32, effective_wpm: u32) -> Self {
        let wpm = wpm.max(1);
        let eff = if effective_wpm == 0 { wpm } else { effective_wpm };
        let dot_ms = 1200.0 / wpm as f64;
        let scale = (wpm as f64 / eff.max(1) as f64).max(1.0);
        Self {
            dot: millis(dot_ms),
            dash: millis(3.0 * dot_ms),
            intra_gap: millis(dot_ms),
            inter_char_gap: millis(3.0 * dot_ms * scale),
            inter_word_gap: millis(7.0 * dot_ms * scale),
        }
    }

    /// Keyed duration of an element under this profile
    pub const fn element(&self, element: Element) -> Duration {
        match element {
            Element::Dit => self.dot,
            Element::Dah => self.dash,
        }
    }

    /// Tone-length boundary between a dot and a dash (2 dots)
    pub fn dash_threshold(&self) -> Duration {
        self.dot * 2
    }

    /// Idle gap after which a pending pattern is committed as a character.
    /// Midpoint between the intra-element and inter-character gaps, so
    /// jitter up to half a nominal gap cannot split a character early.
    pub fn char_commit_threshold(&self) -> Duration {
        (self.inter_char_gap + self.intra_gap) / 2
    }

    /// Idle gap after which a word break is inserted (inter-character /
    /// inter-word midpoint).
    pub fn word_commit_threshold(&self) -> Duration {
        (self.inter_word_gap + self.inter_char_gap) / 2
    }
}

fn millis(ms: f64) -> Duration {
    Duration::from_micros((ms * 1000.0).round() as u64)
}

/// Trainer configuration parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Nominal keying speed in words per minute
    pub wpm: u32,
    /// Effective (spacing) speed in words per minute
    pub effective_wpm: u32,
    /// Receiver sampling period
    pub poll_period: Duration,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            wpm: 20,
            effective_wpm: 12,
            poll_period: Duration::from_millis(10),
        }
    }
}

impl TrainerConfig {
    /// Create a configuration, flooring out-of-range speeds to 1 WPM.
    /// Bad speed input is a recoverable condition, never an error.
    pub fn new(wpm: u32, effective_wpm: u32) -> Self {
        Self {
            wpm: wpm.max(1),
            effective_wpm: effective_wpm.max(1),
            ..Self::default()
        }
    }

    /// Derive the current timing profile
    pub fn timing(&self) -> TimingProfile {
        TimingProfile::new(self.wpm, self.effective_wpm)
    }
}

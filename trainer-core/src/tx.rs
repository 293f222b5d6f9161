//! Timed transmission of text over a signal line

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::sleep;
use tracing::{debug, trace};

use crate::codec::encode_char;
use crate::hal::{LineError, SignalLine};
use crate::types::{Element, TimingProfile, TrainerConfig};

/// State scoped to one transmission run. Cancellation is cooperative: the
/// transmitter checks the flag before every element, so a cancel request
/// takes effect within one element duration.
#[derive(Debug, Default)]
pub struct SendSession {
    cancelled: AtomicBool,
}

impl SendSession {
    pub const fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
        }
    }

    /// Request a prompt stop; safe to call from any thread at any time
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Key `text` onto `line` under the configured timing.
///
/// Text is uppercased and split on whitespace runs. Unmapped characters
/// produce no pulses but still take up an inter-character gap. On
/// cancellation the line is left de-asserted and remaining gap waits are
/// skipped; an in-flight pulse or gap is never cut short.
pub async fn transmit<L: SignalLine>(
    text: &str,
    config: &TrainerConfig,
    line: &mut L,
    session: &SendSession,
) -> Result<(), LineError> {
    let t = config.timing();
    debug!(wpm = config.wpm, effective_wpm = config.effective_wpm, "transmission started");

    let upper = text.to_uppercase();
    for word in upper.split_whitespace() {
        for ch in word.chars() {
            if session.is_cancelled() {
                return finish_cancelled(line);
            }
            match encode_char(ch) {
                Some(pattern) => {
                    for element in pattern.chars().filter_map(Element::from_symbol) {
                        if session.is_cancelled() {
                            return finish_cancelled(line);
                        }
                        send_element(element, &t, line).await?;
                    }
                }
                None => trace!(%ch, "unmapped character, spacing only"),
            }
            // each element already trailed an intra-element gap
            sleep(t.inter_char_gap - t.intra_gap).await;
        }
        sleep(t.inter_word_gap - t.inter_char_gap).await;
    }

    debug!("transmission finished");
    Ok(())
}

fn finish_cancelled<L: SignalLine>(line: &mut L) -> Result<(), LineError> {
    line.deassert_line()?;
    debug!("transmission cancelled");
    Ok(())
}

async fn send_element<L: SignalLine>(
    element: Element,
    t: &TimingProfile,
    line: &mut L,
) -> Result<(), LineError> {
    line.assert_line()?;
    sleep(t.element(element)).await;
    release_line(line)?;
    sleep(t.intra_gap).await;
    Ok(())
}

/// De-assert with one retry so a failed write cannot leave the tone
/// stuck on. The original error is the one reported.
fn release_line<L: SignalLine>(line: &mut L) -> Result<(), LineError> {
    if let Err(e) = line.deassert_line() {
        let _ = line.deassert_line();
        return Err(e);
    }
    Ok(())
}

/// Key a single test dot at the nominal speed
pub async fn send_dit<L: SignalLine>(config: &TrainerConfig, line: &mut L) -> Result<(), LineError> {
    send_pulse(Element::Dit, config, line).await
}

/// Key a single test dash at the nominal speed
pub async fn send_dah<L: SignalLine>(config: &TrainerConfig, line: &mut L) -> Result<(), LineError> {
    send_pulse(Element::Dah, config, line).await
}

async fn send_pulse<L: SignalLine>(
    element: Element,
    config: &TrainerConfig,
    line: &mut L,
) -> Result<(), LineError> {
    let t = config.timing();
    line.assert_line()?;
    sleep(t.element(element)).await;
    release_line(line)
}

/// Play one character with standard character spacing (lesson pad feature).
/// Unmapped characters play nothing.
pub async fn play_char<L: SignalLine>(
    ch: char,
    config: &TrainerConfig,
    line: &mut L,
) -> Result<(), LineError> {
    let t = config.timing();
    let Some(pattern) = encode_char(ch) else {
        return Ok(());
    };
    for element in pattern.chars().filter_map(Element::from_symbol) {
        send_element(element, &t, line).await?;
    }
    sleep(t.inter_char_gap - t.intra_gap).await;
    Ok(())
}

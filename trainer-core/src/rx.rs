//! Polling receiver: samples a signal line and decodes keyed Morse

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace, warn};

use crate::codec::decode_pattern;
use crate::hal::{LineError, SignalLine, SounderSim};
use crate::types::{TimingProfile, TrainerConfig};

/// Duration-classifying decoder state machine, driven by fixed-period level
/// samples. A falling edge classifies the finished tone as dot or dash; the
/// running idle gap commits pending symbols into characters and inserts at
/// most one word break per silence.
#[derive(Debug, Default)]
pub struct DecoderState {
    pattern: String,
    last_edge: Option<Instant>,
    last_level: Option<bool>,
    word_break_inserted: bool,
    decoded: String,
}

impl DecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one level sample taken at `now` under the current timing.
    pub fn tick(&mut self, level: bool, now: Instant, t: &TimingProfile) {
        let last_edge = *self.last_edge.get_or_insert(now);

        if let Some(prev) = self.last_level {
            if prev != level {
                if prev {
                    // falling edge: the tone length decides dot vs dash
                    let tone = now.duration_since(last_edge);
                    let sym = if tone < t.dash_threshold() { '.' } else { '-' };
                    self.pattern.push(sym);
                }
                self.last_edge = Some(now);
            }
        }

        if !level {
            let gap = now.duration_since(self.last_edge.unwrap_or(now));
            if !self.pattern.is_empty() && gap >= t.char_commit_threshold() {
                self.commit_pending();
            }
            if gap >= t.word_commit_threshold() {
                self.insert_word_break();
            }
        } else {
            // inside a tone; one more space is allowed after it ends
            self.word_break_inserted = false;
        }

        self.last_level = Some(level);
    }

    fn commit_pending(&mut self) {
        let ch = decode_pattern(&self.pattern);
        trace!(%ch, pattern = %self.pattern, "character committed");
        self.decoded.push(ch);
        self.pattern.clear();
        self.word_break_inserted = false;
    }

    fn insert_word_break(&mut self) {
        if self.word_break_inserted {
            return;
        }
        if !self.decoded.is_empty() && !self.decoded.ends_with(' ') {
            self.decoded.push(' ');
        }
        self.word_break_inserted = true;
    }

    /// Text decoded so far
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    /// Dot/dash symbols of the character still being keyed
    pub fn pending_pattern(&self) -> &str {
        &self.pattern
    }

    /// Operator clear: drop the pending symbols and the output buffer
    pub fn clear(&mut self) {
        self.pattern.clear();
        self.decoded.clear();
        self.word_break_inserted = false;
    }
}

struct RxShared {
    running: AtomicBool,
    stop: AtomicBool,
    wpm: AtomicU32,
    effective_wpm: AtomicU32,
    poll_period_us: AtomicU64,
    state: Mutex<DecoderState>,
}

impl RxShared {
    /// Timing is re-derived from the live speeds on every poll so a speed
    /// change applies from the next tick.
    fn timing(&self) -> TimingProfile {
        TimingProfile::new(
            self.wpm.load(Ordering::Relaxed),
            self.effective_wpm.load(Ordering::Relaxed),
        )
    }

    fn poll_period(&self) -> Duration {
        Duration::from_micros(self.poll_period_us.load(Ordering::Relaxed))
    }
}

/// Handle to the polling receiver task.
///
/// Cloning shares the same session: a clone can stop the task, change the
/// speed or read the decoded text. Only one poll task runs per handle; a
/// second `start` while running is a no-op.
#[derive(Clone)]
pub struct Receiver {
    shared: Arc<RxShared>,
}

impl Receiver {
    pub fn new(config: &TrainerConfig) -> Self {
        Self {
            shared: Arc::new(RxShared {
                running: AtomicBool::new(false),
                stop: AtomicBool::new(false),
                wpm: AtomicU32::new(config.wpm.max(1)),
                effective_wpm: AtomicU32::new(config.effective_wpm.max(1)),
                poll_period_us: AtomicU64::new(config.poll_period.as_micros() as u64),
                state: Mutex::new(DecoderState::new()),
            }),
        }
    }

    /// Start sampling `line`. Returns the task handle, or `None` when a
    /// poll task for this receiver is already running.
    pub fn start<L>(&self, line: L) -> Option<JoinHandle<()>>
    where
        L: SignalLine + Send + 'static,
    {
        self.spawn(line, None::<SounderSim>)
    }

    /// Start sampling `line`, relaying every observed level change onto a
    /// local `sounder` line (read-then-write; the sounder has no writer of
    /// its own while the relay runs).
    pub fn start_relayed<L, S>(&self, line: L, sounder: S) -> Option<JoinHandle<()>>
    where
        L: SignalLine + Send + 'static,
        S: SignalLine + Send + 'static,
    {
        self.spawn(line, Some(sounder))
    }

    fn spawn<L, S>(&self, line: L, relay: Option<S>) -> Option<JoinHandle<()>>
    where
        L: SignalLine + Send + 'static,
        S: SignalLine + Send + 'static,
    {
        if self.shared.running.swap(true, Ordering::SeqCst) {
            debug!("receiver already running, start ignored");
            return None;
        }
        self.shared.stop.store(false, Ordering::SeqCst);
        let shared = Arc::clone(&self.shared);
        Some(tokio::spawn(run_loop(shared, line, relay)))
    }

    /// Request the poll task to stop; takes effect within one poll period
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Change the speeds used for classification from the next tick on
    pub fn set_speed(&self, wpm: u32, effective_wpm: u32) {
        self.shared.wpm.store(wpm.max(1), Ordering::Relaxed);
        self.shared
            .effective_wpm
            .store(effective_wpm.max(1), Ordering::Relaxed);
    }

    /// Snapshot of the text decoded so far
    pub fn decoded(&self) -> String {
        self.shared.state.lock().decoded().to_string()
    }

    /// Dot/dash symbols of the character currently being keyed
    pub fn pending_pattern(&self) -> String {
        self.shared.state.lock().pending_pattern().to_string()
    }

    /// Operator clear: drop pending symbols and the decoded buffer
    pub fn clear(&self) {
        self.shared.state.lock().clear();
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new(&TrainerConfig::default())
    }
}

async fn run_loop<L, S>(shared: Arc<RxShared>, mut line: L, mut relay: Option<S>)
where
    L: SignalLine + Send,
    S: SignalLine + Send,
{
    debug!("receiver started");
    let mut last_relayed: Option<bool> = None;

    loop {
        if shared.stop.load(Ordering::SeqCst) {
            debug!("receiver stop requested");
            break;
        }

        match line.read_level_async().await {
            Ok(level) => {
                let t = shared.timing();
                shared.state.lock().tick(level, Instant::now(), &t);

                if let Some(sounder) = relay.as_mut() {
                    if last_relayed != Some(level) {
                        if let Err(e) = sounder.set_level(level) {
                            warn!(error = %e, "sounder relay write failed");
                        }
                        last_relayed = Some(level);
                    }
                }
            }
            Err(LineError::Closed) => {
                warn!("signal line closed, receiver stopping");
                break;
            }
            Err(e) => {
                // transient; resample on the next tick
                trace!(error = %e, "line read failed");
            }
        }

        sleep(shared.poll_period()).await;
    }

    shared.running.store(false, Ordering::SeqCst);
    debug!("receiver stopped");
}

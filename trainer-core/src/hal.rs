//! Signal line abstraction and software-backed variants
//!
//! The trainer never talks to a serial port directly; everything that keys
//! or samples the physical line goes through [`SignalLine`]. A hardware
//! transport (RTS out, DSR in on a serial adapter) lives outside this crate
//! and implements the same trait.

use std::future::Future;

use tracing::debug;

/// Error types for line operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineError {
    /// Line is gone for good (device unplugged, stream closed)
    Closed,
    /// A level sample failed; safe to retry next tick
    ReadFailed,
    /// Driving the line failed
    WriteFailed,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::Closed => write!(f, "signal line closed"),
            LineError::ReadFailed => write!(f, "line level read failed"),
            LineError::WriteFailed => write!(f, "line drive failed"),
        }
    }
}

impl std::error::Error for LineError {}

/// A single on/off signal line (key output or sounder drive).
///
/// `true` is the asserted (key-down, tone-on) state. Implementations should
/// tolerate transient failures; the receiver retries reads and the
/// transmitter reports write errors to its caller without tearing anything
/// down.
pub trait SignalLine {
    /// Drive the line to the asserted state
    fn assert_line(&mut self) -> Result<(), LineError>;

    /// Release the line to the idle state
    fn deassert_line(&mut self) -> Result<(), LineError>;

    /// Sample the current line level (true = asserted)
    fn read_level(&mut self) -> Result<bool, LineError>;

    /// Sample the line level on a transport where reads may be slow.
    /// The default just wraps the synchronous read.
    fn read_level_async(&mut self) -> impl Future<Output = Result<bool, LineError>> + Send
    where
        Self: Send,
    {
        async { self.read_level() }
    }

    /// Drive the line to an explicit level
    fn set_level(&mut self, level: bool) -> Result<(), LineError> {
        if level {
            self.assert_line()
        } else {
            self.deassert_line()
        }
    }
}

/// Software sounder: no hardware attached, transitions are logged as the
/// click (armature pulls in) and clack (armature releases) of a telegraph
/// sounder.
#[derive(Debug, Default)]
pub struct SounderSim {
    level: bool,
}

impl SounderSim {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sounder state (true = armature pulled in)
    pub fn level(&self) -> bool {
        self.level
    }
}

impl SignalLine for SounderSim {
    fn assert_line(&mut self) -> Result<(), LineError> {
        if !self.level {
            debug!("sounder click");
        }
        self.level = true;
        Ok(())
    }

    fn deassert_line(&mut self) -> Result<(), LineError> {
        if self.level {
            debug!("sounder clack");
        }
        self.level = false;
        Ok(())
    }

    fn read_level(&mut self) -> Result<bool, LineError> {
        Ok(self.level)
    }
}

pub mod mock {
    //! Mock lines for testing

    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;

    /// Shared-level line: every clone observes every other clone's writes,
    /// so one clone can feed a transmitter while another feeds a receiver.
    #[derive(Clone, Debug, Default)]
    pub struct LoopbackLine {
        level: Arc<AtomicBool>,
        assert_count: Arc<AtomicU32>,
    }

    impl LoopbackLine {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn is_asserted(&self) -> bool {
            self.level.load(Ordering::Relaxed)
        }

        /// Number of idle-to-asserted transitions seen so far
        pub fn assert_count(&self) -> u32 {
            self.assert_count.load(Ordering::Relaxed)
        }
    }

    impl SignalLine for LoopbackLine {
        fn assert_line(&mut self) -> Result<(), LineError> {
            if !self.level.swap(true, Ordering::Relaxed) {
                self.assert_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(())
        }

        fn deassert_line(&mut self) -> Result<(), LineError> {
            self.level.store(false, Ordering::Relaxed);
            Ok(())
        }

        fn read_level(&mut self) -> Result<bool, LineError> {
            Ok(self.level.load(Ordering::Relaxed))
        }
    }

    /// Line whose first `fail_reads` samples fail transiently before it
    /// behaves like its inner loopback line.
    #[derive(Debug)]
    pub struct FlakyLine {
        inner: LoopbackLine,
        fail_reads: u32,
    }

    impl FlakyLine {
        pub fn new(inner: LoopbackLine, fail_reads: u32) -> Self {
            Self { inner, fail_reads }
        }
    }

    impl SignalLine for FlakyLine {
        fn assert_line(&mut self) -> Result<(), LineError> {
            self.inner.assert_line()
        }

        fn deassert_line(&mut self) -> Result<(), LineError> {
            self.inner.deassert_line()
        }

        fn read_level(&mut self) -> Result<bool, LineError> {
            if self.fail_reads > 0 {
                self.fail_reads -= 1;
                return Err(LineError::ReadFailed);
            }
            self.inner.read_level()
        }
    }

    /// Line whose first `fail_deasserts` release attempts fail without
    /// changing the level, simulating a sticky key driver.
    #[derive(Debug)]
    pub struct StickyLine {
        inner: LoopbackLine,
        fail_deasserts: u32,
    }

    impl StickyLine {
        pub fn new(inner: LoopbackLine, fail_deasserts: u32) -> Self {
            Self {
                inner,
                fail_deasserts,
            }
        }
    }

    impl SignalLine for StickyLine {
        fn assert_line(&mut self) -> Result<(), LineError> {
            self.inner.assert_line()
        }

        fn deassert_line(&mut self) -> Result<(), LineError> {
            if self.fail_deasserts > 0 {
                self.fail_deasserts -= 1;
                return Err(LineError::WriteFailed);
            }
            self.inner.deassert_line()
        }

        fn read_level(&mut self) -> Result<bool, LineError> {
            self.inner.read_level()
        }
    }

    /// Line that reports [`LineError::Closed`] after a fixed number of
    /// successful samples, simulating a device unplug.
    #[derive(Debug)]
    pub struct ClosingLine {
        inner: LoopbackLine,
        reads_left: u32,
    }

    impl ClosingLine {
        pub fn new(inner: LoopbackLine, reads_left: u32) -> Self {
            Self { inner, reads_left }
        }
    }

    impl SignalLine for ClosingLine {
        fn assert_line(&mut self) -> Result<(), LineError> {
            self.inner.assert_line()
        }

        fn deassert_line(&mut self) -> Result<(), LineError> {
            self.inner.deassert_line()
        }

        fn read_level(&mut self) -> Result<bool, LineError> {
            if self.reads_left == 0 {
                return Err(LineError::Closed);
            }
            self.reads_left -= 1;
            self.inner.read_level()
        }
    }
}

//! Test utilities for exercising the timing engine

pub mod capture {
    //! Line-event capture and analysis

    use tokio::time::Instant;

    use crate::hal::{LineError, SignalLine};
    use crate::types::TimingProfile;

    /// One recorded level transition
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LineEvent {
        pub level: bool,
        pub at: Instant,
    }

    /// Line that records every level transition with its timestamp.
    /// Reassertions of the current level record nothing.
    #[derive(Debug, Default)]
    pub struct CaptureLine {
        level: bool,
        events: Vec<LineEvent>,
    }

    impl CaptureLine {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> &[LineEvent] {
            &self.events
        }

        pub fn is_asserted(&self) -> bool {
            self.level
        }

        /// On-durations of completed pulses, in keying order
        pub fn pulse_durations(&self) -> Vec<std::time::Duration> {
            self.events
                .windows(2)
                .filter(|w| w[0].level && !w[1].level)
                .map(|w| w[1].at.duration_since(w[0].at))
                .collect()
        }

        /// Idle gaps between consecutive pulses
        pub fn gap_durations(&self) -> Vec<std::time::Duration> {
            self.events
                .windows(2)
                .filter(|w| !w[0].level && w[1].level)
                .map(|w| w[1].at.duration_since(w[0].at))
                .collect()
        }

        /// Render the captured pulses as dots and dashes under `t`
        pub fn to_symbol_string(&self, t: &TimingProfile) -> String {
            self.pulse_durations()
                .iter()
                .map(|d| if *d < t.dash_threshold() { '.' } else { '-' })
                .collect()
        }
    }

    impl SignalLine for CaptureLine {
        fn assert_line(&mut self) -> Result<(), LineError> {
            if !self.level {
                self.events.push(LineEvent {
                    level: true,
                    at: Instant::now(),
                });
            }
            self.level = true;
            Ok(())
        }

        fn deassert_line(&mut self) -> Result<(), LineError> {
            if self.level {
                self.events.push(LineEvent {
                    level: false,
                    at: Instant::now(),
                });
            }
            self.level = false;
            Ok(())
        }

        fn read_level(&mut self) -> Result<bool, LineError> {
            Ok(self.level)
        }
    }
}

pub mod keying {
    //! Scripted keying sequences for driving a receiver under test

    use std::time::Duration;

    use tokio::time::sleep;

    use crate::hal::{LineError, SignalLine};
    use crate::types::TimingProfile;

    /// One step of a keying script
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct KeyStep {
        pub level: bool,
        pub hold: Duration,
    }

    /// Expand a dot/dash pattern into hand-keyed steps with intra-element
    /// gaps. No trailing gap; append silence explicitly to commit.
    pub fn steps_for_pattern(pattern: &str, t: &TimingProfile) -> Vec<KeyStep> {
        let mut steps = Vec::new();
        for (i, sym) in pattern.chars().enumerate() {
            if i > 0 {
                steps.push(KeyStep {
                    level: false,
                    hold: t.intra_gap,
                });
            }
            steps.push(KeyStep {
                level: true,
                hold: if sym == '.' { t.dot } else { t.dash },
            });
        }
        steps
    }

    /// Drive `line` through the script, leaving it de-asserted at the end
    pub async fn play<L: SignalLine>(line: &mut L, steps: &[KeyStep]) -> Result<(), LineError> {
        for step in steps {
            line.set_level(step.level)?;
            sleep(step.hold).await;
        }
        line.deassert_line()
    }

    /// Hold the line idle for `gap`
    pub async fn pause<L: SignalLine>(line: &mut L, gap: Duration) -> Result<(), LineError> {
        line.deassert_line()?;
        sleep(gap).await;
        Ok(())
    }
}

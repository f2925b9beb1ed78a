use crate::error::BootError;
use core::fmt;
use log::{error, info};

/// One of the four boot callbacks, in the order they must run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BootStage {
    MapIo,
    InitIrq,
    InitMachine,
    InitTime,
}

impl BootStage {
    pub const ALL: [Self; 4] = [Self::MapIo, Self::InitIrq, Self::InitMachine, Self::InitTime];

    /// The stage that may run after this one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::MapIo => Some(Self::InitIrq),
            Self::InitIrq => Some(Self::InitMachine),
            Self::InitMachine => Some(Self::InitTime),
            Self::InitTime => None,
        }
    }

    /// State reached once this stage has completed.
    #[must_use]
    pub const fn completes(self) -> BootState {
        match self {
            Self::MapIo => BootState::IoMapped,
            Self::InitIrq => BootState::InterruptsReady,
            Self::InitMachine => BootState::MachineInitialized,
            Self::InitTime => BootState::TimeSourceReady,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MapIo => "map_io",
            Self::InitIrq => "init_irq",
            Self::InitMachine => "init_machine",
            Self::InitTime => "init_time",
        }
    }
}

impl fmt::Display for BootStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of a board through its boot stages.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BootState {
    #[default]
    Uninitialized,
    IoMapped,
    InterruptsReady,
    MachineInitialized,
    /// All stages done; the board is running.
    TimeSourceReady,
    /// A stage failed; nothing further may run.
    Halted { failed: BootStage },
}

impl BootState {
    /// The most recent stage that completed.
    #[must_use]
    pub const fn last_completed(self) -> Option<BootStage> {
        match self {
            Self::Uninitialized | Self::Halted { .. } => None,
            Self::IoMapped => Some(BootStage::MapIo),
            Self::InterruptsReady => Some(BootStage::InitIrq),
            Self::MachineInitialized => Some(BootStage::InitMachine),
            Self::TimeSourceReady => Some(BootStage::InitTime),
        }
    }

    /// The stage allowed to run next, if any.
    #[must_use]
    pub const fn next_stage(self) -> Option<BootStage> {
        match self {
            Self::Uninitialized => Some(BootStage::MapIo),
            Self::Halted { .. } => None,
            _ => match self.last_completed() {
                Some(stage) => stage.next(),
                None => None,
            },
        }
    }
}

impl fmt::Display for BootState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::IoMapped => f.write_str("I/O mapped"),
            Self::InterruptsReady => f.write_str("interrupts ready"),
            Self::MachineInitialized => f.write_str("machine initialized"),
            Self::TimeSourceReady => f.write_str("time source ready"),
            Self::Halted { failed } => write!(f, "halted in {failed}"),
        }
    }
}

/// Enforces the one-shot, fixed-order execution of the boot stages.
#[derive(Debug, Default)]
pub struct BootSequencer {
    state: BootState,
}

impl BootSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: BootState::Uninitialized,
        }
    }

    #[must_use]
    pub const fn state(&self) -> BootState {
        self.state
    }

    /// All four stages have completed.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, BootState::TimeSourceReady)
    }

    #[must_use]
    pub const fn is_halted(&self) -> bool {
        matches!(self.state, BootState::Halted { .. })
    }

    /// Whether `stage` may run now.
    ///
    /// # Errors
    /// * [`BootError::Halted`] after a failed stage
    /// * [`BootError::AlreadyCompleted`] for a stage that already ran
    /// * [`BootError::OutOfOrder`] for a stage whose predecessor has not run
    pub const fn check(&self, stage: BootStage) -> Result<(), BootError> {
        if let BootState::Halted { failed } = self.state {
            return Err(BootError::Halted { failed });
        }
        if let Some(done) = self.state.last_completed()
            && stage as u8 <= done as u8
        {
            return Err(BootError::AlreadyCompleted { stage });
        }
        match self.state.next_stage() {
            Some(expected) if expected as u8 == stage as u8 => Ok(()),
            Some(expected) => Err(BootError::OutOfOrder {
                expected,
                requested: stage,
            }),
            None => Err(BootError::AlreadyCompleted { stage }),
        }
    }

    /// Run `body` as `stage`.
    ///
    /// On success the sequencer advances past `stage`; on failure it halts.
    /// A rejected request leaves the state unchanged and does not call `body`.
    ///
    /// # Errors
    /// The ordering errors of [`check`](Self::check), or whatever `body`
    /// returns.
    pub fn run<T>(
        &mut self,
        stage: BootStage,
        body: impl FnOnce() -> Result<T, BootError>,
    ) -> Result<T, BootError> {
        if let Err(e) = self.check(stage) {
            error!("{stage} rejected in state {}: {e}", self.state);
            return Err(e);
        }

        info!("{stage}: begin");
        match body() {
            Ok(value) => {
                self.state = stage.completes();
                info!("{stage}: done, {}", self.state);
                Ok(value)
            }
            Err(e) => {
                self.state = BootState::Halted { failed: stage };
                error!("{stage}: {e}; boot halted");
                Err(e)
            }
        }
    }
}

use crate::sequencer::BootStage;
use board_desc::{ConfigError, HardwareError};

/// Why a boot stage did not run or did not complete.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootError {
    #[error("{requested} requested, but {expected} must run first")]
    OutOfOrder {
        expected: BootStage,
        requested: BootStage,
    },

    #[error("{stage} has already run")]
    AlreadyCompleted { stage: BootStage },

    #[error("boot halted after {failed} failed")]
    Halted { failed: BootStage },

    #[error("{stage} failed")]
    Hardware {
        stage: BootStage,
        #[source]
        source: HardwareError,
    },

    #[error("invalid board configuration")]
    Config(#[from] ConfigError),
}

impl BootError {
    /// A stage was requested at the wrong time; the orchestrator is at fault.
    #[must_use]
    pub const fn is_ordering_violation(&self) -> bool {
        matches!(
            self,
            Self::OutOfOrder { .. } | Self::AlreadyCompleted { .. } | Self::Halted { .. }
        )
    }
}

//! # Staged Board Bring-up
//!
//! The boot orchestrator brings a board up through four callbacks, each run
//! exactly once and in a fixed order. This crate turns that convention into
//! an explicit state machine that refuses any other order:
//!
//! ```text
//!  Uninitialized ──map_io──► IoMapped ──init_irq──► InterruptsReady
//!                                                        │
//!                                                   init_machine
//!                                                        ▼
//!         (running) ◄── TimeSourceReady ◄──init_time── MachineInitialized
//!
//!  any stage fails ──► Halted            restart ──► (never returns)
//! ```
//!
//! * [`BootSequencer`] tracks the state and rejects out-of-order, repeated and
//!   post-failure stage requests.
//! * [`Platform`] is the set of services the orchestrator provides (MMU
//!   mappings, clock and UART setup, device registration, reset).
//! * [`Machine`] is the board registration record: a validated
//!   [`BoardDescriptor`](board_desc::BoardDescriptor) plus the stage callbacks
//!   that feed it to a [`Platform`].
//!
//! ## Failure Model
//!
//! Stages do not retry. The first error moves the sequencer to
//! [`BootState::Halted`], and every further stage request fails with
//! [`BootError::Halted`]. [`Machine::restart`] is the only way out.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod error;
mod machine;
mod platform;
mod sequencer;

pub use error::BootError;
pub use machine::Machine;
pub use platform::{Platform, RestartMode};
pub use sequencer::{BootSequencer, BootStage, BootState};

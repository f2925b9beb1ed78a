//! # Bring-up Logging
//!
//! A [`log::Log`] backend for the earliest boot stages, before any console
//! driver exists. Records are formatted straight into a [`LogSink`], one byte
//! slice at a time, without allocating:
//!
//! ```text
//! info!("…") ──► BoardLogger ──► SinkWriter (fmt::Write) ──► LogSink::write_bytes
//!                   │                                            │
//!              level filter                          UART0 (feature `uart`),
//!                                                    capture buffer in tests
//! ```
//!
//! Each record becomes one line, `[LEVEL] target: message\n`.
//!
//! ## Usage
//!
//! ```rust
//! use board_log::{BoardLogger, LogSink};
//! use log::LevelFilter;
//!
//! struct Discard;
//! impl LogSink for Discard {
//!     fn write_bytes(&self, _bytes: &[u8]) {}
//! }
//!
//! static LOGGER: BoardLogger<Discard> = BoardLogger::new(Discard, LevelFilter::Info);
//! LOGGER.init().expect("no other logger installed");
//! log::info!("map_io done");
//! ```
//!
//! ## Features
//!
//! * `uart`: provides [`uart::Uart0Sink`], a polled writer for UART0 of the
//!   S3C24xx. This is the only place in the crate that touches hardware.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod logger;
mod sink;
#[cfg(feature = "uart")]
pub mod uart;

pub use logger::BoardLogger;
pub use sink::{LogSink, SinkWriter};

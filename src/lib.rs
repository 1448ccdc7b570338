//! Hardware-independent core of the joyhid firmware.
//!
//! Everything that decides *what* goes to the host lives here and runs
//! on the host under `cargo test`: joystick mapping, debouncing, the
//! mode state machine, the per-mode report generators and the
//! cooperative scheduler.  The embedded binary (`main.rs`, feature
//! `embedded`) supplies the [`scheduler::Board`] and
//! [`transport::Transport`] implementations on RP2040 hardware.
//!
//! Usage: `cargo test --lib --tests`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].

#![cfg_attr(not(test), no_std)]

pub mod analog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod generator;
pub mod hid;
pub mod input;
pub mod mode;
pub mod scheduler;
pub mod transport;

pub use error::Error;
pub use input::{Control, InputMailbox};
pub use mode::Mode;
pub use scheduler::{Board, Scheduler, SchedulerConfig};
pub use transport::{LinkEvent, Transport};

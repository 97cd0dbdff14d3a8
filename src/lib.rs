#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod auto_place;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod placement;
pub mod prelude;
mod snapshot;
#[cfg(feature = "std")]
pub mod storage;
#[cfg(feature = "std")]
pub mod ui;
mod unit;

pub use auto_place::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
pub use placement::*;
pub use snapshot::*;
pub use unit::*;

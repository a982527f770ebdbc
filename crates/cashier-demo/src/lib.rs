//! # cashier-demo
//!
//! Terminal front end for the hosted cashier demo.
//!
//! This crate provides:
//! - Command-line arguments and form overrides (`cli`)
//! - Wiring of configuration, requester, and launcher (`state`)
//! - Terminal rendering of the form and notifications (`view`)

pub mod cli;
pub mod state;
pub mod view;

pub use cli::{Cli, LauncherKind};
pub use state::App;

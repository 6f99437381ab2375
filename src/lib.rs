//! # Code Breaker
//!
//! A terminal vault-hacking puzzle. The player edits a fixed row of digit
//! slots with insert, delete, and search operations, racing a countdown to
//! make a randomly generated target pattern appear contiguously in the
//! sequence. Matching is done on the compacted view, so gaps between digits
//! never block a win.
//!
//! ## Modules
//!
//! - [`game`] — Core engine: slot sequence, pattern matching, scoring, round state machine
//! - [`ui`] — Terminal UI: prompt-driven play view with staged search replay
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;

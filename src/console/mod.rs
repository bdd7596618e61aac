//! # Console Front End
//!
//! Thin interactive layer over [`crate::social::SocialStore`]: numbered menus,
//! field prompts and rendered results. It owns no social state of its own.
//!
//! - [`session`] - Who is logged in and which prompt is active
//! - [`commands`] - Turns one input line into at most one store operation
//! - [`terminal`] - Reads lines, prints prompts and applies console pacing
//!
//! ```text
//! ┌─────────────────┐
//! │  terminal::run  │ ← stdin/stdout, pacing, hidden password input
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │ CommandProcessor│ ← menu state machine, rendering
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  SocialStore    │ ← accounts, friends, mailboxes, groups
//! └─────────────────┘
//! ```

pub mod commands;
pub mod session;
pub mod terminal;

pub use commands::CommandProcessor;
pub use session::{Session, SessionState};

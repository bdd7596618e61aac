//! # Zingle - In-Memory Social Graph
//!
//! Zingle keeps a small social network entirely in memory: registered
//! accounts, a symmetric friendship graph, per-account mailboxes and named
//! groups with broadcast messaging. Nothing is persisted; a process run is a
//! session.
//!
//! ## Features
//!
//! - **Account Directory**: Unique usernames, hash-map lookup, plaintext or Argon2id credentials.
//! - **Friendship Graph**: Undirected edges kept consistent on both ends.
//! - **Mailboxes**: Arrival-ordered, with message bodies obfuscated by a sender-keyed XOR.
//! - **Groups**: A bounded registry of groups with membership and fan-out broadcast.
//! - **Console**: Numbered menus driven over stdin/stdout with optional pacing.
//!
//! ## Quick Start
//!
//! ```rust
//! use zingle::social::SocialStore;
//!
//! let mut store = SocialStore::new();
//! store.register("alice", "pw1").unwrap();
//! store.register("bob", "pw2").unwrap();
//! store.create_group("alice", "g1").unwrap();
//! store.join_group("g1", "bob").unwrap();
//! store.send_group_message("alice", "g1", "hello").unwrap();
//!
//! assert_eq!(store.read_mailbox("bob").unwrap()[0].pair(), ("alice", "hello"));
//! ```
//!
//! ## Module Organization
//!
//! - [`social`] - The store: accounts, graph, mailboxes, cipher and groups
//! - [`console`] - Interactive menus over the store
//! - [`config`] - TOML configuration (limits, security, console, logging)
//! - [`validation`] - Identifier, password and message-body checks
//! - [`logutil`] - Log-safe escaping helpers

pub mod config;
pub mod console;
pub mod logutil;
pub mod social;
pub mod validation;

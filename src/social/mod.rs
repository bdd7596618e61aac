//! # Social Core
//!
//! In-memory social graph: an account directory, a symmetric friendship graph,
//! per-account mailboxes with sender-keyed obfuscation, and a bounded registry
//! of broadcast groups.
//!
//! ## Components
//!
//! - [`store`] - [`SocialStore`], the account directory and owner of all state
//! - [`account`] - Account records and credential storage (plaintext or Argon2id)
//! - [`graph`] - Friend edges, always updated on both ends
//! - [`mailbox`] - Messages, mailboxes and direct delivery
//! - [`cipher`] - Repeating-key XOR obfuscation keyed by the sender's username
//! - [`group`] - Groups, membership and broadcast fan-out
//! - [`errors`] - [`SocialError`]
//!
//! ## Usage
//!
//! ```rust
//! use zingle::social::SocialStore;
//!
//! let mut store = SocialStore::new();
//! store.register("alice", "pw1").unwrap();
//! store.register("bob", "pw2").unwrap();
//! store.add_friend("alice", "bob").unwrap();
//! store.send_direct_message("alice", "bob", "hi").unwrap();
//!
//! let inbox = store.read_mailbox("bob").unwrap();
//! assert_eq!(inbox[0].pair(), ("alice", "hi"));
//! ```
//!
//! ## Ownership
//!
//! Every account lives in a single map entry together with its graph node, so
//! the two can never drift apart. Group broadcasts deliver independent copies
//! of the sealed message to each member's mailbox; nothing is shared between
//! containers.

pub mod account;
pub mod cipher;
pub mod errors;
pub mod graph;
pub mod group;
pub mod mailbox;
pub mod store;

pub use account::{Account, Credential, PasswordStorage};
pub use errors::{RecordKind, SocialError};
pub use graph::GraphNode;
pub use group::{Group, GroupRegistry};
pub use mailbox::{Mailbox, Message, ReceivedMessage};
pub use store::{AccountRecord, SocialStore, SocialStoreBuilder};

use thiserror::Error;

use crate::validation::ValidationError;

/// Which kind of named record a uniqueness conflict refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Account,
    Group,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Account => write!(f, "Username"),
            RecordKind::Group => write!(f, "Group"),
        }
    }
}

/// Errors returned by [`crate::social::SocialStore`] operations.
///
/// Every variant is an expected, recoverable outcome; the caller decides how
/// to present it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialError {
    /// Registration or group creation with a name already in use.
    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: RecordKind, name: String },

    /// The named account is not registered.
    #[error("User '{0}' doesn't exist")]
    NotFound(String),

    /// Direct message addressed to an unregistered account.
    #[error("Receiver '{0}' not found")]
    RecipientNotFound(String),

    #[error("Group '{0}' does not exist")]
    GroupNotFound(String),

    #[error("Maximum group limit reached ({max})")]
    GroupLimitReached { max: usize },

    #[error("Maximum account limit reached ({max})")]
    DirectoryFull { max: usize },

    #[error("You are already friends with {0}")]
    AlreadyFriends(String),

    #[error("'{0}' is not in your friend list")]
    NotFriends(String),

    #[error("You cannot add yourself as a friend")]
    SelfFriendship,

    #[error("User '{username}' is already a member of group '{group}'")]
    AlreadyMember { group: String, username: String },

    #[error("'{username}' is not a member of group '{group}'")]
    NotAMember { group: String, username: String },

    /// Input rejected before any state was touched.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Password hashing failed while registering.
    #[error("password hash failure: {0}")]
    Credential(String),
}

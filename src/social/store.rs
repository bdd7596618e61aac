//! The account directory and the store object that owns all social state.

use std::collections::HashMap;

use log::info;

use super::account::{Account, PasswordStorage};
use super::errors::{RecordKind, SocialError};
use super::graph::GraphNode;
use super::group::GroupRegistry;
use crate::config::{Config, LimitsConfig};
use crate::logutil::escape_log;
use crate::validation::{validate_password, validate_username};

/// An account and its graph node, created together and never separated.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub account: Account,
    pub node: GraphNode,
}

/// Builder so tests and the binary can tune limits and policies without
/// touching a config file.
#[derive(Debug, Clone, Default)]
pub struct SocialStoreBuilder {
    limits: LimitsConfig,
    passwords: PasswordStorage,
    require_registered_members: bool,
}

impl SocialStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take limits and policies from a loaded [`Config`].
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let passwords = if config.security.hash_passwords {
            PasswordStorage::argon2(config.security.argon2_params()?)
        } else {
            PasswordStorage::Plaintext
        };
        Ok(Self {
            limits: config.limits,
            passwords,
            require_registered_members: config.groups.require_registered_members,
        })
    }

    pub fn limits(mut self, limits: LimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_accounts(mut self, max: usize) -> Self {
        self.limits.max_accounts = max;
        self
    }

    pub fn max_groups(mut self, max: usize) -> Self {
        self.limits.max_groups = max;
        self
    }

    pub fn password_storage(mut self, passwords: PasswordStorage) -> Self {
        self.passwords = passwords;
        self
    }

    /// Only allow registered accounts to be added to groups.
    pub fn require_registered_members(mut self, required: bool) -> Self {
        self.require_registered_members = required;
        self
    }

    pub fn build(self) -> SocialStore {
        SocialStore {
            accounts: HashMap::new(),
            groups: GroupRegistry::new(self.limits.max_groups),
            limits: self.limits,
            passwords: self.passwords,
            require_registered_members: self.require_registered_members,
        }
    }
}

/// All process state: accounts with their graph nodes, and the group registry.
///
/// Operations are grouped by concern across `store`, `graph`, `mailbox` and
/// `group`; they all take the store by reference, so only one runs at a time.
#[derive(Debug, Clone)]
pub struct SocialStore {
    accounts: HashMap<String, AccountRecord>,
    pub(crate) groups: GroupRegistry,
    limits: LimitsConfig,
    passwords: PasswordStorage,
    require_registered_members: bool,
}

impl Default for SocialStore {
    fn default() -> Self {
        SocialStoreBuilder::new().build()
    }
}

impl SocialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SocialStoreBuilder {
        SocialStoreBuilder::new()
    }

    pub fn limits(&self) -> &LimitsConfig {
        &self.limits
    }

    pub(crate) fn requires_registered_members(&self) -> bool {
        self.require_registered_members
    }

    pub(crate) fn node(&self, username: &str) -> Option<&GraphNode> {
        self.accounts.get(username).map(|r| &r.node)
    }

    pub(crate) fn node_mut(&mut self, username: &str) -> Option<&mut GraphNode> {
        self.accounts.get_mut(username).map(|r| &mut r.node)
    }

    pub fn record(&self, username: &str) -> Option<&AccountRecord> {
        self.accounts.get(username)
    }

    /// True iff an account named `username` is registered.
    pub fn exists(&self, username: &str) -> bool {
        self.accounts.contains_key(username)
    }

    /// Register a new account together with its empty graph node.
    ///
    /// Every check runs before anything is inserted, so a failed call leaves the
    /// directory untouched.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), SocialError> {
        validate_username(username, &self.limits)?;
        validate_password(password, &self.limits)?;
        if self.exists(username) {
            return Err(SocialError::AlreadyExists {
                kind: RecordKind::Account,
                name: username.to_string(),
            });
        }
        if self.accounts.len() >= self.limits.max_accounts {
            return Err(SocialError::DirectoryFull {
                max: self.limits.max_accounts,
            });
        }
        let credential = self.passwords.seal(password)?;
        let record = AccountRecord {
            account: Account::new(username, credential),
            node: GraphNode::default(),
        };
        self.accounts.insert(username.to_string(), record);
        info!(
            "account.register user={} total={}",
            escape_log(username),
            self.accounts.len()
        );
        Ok(())
    }

    /// True iff `username` exists and `password` matches its stored credential.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .map(|r| r.account.password_matches(password))
            .unwrap_or(false)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Registered usernames in lexical order.
    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.accounts.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn register_pairs_account_and_node() {
        let mut store = SocialStore::new();
        store.register("alice", "pw1").unwrap();
        let record = store.record("alice").unwrap();
        assert_eq!(record.account.username(), "alice");
        assert_eq!(record.node.friend_count(), 0);
        assert!(record.node.mailbox().is_empty());
    }

    #[test]
    fn failed_registration_leaves_no_trace() {
        let mut store = SocialStore::builder().max_accounts(1).build();
        assert!(matches!(
            store.register("", "pw"),
            Err(SocialError::Invalid(ValidationError::Empty { .. }))
        ));
        assert!(matches!(
            store.register("alice", ""),
            Err(SocialError::Invalid(ValidationError::EmptyPassword))
        ));
        assert_eq!(store.account_count(), 0);

        store.register("alice", "pw").unwrap();
        assert_eq!(
            store.register("bob", "pw"),
            Err(SocialError::DirectoryFull { max: 1 })
        );
        assert!(!store.exists("bob"));
        assert!(store.node("bob").is_none());
    }

    #[test]
    fn authenticate_requires_exact_match() {
        let mut store = SocialStore::new();
        store.register("alice", "pw1").unwrap();
        assert!(store.authenticate("alice", "pw1"));
        assert!(!store.authenticate("alice", "pw2"));
        assert!(!store.authenticate("Alice", "pw1"));
        assert!(!store.authenticate("nobody", "pw1"));
    }

    #[test]
    fn usernames_are_sorted() {
        let mut store = SocialStore::new();
        for name in ["carol", "alice", "bob"] {
            store.register(name, "pw").unwrap();
        }
        assert_eq!(store.usernames(), vec!["alice", "bob", "carol"]);
    }
}

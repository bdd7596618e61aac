//! Named groups with membership and broadcast messaging.
//!
//! A group keeps its own log (newest first) and fans every broadcast out to the
//! personal mailbox of each other member. The fan-out reuses the sealed bytes
//! of the log entry, so each recipient opens it with the same sender key.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use log::{debug, info};

use super::errors::{RecordKind, SocialError};
use super::mailbox::{Message, ReceivedMessage};
use super::store::SocialStore;
use crate::logutil::{body_summary, escape_log};
use crate::validation::{validate_group_name, validate_message_body, validate_username};

#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    founder: String,
    /// Most recently added member first; the founder ends up last.
    members: VecDeque<String>,
    /// Most recent message first.
    log: VecDeque<Message>,
    created_at: DateTime<Utc>,
}

impl Group {
    fn new(founder: &str, name: &str) -> Self {
        let mut members = VecDeque::new();
        members.push_front(founder.to_string());
        Group {
            name: name.to_string(),
            founder: founder.to_string(),
            members,
            log: VecDeque::new(),
            created_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn founder(&self) -> &str {
        &self.founder
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(String::as_str)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    /// De-obfuscated log, newest first.
    pub fn read_log(&self) -> Vec<ReceivedMessage> {
        self.log.iter().map(Message::open).collect()
    }
}

/// Bounded set of groups keyed by name.
#[derive(Debug, Clone)]
pub struct GroupRegistry {
    groups: BTreeMap<String, Group>,
    max_groups: usize,
}

impl GroupRegistry {
    pub fn new(max_groups: usize) -> Self {
        GroupRegistry {
            groups: BTreeMap::new(),
            max_groups,
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn max_groups(&self) -> usize {
        self.max_groups
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Group names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Group, SocialError> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| SocialError::GroupNotFound(name.to_string()))
    }

    /// Create `name` with `founder` as its only member.
    pub fn create(&mut self, founder: &str, name: &str) -> Result<(), SocialError> {
        if self.groups.contains_key(name) {
            return Err(SocialError::AlreadyExists {
                kind: RecordKind::Group,
                name: name.to_string(),
            });
        }
        if self.groups.len() >= self.max_groups {
            return Err(SocialError::GroupLimitReached {
                max: self.max_groups,
            });
        }
        self.groups
            .insert(name.to_string(), Group::new(founder, name));
        Ok(())
    }

    pub fn add_member(&mut self, name: &str, username: &str) -> Result<(), SocialError> {
        let group = self.get_mut(name)?;
        if group.is_member(username) {
            return Err(SocialError::AlreadyMember {
                group: name.to_string(),
                username: username.to_string(),
            });
        }
        group.members.push_front(username.to_string());
        Ok(())
    }

    /// Record `message` in the group log and return the members who should get a copy.
    fn post(&mut self, name: &str, message: Message) -> Result<Vec<String>, SocialError> {
        let group = self.get_mut(name)?;
        if !group.is_member(message.sender()) {
            return Err(SocialError::NotAMember {
                group: name.to_string(),
                username: message.sender().to_string(),
            });
        }
        let recipients = group
            .members
            .iter()
            .filter(|m| m.as_str() != message.sender())
            .cloned()
            .collect();
        group.log.push_front(message);
        Ok(recipients)
    }
}

impl SocialStore {
    /// Create a group founded by `founder`.
    pub fn create_group(&mut self, founder: &str, name: &str) -> Result<(), SocialError> {
        validate_username(founder, self.limits())?;
        validate_group_name(name, self.limits())?;
        self.groups.create(founder, name)?;
        info!(
            "group.create name={} founder={} total={}",
            escape_log(name),
            escape_log(founder),
            self.groups.len()
        );
        Ok(())
    }

    /// Add `username` to group `name`.
    ///
    /// Unless the store was built with `require_registered_members`, the username
    /// is not checked against the account directory.
    pub fn join_group(&mut self, name: &str, username: &str) -> Result<(), SocialError> {
        if self.groups.get(name).is_none() {
            return Err(SocialError::GroupNotFound(name.to_string()));
        }
        validate_username(username, self.limits())?;
        if self.requires_registered_members() && !self.exists(username) {
            return Err(SocialError::NotFound(username.to_string()));
        }
        self.groups.add_member(name, username)?;
        debug!("group.join name={} user={}", escape_log(name), escape_log(username));
        Ok(())
    }

    /// Broadcast `text` from `sender` to group `name`.
    ///
    /// The message is sealed once, prepended to the group log, and a copy of the
    /// sealed bytes is delivered to every other member that has an account.
    /// Returns the number of mailbox deliveries made.
    pub fn send_group_message(
        &mut self,
        sender: &str,
        name: &str,
        text: &str,
    ) -> Result<usize, SocialError> {
        validate_message_body(text, self.limits())?;
        let sealed = Message::seal(sender, text);
        let recipients = self.groups.post(name, sealed.clone())?;

        let mut delivered = 0;
        for recipient in &recipients {
            match self.deliver(recipient, sealed.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => debug!(
                    "group.broadcast name={} skipping unregistered member {}",
                    escape_log(name),
                    escape_log(recipient)
                ),
            }
        }
        debug!(
            "group.broadcast name={} from={} body={} delivered={}/{}",
            escape_log(name),
            escape_log(sender),
            body_summary(sealed.body()),
            delivered,
            recipients.len()
        );
        Ok(delivered)
    }

    /// Group log for `name`, newest first.
    pub fn read_group_log(&self, name: &str) -> Result<Vec<ReceivedMessage>, SocialError> {
        self.groups
            .get(name)
            .map(Group::read_log)
            .ok_or_else(|| SocialError::GroupNotFound(name.to_string()))
    }

    /// Members of `name`, most recently added first.
    pub fn group_members(&self, name: &str) -> Result<Vec<String>, SocialError> {
        self.groups
            .get(name)
            .map(|g| g.members().map(str::to_string).collect())
            .ok_or_else(|| SocialError::GroupNotFound(name.to_string()))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.names().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn founder_is_first_member() {
        let mut registry = GroupRegistry::new(2);
        registry.create("alice", "g1").unwrap();
        let group = registry.get("g1").unwrap();
        assert_eq!(group.founder(), "alice");
        assert_eq!(group.members().collect::<Vec<_>>(), vec!["alice"]);
        assert!(group.read_log().is_empty());
    }

    #[test]
    fn duplicate_name_reported_before_capacity() {
        let mut registry = GroupRegistry::new(1);
        registry.create("alice", "g1").unwrap();
        assert_eq!(
            registry.create("bob", "g1"),
            Err(SocialError::AlreadyExists {
                kind: RecordKind::Group,
                name: "g1".into()
            })
        );
        assert_eq!(
            registry.create("bob", "g2"),
            Err(SocialError::GroupLimitReached { max: 1 })
        );
    }

    #[test]
    fn post_requires_membership_and_excludes_sender() {
        let mut registry = GroupRegistry::new(4);
        registry.create("alice", "g1").unwrap();
        registry.add_member("g1", "bob").unwrap();
        registry.add_member("g1", "carol").unwrap();

        let recipients = registry.post("g1", Message::seal("alice", "hi")).unwrap();
        assert_eq!(recipients, vec!["carol".to_string(), "bob".to_string()]);

        let err = registry.post("g1", Message::seal("mallory", "hi")).unwrap_err();
        assert!(matches!(err, SocialError::NotAMember { .. }));
        assert_eq!(registry.get("g1").unwrap().log_len(), 1);
    }

    #[test]
    fn log_is_newest_first() {
        let mut registry = GroupRegistry::new(1);
        registry.create("alice", "g1").unwrap();
        registry.post("g1", Message::seal("alice", "one")).unwrap();
        registry.post("g1", Message::seal("alice", "two")).unwrap();
        let log = registry.get("g1").unwrap().read_log();
        assert_eq!(log[0].pair(), ("alice", "two"));
        assert_eq!(log[1].pair(), ("alice", "one"));
    }
}

//! Friendship graph: one node per account, undirected edges stored on both ends.

use std::collections::VecDeque;

use log::debug;

use super::errors::SocialError;
use super::mailbox::Mailbox;
use super::store::SocialStore;
use crate::logutil::escape_log;

/// Per-account adjacency list and mailbox.
#[derive(Debug, Clone, Default)]
pub struct GraphNode {
    /// Most recently added friend first.
    friends: VecDeque<String>,
    pub(crate) mailbox: Mailbox,
}

impl GraphNode {
    pub fn is_friend(&self, username: &str) -> bool {
        self.friends.iter().any(|f| f == username)
    }

    pub fn friends(&self) -> impl Iterator<Item = &str> {
        self.friends.iter().map(String::as_str)
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    fn link(&mut self, username: &str) {
        self.friends.push_front(username.to_string());
    }

    fn unlink(&mut self, username: &str) -> bool {
        match self.friends.iter().position(|f| f == username) {
            Some(idx) => {
                self.friends.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl SocialStore {
    /// Make `user` and `friend` friends. Both ends are updated or neither is.
    pub fn add_friend(&mut self, user: &str, friend: &str) -> Result<(), SocialError> {
        let node = self
            .node(user)
            .ok_or_else(|| SocialError::NotFound(user.to_string()))?;
        if !self.exists(friend) {
            return Err(SocialError::NotFound(friend.to_string()));
        }
        if user == friend {
            return Err(SocialError::SelfFriendship);
        }
        if node.is_friend(friend) {
            return Err(SocialError::AlreadyFriends(friend.to_string()));
        }

        // Both nodes were resolved above; nothing below can fail.
        if let Some(node) = self.node_mut(user) {
            node.link(friend);
        }
        if let Some(node) = self.node_mut(friend) {
            node.link(user);
        }
        debug!("friend.add {} <-> {}", escape_log(user), escape_log(friend));
        Ok(())
    }

    /// Remove the edge between `user` and `friend` on both ends.
    pub fn remove_friend(&mut self, user: &str, friend: &str) -> Result<(), SocialError> {
        let node = self
            .node(user)
            .ok_or_else(|| SocialError::NotFound(user.to_string()))?;
        if !self.exists(friend) {
            return Err(SocialError::NotFound(friend.to_string()));
        }
        if !node.is_friend(friend) {
            return Err(SocialError::NotFriends(friend.to_string()));
        }

        if let Some(node) = self.node_mut(user) {
            node.unlink(friend);
        }
        if let Some(node) = self.node_mut(friend) {
            node.unlink(user);
        }
        debug!("friend.remove {} <-> {}", escape_log(user), escape_log(friend));
        Ok(())
    }

    /// Friends of `username`, most recently added first.
    pub fn list_friends(&self, username: &str) -> Result<Vec<String>, SocialError> {
        self.node(username)
            .map(|node| node.friends().map(str::to_string).collect())
            .ok_or_else(|| SocialError::NotFound(username.to_string()))
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.node(a).map(|node| node.is_friend(b)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_prepends_and_unlink_removes() {
        let mut node = GraphNode::default();
        node.link("bob");
        node.link("carol");
        assert_eq!(node.friends().collect::<Vec<_>>(), vec!["carol", "bob"]);
        assert!(node.unlink("bob"));
        assert!(!node.unlink("bob"));
        assert_eq!(node.friend_count(), 1);
        assert!(node.is_friend("carol"));
        assert!(!node.is_friend("bob"));
    }
}

//! Command processing for the numbered console menus.
//!
//! [CommandProcessor::process] takes one line of input, advances the
//! [Session] state machine and, when a command has all of its fields, calls
//! exactly one [SocialStore] operation. The rendered result is returned as a
//! string; the driver prints it followed by the next [Session::prompt].
//!
//! Menus mirror the classic terminal client: `1 Login / 2 Register / 3 Exit`
//! when logged out, and ten numbered commands once logged in.
use log::{info, warn};

use super::session::{Session, SessionState};
use crate::logutil::escape_log;
use crate::social::{ReceivedMessage, SocialError, SocialStore};

/// Strip the line terminator only; message bodies and passwords keep their spaces.
fn strip_line_ending(input: &str) -> &str {
    input.trim_end_matches(['\n', '\r'])
}

fn render_error(err: &SocialError) -> String {
    format!("Error: {}.", err)
}

fn render_messages(header: String, empty: String, messages: &[ReceivedMessage]) -> String {
    let mut out = header;
    if messages.is_empty() {
        out.push('\n');
        out.push_str(&empty);
        return out;
    }
    for m in messages {
        out.push('\n');
        out.push_str(&format!("From {}: {}", m.sender, m.text));
    }
    out
}

/// Processes console input lines
#[derive(Debug, Default)]
pub struct CommandProcessor;

impl CommandProcessor {
    pub fn new() -> Self {
        CommandProcessor
    }

    /// Handle one input line and return the text to show the user.
    pub fn process(&self, session: &mut Session, input: &str, store: &mut SocialStore) -> String {
        session.update_activity();
        let raw = strip_line_ending(input);
        match session.state {
            SessionState::Welcome => self.handle_welcome(session, raw.trim()),
            SessionState::LoginUsername | SessionState::RegisterUsername => {
                session.pending_input = Some(raw.trim().to_string());
                session.state = if session.state == SessionState::LoginUsername {
                    SessionState::LoginPassword
                } else {
                    SessionState::RegisterPassword
                };
                String::new()
            }
            SessionState::LoginPassword => self.handle_login(session, raw, store),
            SessionState::RegisterPassword => self.handle_register(session, raw, store),
            SessionState::Home => self.handle_home(session, raw.trim(), store),
            SessionState::Exited => String::new(),
            _ => self.handle_field(session, raw, store),
        }
    }

    fn handle_welcome(&self, session: &mut Session, choice: &str) -> String {
        match choice {
            "1" => {
                session.reset_to(SessionState::LoginUsername);
                String::new()
            }
            "2" => {
                session.reset_to(SessionState::RegisterUsername);
                String::new()
            }
            "3" => {
                session.reset_to(SessionState::Exited);
                "Goodbye!".into()
            }
            "" => String::new(),
            _ => "Invalid choice!".into(),
        }
    }

    fn handle_login(&self, session: &mut Session, password: &str, store: &SocialStore) -> String {
        let username = session.pending_input.take().unwrap_or_default();
        if store.authenticate(&username, password) {
            info!(target: "zingle::session", "login ok user={}", escape_log(&username));
            session.login(username);
            "Login successful!".into()
        } else {
            warn!(target: "security", "failed login user={}", escape_log(&username));
            session.reset_to(SessionState::Welcome);
            "Invalid username or password!".into()
        }
    }

    fn handle_register(
        &self,
        session: &mut Session,
        password: &str,
        store: &mut SocialStore,
    ) -> String {
        let username = session.pending_input.take().unwrap_or_default();
        session.reset_to(SessionState::Welcome);
        match store.register(&username, password) {
            Ok(()) => "User registered successfully!".into(),
            Err(e) => render_error(&e),
        }
    }

    fn handle_home(&self, session: &mut Session, choice: &str, store: &SocialStore) -> String {
        let Some(user) = session.username.clone() else {
            session.reset_to(SessionState::Welcome);
            return "Please log in first.".into();
        };
        let next = match choice {
            "1" => SessionState::AddFriend,
            "2" => SessionState::RemoveFriend,
            "3" => SessionState::MessageRecipient,
            "4" => return self.display_friends(&user, store),
            "5" => return self.display_messages(&user, store),
            "6" => SessionState::CreateGroup,
            "7" => SessionState::JoinGroupName,
            "8" => SessionState::GroupMessageName,
            "9" => SessionState::ReadGroupLog,
            "10" => {
                info!(target: "zingle::session", "logout user={}", escape_log(&user));
                session.logout();
                return "Logged out.".into();
            }
            "" => return String::new(),
            _ => return "Invalid choice!".into(),
        };
        session.reset_to(next);
        String::new()
    }

    /// Second-level prompts. Every branch ends back at `Home` unless it needs
    /// another field.
    fn handle_field(&self, session: &mut Session, raw: &str, store: &mut SocialStore) -> String {
        let Some(user) = session.username.clone() else {
            session.reset_to(SessionState::Welcome);
            return "Please log in first.".into();
        };
        let field = raw.trim();
        let state = session.state;
        match state {
            SessionState::MessageRecipient => {
                session.pending_input = Some(field.to_string());
                session.state = SessionState::MessageBody;
                return String::new();
            }
            SessionState::JoinGroupName => {
                session.pending_input = Some(field.to_string());
                session.state = SessionState::JoinGroupUser;
                return String::new();
            }
            SessionState::GroupMessageName => {
                session.pending_input = Some(field.to_string());
                session.state = SessionState::GroupMessageBody;
                return String::new();
            }
            _ => {}
        }

        let pending = session.pending_input.take().unwrap_or_default();
        session.reset_to(SessionState::Home);
        match state {
            SessionState::AddFriend => match store.add_friend(&user, field) {
                Ok(()) => format!("{} and {} are now friends!", user, field),
                Err(e) => render_error(&e),
            },
            SessionState::RemoveFriend => match store.remove_friend(&user, field) {
                Ok(()) => format!("{} and {} are no longer friends.", user, field),
                Err(e) => render_error(&e),
            },
            SessionState::MessageBody => {
                match store.send_direct_message(&user, &pending, raw) {
                    Ok(()) => format!("Message sent to {}", pending),
                    Err(e) => render_error(&e),
                }
            }
            SessionState::CreateGroup => match store.create_group(&user, field) {
                Ok(()) => format!("Group '{}' created successfully!", field),
                Err(e) => render_error(&e),
            },
            SessionState::JoinGroupUser => match store.join_group(&pending, field) {
                Ok(()) => format!("User '{}' added to group '{}'.", field, pending),
                Err(e) => render_error(&e),
            },
            SessionState::GroupMessageBody => {
                match store.send_group_message(&user, &pending, raw) {
                    Ok(_) => format!("Group message sent to '{}'.", pending),
                    Err(e) => render_error(&e),
                }
            }
            SessionState::ReadGroupLog => match store.read_group_log(field) {
                Ok(log) => render_messages(
                    format!("Messages in group '{}':", field),
                    format!("No messages in group '{}'.", field),
                    &log,
                ),
                Err(e) => render_error(&e),
            },
            _ => String::new(),
        }
    }

    fn display_friends(&self, user: &str, store: &SocialStore) -> String {
        match store.list_friends(user) {
            Ok(friends) => {
                let mut out = format!("Friends of {}:", user);
                if friends.is_empty() {
                    out.push_str("\nNo friends found.");
                }
                for f in friends {
                    out.push('\n');
                    out.push_str(&f);
                }
                out
            }
            Err(e) => render_error(&e),
        }
    }

    fn display_messages(&self, user: &str, store: &SocialStore) -> String {
        match store.read_mailbox(user) {
            Ok(messages) => render_messages(
                format!("Messages for {}:", user),
                "No messages found.".into(),
                &messages,
            ),
            Err(e) => render_error(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(
        processor: &CommandProcessor,
        session: &mut Session,
        store: &mut SocialStore,
        lines: &[&str],
    ) -> Vec<String> {
        lines
            .iter()
            .map(|l| processor.process(session, l, store))
            .collect()
    }

    #[test]
    fn strip_line_ending_keeps_inner_spaces() {
        assert_eq!(strip_line_ending("  hi there \r\n"), "  hi there ");
    }

    #[test]
    fn invalid_welcome_choice() {
        let p = CommandProcessor::new();
        let mut s = Session::new();
        let mut store = SocialStore::new();
        assert_eq!(p.process(&mut s, "9", &mut store), "Invalid choice!");
        assert_eq!(s.state, SessionState::Welcome);
    }

    #[test]
    fn register_then_login() {
        let p = CommandProcessor::new();
        let mut s = Session::new();
        let mut store = SocialStore::new();
        let out = feed(&p, &mut s, &mut store, &["2", "alice", "pw1"]);
        assert_eq!(out[2], "User registered successfully!");
        assert_eq!(s.state, SessionState::Welcome);

        let out = feed(&p, &mut s, &mut store, &["2", "alice", "pw9"]);
        assert_eq!(out[2], "Error: Username 'alice' already exists.");

        let out = feed(&p, &mut s, &mut store, &["1", "alice", "wrong"]);
        assert_eq!(out[2], "Invalid username or password!");
        assert!(!s.is_logged_in());

        let out = feed(&p, &mut s, &mut store, &["1", "alice", "pw1"]);
        assert_eq!(out[2], "Login successful!");
        assert_eq!(s.username.as_deref(), Some("alice"));
        assert_eq!(s.state, SessionState::Home);
    }

    #[test]
    fn home_commands_require_login() {
        let p = CommandProcessor::new();
        let mut s = Session::new();
        let mut store = SocialStore::new();
        s.state = SessionState::Home;
        assert_eq!(p.process(&mut s, "4", &mut store), "Please log in first.");
        assert_eq!(s.state, SessionState::Welcome);
    }

    #[test]
    fn logout_returns_to_welcome() {
        let p = CommandProcessor::new();
        let mut s = Session::new();
        let mut store = SocialStore::new();
        store.register("alice", "pw1").unwrap();
        feed(&p, &mut s, &mut store, &["1", "alice", "pw1"]);
        assert_eq!(p.process(&mut s, "10", &mut store), "Logged out.");
        assert_eq!(s.state, SessionState::Welcome);
        assert!(!s.is_logged_in());
    }
}

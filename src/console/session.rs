use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// # Console Session
///
/// Tracks one person at the terminal: who is logged in, which menu or prompt
/// they are looking at, and any field collected earlier in a multi-step
/// command.
///
/// ## Session Lifecycle
///
/// 1. **Welcome** - logged out; choose Login, Register or Exit
/// 2. **LoginUsername / LoginPassword** - collecting credentials
/// 3. **Home** - logged in; the numbered command menu
/// 4. One prompt state per command field (e.g. `MessageRecipient` then `MessageBody`)
/// 5. **Exited** - the driver stops reading input
///
/// ```rust
/// use zingle::console::session::{Session, SessionState};
///
/// let session = Session::new();
/// assert_eq!(session.state, SessionState::Welcome);
/// assert!(session.username.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub state: SessionState,
    /// First field of a two-step command (recipient, group name, login username).
    pub pending_input: Option<String>,
    pub login_time: Option<DateTime<Utc>>,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionState {
    Welcome,
    LoginUsername,
    LoginPassword,
    RegisterUsername,
    RegisterPassword,
    Home,
    AddFriend,
    RemoveFriend,
    MessageRecipient,
    MessageBody,
    CreateGroup,
    JoinGroupName,
    JoinGroupUser,
    GroupMessageName,
    GroupMessageBody,
    ReadGroupLog,
    Exited,
}

const BANNER: &str = "\
==================================
|          \\     /               |
|           \\ _ /                |
|         --('v')--              |
|          ((   ))               |
|          --\"-\"--               |
|   Welcome to Zingle-Zingle     |
==================================
";

const WELCOME_MENU: &str = "1. Login\n2. New User Registration\n3. Exit\n\nYour Choice: ";

const HOME_MENU: &str = "1. Add Friend\n2. Remove Friend\n3. Message\n4. Display Friends\n5. Display Messages\n6. Create Group\n7. Add Member to Group\n8. Send Group Message\n9. Display Group Messages\n10. Logout\n";

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            username: None,
            state: SessionState::Welcome,
            pending_input: None,
            login_time: None,
            last_activity: Utc::now(),
        }
    }

    pub fn update_activity(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }

    pub fn login(&mut self, username: String) {
        self.username = Some(username);
        self.login_time = Some(Utc::now());
        self.pending_input = None;
        self.state = SessionState::Home;
    }

    pub fn logout(&mut self) {
        self.username = None;
        self.login_time = None;
        self.pending_input = None;
        self.state = SessionState::Welcome;
    }

    /// Move to `state`, dropping any half-collected input.
    pub fn reset_to(&mut self, state: SessionState) {
        self.pending_input = None;
        self.state = state;
    }

    /// Whether the next line is a password and should be read without echo.
    pub fn awaits_secret(&self) -> bool {
        matches!(
            self.state,
            SessionState::LoginPassword | SessionState::RegisterPassword
        )
    }

    pub fn is_exited(&self) -> bool {
        self.state == SessionState::Exited
    }

    /// Text to show before reading the next line.
    pub fn prompt(&self, config: &Config) -> String {
        match self.state {
            SessionState::Welcome => {
                if config.console.banner {
                    format!("{}{}", BANNER, WELCOME_MENU)
                } else {
                    WELCOME_MENU.to_string()
                }
            }
            SessionState::LoginUsername | SessionState::RegisterUsername => {
                "Enter username: ".into()
            }
            SessionState::LoginPassword | SessionState::RegisterPassword => {
                "Enter password: ".into()
            }
            SessionState::Home => HOME_MENU.to_string(),
            SessionState::AddFriend => "Enter friend's username: ".into(),
            SessionState::RemoveFriend => "Enter friend's username to remove: ".into(),
            SessionState::MessageRecipient => "Enter receiver's username: ".into(),
            SessionState::MessageBody | SessionState::GroupMessageBody => {
                "Enter message: ".into()
            }
            SessionState::CreateGroup
            | SessionState::JoinGroupName
            | SessionState::GroupMessageName
            | SessionState::ReadGroupLog => "Enter group name: ".into(),
            SessionState::JoinGroupUser => "Enter username to add: ".into(),
            SessionState::Exited => String::new(),
        }
    }
}

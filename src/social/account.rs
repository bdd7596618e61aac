//! Account records and credential handling.

use argon2::{Algorithm, Argon2, Params, Version};
use chrono::{DateTime, Utc};
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use super::errors::SocialError;

/// How new passwords are stored.
#[derive(Clone, Default)]
pub enum PasswordStorage {
    /// Keep the password verbatim and compare byte-for-byte.
    #[default]
    Plaintext,
    /// Keep an Argon2id PHC string with a random salt.
    Argon2(Argon2<'static>),
}

impl PasswordStorage {
    /// Argon2id with explicit parameters, or the library defaults.
    pub fn argon2(params: Option<Params>) -> Self {
        let argon2 = match params {
            Some(p) => Argon2::new(Algorithm::Argon2id, Version::V0x13, p),
            None => Argon2::default(),
        };
        PasswordStorage::Argon2(argon2)
    }

    pub(crate) fn seal(&self, password: &str) -> Result<Credential, SocialError> {
        match self {
            PasswordStorage::Plaintext => Ok(Credential::Plain(password.to_string())),
            PasswordStorage::Argon2(argon2) => {
                let salt = SaltString::generate(&mut rand::thread_rng());
                let hash = argon2
                    .hash_password(password.as_bytes(), &salt)
                    .map_err(|e| SocialError::Credential(e.to_string()))?;
                Ok(Credential::Argon2(hash.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for PasswordStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordStorage::Plaintext => write!(f, "Plaintext"),
            PasswordStorage::Argon2(_) => write!(f, "Argon2"),
        }
    }
}

/// A stored password. Each variant knows how to check itself, so accounts
/// created under one storage policy keep verifying if the policy changes.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Plain(String),
    Argon2(String),
}

impl Credential {
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Credential::Plain(stored) => stored.as_bytes() == candidate.as_bytes(),
            Credential::Argon2(phc) => match PasswordHash::new(phc) {
                Ok(parsed) => Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
        }
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Credential::Argon2(_))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Plain(_) => write!(f, "Credential::Plain(<redacted>)"),
            Credential::Argon2(_) => write!(f, "Credential::Argon2(<redacted>)"),
        }
    }
}

/// A registered identity. Never mutated after registration.
#[derive(Debug, Clone)]
pub struct Account {
    username: String,
    credential: Credential,
    registered_at: DateTime<Utc>,
}

impl Account {
    pub(crate) fn new(username: &str, credential: Credential) -> Self {
        Account {
            username: username.to_string(),
            credential,
            registered_at: Utc::now(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.credential.verify(candidate)
    }
}

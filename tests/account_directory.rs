//! Account directory: uniqueness, capacity and authentication.

use zingle::social::{RecordKind, SocialError, SocialStore};
use zingle::validation::ValidationError;

#[test]
fn duplicate_registration_is_rejected() {
    let mut store = SocialStore::new();
    store.register("alice", "pw1").expect("first registration");
    assert_eq!(store.account_count(), 1);

    let err = store.register("alice", "other").unwrap_err();
    assert_eq!(
        err,
        SocialError::AlreadyExists {
            kind: RecordKind::Account,
            name: "alice".into()
        }
    );
    assert_eq!(store.account_count(), 1);
    // the original password still works, the rejected one does not
    assert!(store.authenticate("alice", "pw1"));
    assert!(!store.authenticate("alice", "other"));
}

#[test]
fn usernames_are_case_sensitive() {
    let mut store = SocialStore::new();
    store.register("alice", "pw1").unwrap();
    store.register("Alice", "pw2").unwrap();
    assert_eq!(store.account_count(), 2);
    assert!(store.authenticate("Alice", "pw2"));
    assert!(!store.authenticate("Alice", "pw1"));
}

#[test]
fn directory_capacity_is_enforced() {
    let mut store = SocialStore::builder().max_accounts(3).build();
    for name in ["a1", "a2", "a3"] {
        store.register(name, "pw").unwrap();
    }
    assert_eq!(
        store.register("a4", "pw"),
        Err(SocialError::DirectoryFull { max: 3 })
    );
    assert!(!store.exists("a4"));
    assert!(store.read_mailbox("a4").is_err());
}

#[test]
fn oversized_identifiers_are_rejected() {
    let mut store = SocialStore::new();
    let long = "u".repeat(50);
    assert!(matches!(
        store.register(&long, "pw"),
        Err(SocialError::Invalid(ValidationError::TooLong { max: 49, .. }))
    ));
    assert!(matches!(
        store.register("bob", &"p".repeat(50)),
        Err(SocialError::Invalid(ValidationError::PasswordTooLong { max: 49 }))
    ));
    assert_eq!(store.account_count(), 0);
}

#[test]
fn unknown_user_never_authenticates() {
    let store = SocialStore::new();
    assert!(!store.exists("ghost"));
    assert!(!store.authenticate("ghost", ""));
}

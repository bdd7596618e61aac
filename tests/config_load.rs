use std::io::Write;

use zingle::config::Config;
use zingle::social::SocialStoreBuilder;

#[test]
fn load_partial_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[limits]\nmax_groups = 2\n\n[groups]\nrequire_registered_members = true\n"
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = tokio_test::block_on(Config::load(&path)).unwrap();
    assert_eq!(config.limits.max_groups, 2);
    assert_eq!(config.limits.max_message_bytes, 255);
    assert!(config.groups.require_registered_members);

    let mut store = SocialStoreBuilder::from_config(&config).unwrap().build();
    store.register("alice", "pw").unwrap();
    store.create_group("alice", "a").unwrap();
    store.create_group("alice", "b").unwrap();
    assert!(store.create_group("alice", "c").is_err());
    assert!(store.join_group("a", "ghost").is_err());
}

#[tokio::test]
async fn create_default_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();
    Config::create_default(path).await.unwrap();
    let config = Config::load(path).await.unwrap();
    assert_eq!(config.limits.max_accounts, 100);
    assert_eq!(config.limits.max_groups, 10);
    assert!(!config.security.hash_passwords);
}

#[tokio::test]
async fn invalid_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    tokio::fs::write(&path, "[limits]\nmax_accounts = 0\n")
        .await
        .unwrap();
    let err = Config::load(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("max_accounts"));

    let missing = dir.path().join("missing.toml");
    assert!(Config::load(missing.to_str().unwrap()).await.is_err());
}

#[test]
fn hashing_enabled_from_config() {
    let config: Config = toml::from_str(
        "[security]\nhash_passwords = true\n[security.argon2]\nmemory_kib = 8\ntime_cost = 1\nparallelism = 1\n",
    )
    .unwrap();
    let mut store = SocialStoreBuilder::from_config(&config).unwrap().build();
    store.register("alice", "pw").unwrap();
    assert!(store.record("alice").unwrap().account.credential().is_hashed());
    assert!(store.authenticate("alice", "pw"));
}

//! 密码哈希功能测试
//!
//! 测试 Argon2id 密码哈希和验证功能

use social_api::auth::password::PasswordHasher;
use std::sync::Arc;

mod common;
use common::create_test_config;

fn test_hasher() -> PasswordHasher {
    PasswordHasher::from_config(&create_test_config().security).expect("valid argon2 params")
}

#[test]
fn test_hash_embeds_configured_params() {
    let hash = test_hasher().hash("secret1").unwrap();

    assert!(hash.starts_with("$argon2id$v=19$"));
    assert!(hash.contains("m=1024,t=1,p=1"));
    assert!(!hash.contains("secret1"));
}

#[test]
fn test_verify_roundtrip_and_mismatch() {
    let hasher = test_hasher();
    let hash = hasher.hash("secret1").unwrap();

    assert!(hasher.verify("secret1", &hash).unwrap());
    assert!(!hasher.verify("Secret1", &hash).unwrap());
    assert!(!hasher.verify("secret1 ", &hash).unwrap());
}

#[test]
fn test_unicode_password() {
    let hasher = test_hasher();
    let hash = hasher.hash("密码🔐pässwörd").unwrap();

    assert!(hasher.verify("密码🔐pässwörd", &hash).unwrap());
    assert!(!hasher.verify("密码pässwörd", &hash).unwrap());
}

#[test]
fn test_malformed_stored_hash_is_server_error() {
    let err = test_hasher().verify("secret1", "not-a-phc-string").unwrap_err();
    assert_eq!(err.code(), 500);
}

#[tokio::test]
async fn test_hasher_shared_across_blocking_tasks() {
    let hasher = Arc::new(test_hasher());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let hasher = hasher.clone();
            tokio::task::spawn_blocking(move || {
                let password = format!("password-{}", i);
                let hash = hasher.hash(&password).unwrap();
                hasher.verify(&password, &hash).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn encrypt_then_decrypt_round_trips() {
    let crypto = FakeCryptoProvider::new();
    let key = b"k".to_vec();
    let ciphertext = crypto.encrypt_attachment(b"hello", &key).await.unwrap();
    assert_ne!(ciphertext, b"hello".to_vec());
    let plaintext = crypto.decrypt_attachment(&ciphertext, &key, b"digest", None).await.unwrap();
    assert_eq!(plaintext, b"hello".to_vec());
}

#[tokio::test]
async fn forced_error_applies_to_every_operation() {
    let crypto = FakeCryptoProvider::new();
    crypto.fail_with(CryptoError::Transient("provider down".into()));
    assert!(crypto.encrypt_attachment(b"x", b"k").await.is_err());
    assert!(crypto.decrypt_attachment(b"x", b"k", b"d", None).await.is_err());
}

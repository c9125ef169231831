//! Property-based tests for token encoding and validation
//!
//! These tests verify:
//! - Issued tokens roundtrip with subject and authorities intact
//! - Arbitrary input never panics and always classifies
//! - Signature tampering is always detected
//! - Short secrets are always rejected

mod common;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use common::test_config;
use proptest::prelude::*;
use tessera_auth_core::{
    ErrorKind, KeyError, SigningKey, TokenClaims, TokenCodec, TokenValidator,
};
use tessera_types::{Identity, TokenKind};

fn codec() -> TokenCodec {
    TokenCodec::new(test_config().signing_key().unwrap())
}

// ============================================================================
// Strategies
// ============================================================================

/// Generate identities with a handful of role names
fn arb_identity() -> impl Strategy<Value = Identity> {
    (
        "[a-z0-9_.+-]{1,20}@[a-z0-9-]{1,10}\\.[a-z]{2,4}",
        prop::collection::btree_set("ROLE_[A-Z]{1,10}", 1..4),
    )
        .prop_map(|(email, roles)| Identity::new(email, roles))
}

/// Generate strings that are not valid tokens for this key
fn arb_garbage_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_-]{0,60}",
        "[a-zA-Z0-9_-]{1,20}\\.[a-zA-Z0-9_-]{1,20}\\.[a-zA-Z0-9_-]{1,20}",
        "[!@#$%^&*()]{1,30}",
        any::<[u8; 32]>().prop_map(|bytes| {
            let part = URL_SAFE_NO_PAD.encode(bytes);
            format!("{part}.{part}.{part}")
        }),
        Just("..".to_string()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_access_token_roundtrip(identity in arb_identity(), ttl in 1i64..1_000_000) {
        let codec = codec();
        let claims = TokenClaims::for_identity(
            &identity,
            TokenKind::Access,
            Utc::now().timestamp(),
            ttl,
        );
        let token = codec.encode(&claims).unwrap();
        let decoded = TokenValidator::new(codec).validate(&token).unwrap();

        prop_assert_eq!(decoded.kind(), TokenKind::Access);
        prop_assert_eq!(decoded.identity(), identity);
    }

    #[test]
    fn prop_garbage_never_validates(token in arb_garbage_token()) {
        let validator = TokenValidator::new(codec());
        prop_assert!(validator.validate(&token).is_err());
    }

    #[test]
    fn prop_tampered_signature_detected(identity in arb_identity(), flip in 0usize..64) {
        let codec = codec();
        let token = codec
            .encode(&TokenClaims::for_identity(
                &identity,
                TokenKind::Access,
                Utc::now().timestamp(),
                60,
            ))
            .unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let mut sig = URL_SAFE_NO_PAD.decode(signature).unwrap();
        let idx = flip % sig.len();
        sig[idx] ^= 0x01;
        let tampered = format!("{head}.{}", URL_SAFE_NO_PAD.encode(&sig));

        let result = TokenValidator::new(codec).validate(&tampered);
        prop_assert_eq!(result, Err(ErrorKind::IncorrectSignature));
    }

    #[test]
    fn prop_short_keys_rejected(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let len = bytes.len();
        prop_assert_eq!(
            SigningKey::from_bytes(&bytes).unwrap_err(),
            KeyError::KeyTooShort { actual: len, minimum: 64 }
        );
    }

    #[test]
    fn prop_long_keys_accepted(bytes in prop::collection::vec(any::<u8>(), 64..128)) {
        prop_assert!(SigningKey::from_bytes(&bytes).is_ok());
    }
}

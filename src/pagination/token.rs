//! Continuation tokens
//!
//! A token is the cursor's JSON wire shape, base64url-encoded without
//! padding. With a secret configured the token becomes
//! `payload.signature`, where the signature is SHA-256 over
//! `secret || payload`, also base64url-encoded.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::cursor::Cursor;
use super::errors::{CursorError, CursorResult};

const SIGNATURE_SEPARATOR: char = '.';

/// Encodes and decodes opaque continuation tokens
#[derive(Debug, Clone, Default)]
pub struct CursorCodec {
    secret: Option<Vec<u8>>,
}

impl CursorCodec {
    /// Unsigned tokens
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed tokens; unsigned or tampered tokens are rejected on decode
    pub fn with_secret(secret: &[u8]) -> Self {
        Self {
            secret: Some(secret.to_vec()),
        }
    }

    /// Returns true if tokens are signed
    pub fn is_signed(&self) -> bool {
        self.secret.is_some()
    }

    /// Encodes a cursor as a token
    pub fn encode(&self, cursor: &Cursor) -> String {
        let payload = URL_SAFE_NO_PAD.encode(cursor.to_json_string());
        match &self.secret {
            Some(secret) => {
                let signature = sign(secret, &payload);
                format!("{}{}{}", payload, SIGNATURE_SEPARATOR, signature)
            }
            None => payload,
        }
    }

    /// Decodes a token back into a cursor
    pub fn decode(&self, token: &str) -> CursorResult<Cursor> {
        let payload = match &self.secret {
            Some(secret) => {
                let (payload, signature) = token
                    .split_once(SIGNATURE_SEPARATOR)
                    .ok_or(CursorError::MissingSignature)?;
                let expected = sign(secret, payload);
                if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
                    return Err(CursorError::InvalidSignature);
                }
                payload
            }
            None => token,
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| CursorError::Malformed(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| CursorError::Malformed(e.to_string()))?;
        Cursor::from_json_str(&text)
    }
}

fn sign(secret: &[u8], payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

//! Sealing of secrets stored at rest
//!
//! OAuth client secrets and calendar tokens are sealed with AES-256-GCM before
//! they reach the database. The sealed form is `base64(nonce || ciphertext)`,
//! the GCM tag being the last 16 bytes of the ciphertext.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::AppError;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Seals and opens secrets with a key derived from `ENCRYPTION_KEY`
#[derive(Clone)]
pub struct SecretBox {
    cipher: Aes256Gcm,
}

impl SecretBox {
    pub fn new(key: &str) -> Result<Self, AppError> {
        let digest = Sha256::digest(key.as_bytes());
        let cipher = Aes256Gcm::new_from_slice(&digest)
            .map_err(|e| AppError::Internal(format!("invalid encryption key: {}", e)))?;
        Ok(Self { cipher })
    }

    pub fn seal(&self, plaintext: &str) -> Result<String, AppError> {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(|_| AppError::Internal("failed to seal secret".to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    pub fn open(&self, sealed: &str) -> Result<String, AppError> {
        let raw = STANDARD
            .decode(sealed.trim())
            .map_err(|_| AppError::Internal("sealed secret is not valid base64".to_string()))?;
        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(AppError::Internal("sealed secret is truncated".to_string()));
        }

        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| AppError::Internal("sealed secret failed authentication".to_string()))?;
        String::from_utf8(plaintext)
            .map_err(|_| AppError::Internal("sealed secret is not UTF-8".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_reverses_seal() {
        let secrets = SecretBox::new("test-encryption-key").unwrap();
        let long = "x".repeat(100);
        for plaintext in ["", "client-secret", long.as_str()] {
            let sealed = secrets.seal(plaintext).unwrap();
            assert_ne!(sealed, plaintext);
            assert_eq!(secrets.open(&sealed).unwrap(), plaintext);
        }
    }

    #[test]
    fn sealed_form_is_nonce_then_ciphertext_with_tag() {
        let secrets = SecretBox::new("k").unwrap();
        let raw = STANDARD.decode(secrets.seal("token").unwrap()).unwrap();
        assert_eq!(raw.len(), NONCE_LEN + "token".len() + TAG_LEN);
    }

    #[test]
    fn sealing_is_randomized() {
        let secrets = SecretBox::new("k").unwrap();
        assert_ne!(secrets.seal("same").unwrap(), secrets.seal("same").unwrap());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let sealed = SecretBox::new("right").unwrap().seal("token").unwrap();
        assert!(SecretBox::new("wrong").unwrap().open(&sealed).is_err());
    }

    #[test]
    fn tampering_is_detected() {
        let secrets = SecretBox::new("k").unwrap();
        let mut raw = STANDARD.decode(secrets.seal("token").unwrap()).unwrap();
        raw[NONCE_LEN] ^= 1;
        assert!(secrets.open(&STANDARD.encode(raw)).is_err());
        assert!(secrets.open("not base64!").is_err());
        assert!(secrets.open("").is_err());
    }
}

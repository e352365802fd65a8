//! At-rest encryption for pending-request metadata.
//!
//! Metadata may carry sensitive identifiers (merchant account ids), so the
//! SQLite store never writes it in the clear. The key is host-supplied —
//! typically sourced from the platform keystore — and never persisted by
//! this crate.

use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, KeyInit},
};
use payswitch_types::{SwitchError, traits::Result};
use rand::RngCore;

/// Length of the ChaCha20-Poly1305 nonce prepended to each sealed blob.
const NONCE_LEN: usize = 12;

/// Symmetric cipher sealing metadata documents into `nonce || ciphertext`
/// blobs.
pub struct MetadataCipher {
    cipher: ChaCha20Poly1305,
}

impl MetadataCipher {
    /// Build a cipher from a host-supplied 32-byte key.
    #[must_use]
    pub fn new(key: &[u8; 32]) -> Self {
        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(key)),
        }
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Crypto`] if encryption fails.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| SwitchError::Crypto(format!("encryption failed: {e}")))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt a blob produced by [`MetadataCipher::seal`].
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Crypto`] if the blob is too short, was sealed
    /// under a different key, or was tampered with.
    pub fn open(&self, blob: &[u8]) -> Result<Vec<u8>> {
        if blob.len() < NONCE_LEN {
            return Err(SwitchError::Crypto("sealed blob too short".into()));
        }
        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|e| SwitchError::Crypto(format!("decryption failed: {e}")))
    }
}

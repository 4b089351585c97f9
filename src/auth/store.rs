//! Encrypted access-token file.
//!
//! File layout is `IV (16 bytes) || ciphertext`, AES-256 in counter mode.
//! The key is the first 32 characters of the base64-encoded SHA-256 digest
//! of the operator's passphrase, which keeps files written by earlier
//! releases readable.

use std::path::Path;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::api::types::AccessToken;
use crate::error::{Error, Result};
use crate::fs::naming::partial_path;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Length of the IV prefix.
pub const IV_SIZE: usize = 16;

/// AES-256 key length.
pub const KEY_SIZE: usize = 32;

/// Symmetric key for the credential file. Zeroed on drop.
pub struct CredentialKey([u8; KEY_SIZE]);

impl CredentialKey {
    /// Derive the key from a passphrase.
    pub fn derive(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut encoded = BASE64.encode(digest);
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&encoded.as_bytes()[..KEY_SIZE]);
        encoded.zeroize();
        Self(key)
    }
}

impl Drop for CredentialKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialKey(..)")
    }
}

/// Encrypt `plaintext` under a fresh random IV.
pub fn encrypt(key: &CredentialKey, plaintext: &[u8]) -> Vec<u8> {
    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let mut out = Vec::with_capacity(IV_SIZE + plaintext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(plaintext);

    let mut cipher = Aes256Ctr::new(&key.0.into(), &iv.into());
    cipher.apply_keystream(&mut out[IV_SIZE..]);
    out
}

/// Split off the IV and decrypt the remainder.
pub fn decrypt(key: &CredentialKey, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < IV_SIZE {
        return Err(Error::Crypto(format!(
            "Encrypted data is {} bytes, shorter than the {}-byte IV",
            data.len(),
            IV_SIZE
        )));
    }

    let (iv, ciphertext) = data.split_at(IV_SIZE);
    let mut iv_bytes = [0u8; IV_SIZE];
    iv_bytes.copy_from_slice(iv);

    let mut plaintext = ciphertext.to_vec();
    let mut cipher = Aes256Ctr::new(&key.0.into(), &iv_bytes.into());
    cipher.apply_keystream(&mut plaintext);
    Ok(plaintext)
}

/// Reads and writes the encrypted access-token file.
#[derive(Debug)]
pub struct CredentialStore {
    key: CredentialKey,
}

impl CredentialStore {
    pub fn new(passphrase: &str) -> Self {
        Self {
            key: CredentialKey::derive(passphrase),
        }
    }

    /// Serialize, encrypt and write `token` to `path`.
    pub async fn save(&self, path: &Path, token: &AccessToken) -> Result<()> {
        let mut json = serde_json::to_vec(token)?;
        let encrypted = encrypt(&self.key, &json);
        json.zeroize();

        let temp = partial_path(path);
        tokio::fs::write(&temp, &encrypted).await?;
        restrict_permissions(&temp).await?;
        tokio::fs::rename(&temp, path).await?;

        tracing::debug!("Stored encrypted access token at {}", path.display());
        Ok(())
    }

    /// Read and decrypt the token at `path`.
    ///
    /// A truncated file, a wrong passphrase, or a plaintext that does not
    /// parse as a well-formed token is an error. Counter mode carries no
    /// MAC, so a corrupted byte that still yields a plausible character in
    /// a token field goes undetected; the upstream then rejects the token.
    pub async fn load(&self, path: &Path) -> Result<AccessToken> {
        let data = tokio::fs::read(path).await?;
        let mut plaintext = decrypt(&self.key, &data)?;

        let parsed = serde_json::from_slice::<AccessToken>(&plaintext);
        plaintext.zeroize();

        match parsed {
            Ok(token) if is_well_formed(&token) => Ok(token),
            _ => Err(Error::Crypto(format!(
                "Could not decrypt {} (wrong passphrase or corrupt file)",
                path.display()
            ))),
        }
    }
}

/// Shape of tokens issued by the access-token endpoint: `<user_id>-<alnum>`
/// token, alphanumeric secret, numeric user id, `[A-Za-z0-9_]` handle.
fn is_well_formed(token: &AccessToken) -> bool {
    let token_ok = !token.token.is_empty()
        && token
            .token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    let secret_ok = !token.token_secret.is_empty()
        && token.token_secret.chars().all(|c| c.is_ascii_alphanumeric());
    let user_ok = token.user_id.chars().all(|c| c.is_ascii_digit())
        && (token.user_id.is_empty() || token.token.starts_with(&format!("{}-", token.user_id)));
    let handle_ok = token
        .handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_');

    token_ok && secret_ok && user_ok && handle_ok
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

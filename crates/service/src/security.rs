//! API secret verification.
//!
//! Stage 1 compresses the presented secret with SHA-512. Stage 2 runs the
//! digest through Argon2id with the fixed cost parameters below and the
//! provisioned salt. The result is compared to the stored hash in constant
//! time. Only the hex hash and hex salt are ever configured; the secret
//! itself is never stored.

use argon2::{password_hash::Output, Algorithm, Argon2, Params, Version};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha512};

use crate::errors::ServiceError;

/// Argon2 memory cost in KiB (64 MiB).
pub const MEMORY_COST_KIB: u32 = 64 * 1024;
pub const ITERATIONS: u32 = 3;
pub const PARALLELISM: u32 = 2;
pub const KEY_LENGTH: usize = 32;
/// Salt length produced by [`provision`]. Argon2 rejects salts under 8 bytes.
pub const SALT_LENGTH: usize = 16;

fn argon2() -> Result<Argon2<'static>, argon2::Error> {
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, Some(KEY_LENGTH))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Two-stage derivation of `secret` under `salt`.
pub fn derive_key(secret: &str, salt: &[u8]) -> Result<[u8; KEY_LENGTH], ServiceError> {
    let digest = Sha512::digest(secret.as_bytes());
    let mut out = [0u8; KEY_LENGTH];
    argon2()
        .and_then(|a| a.hash_password_into(digest.as_slice(), salt, &mut out))
        .map_err(|e| ServiceError::Hash(e.to_string()))?;
    Ok(out)
}

/// Check `candidate` against a stored hex hash and hex salt.
///
/// Never errors: undecodable hex, a salt Argon2 refuses, or a stored hash of
/// the wrong length all yield `false`.
pub fn verify(candidate: &str, stored_hash_hex: &str, stored_salt_hex: &str) -> bool {
    let Ok(stored) = hex::decode(stored_hash_hex) else { return false };
    let Ok(salt) = hex::decode(stored_salt_hex) else { return false };
    let Ok(derived) = derive_key(candidate, &salt) else { return false };

    // `Output` equality is constant-time; construction rejects lengths
    // outside 10..=64 bytes, which no derived key can match anyway.
    match (Output::new(&stored), Output::new(&derived)) {
        (Ok(stored), Ok(derived)) => stored == derived,
        _ => false,
    }
}

/// Hex hash/salt pair for provisioning a new API secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedSecret {
    pub hash_hex: String,
    pub salt_hex: String,
}

/// Generate a random salt and derive the stored hash for `secret`.
pub fn provision(secret: &str) -> Result<ProvisionedSecret, ServiceError> {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    let key = derive_key(secret, &salt)?;
    Ok(ProvisionedSecret { hash_hex: hex::encode(key), salt_hex: hex::encode(salt) })
}

/// The configured credential, shared by every request-handling task.
#[derive(Debug, Clone)]
pub struct ApiCredential {
    hash_hex: String,
    salt_hex: String,
}

impl ApiCredential {
    pub fn new(hash_hex: impl Into<String>, salt_hex: impl Into<String>) -> Self {
        Self { hash_hex: hash_hex.into(), salt_hex: salt_hex.into() }
    }

    pub fn verify(&self, candidate: &str) -> bool {
        verify(candidate, &self.hash_hex, &self.salt_hex)
    }

    /// Run [`verify`](Self::verify) on the blocking pool; Argon2 at these
    /// costs must not stall async workers.
    pub async fn verify_blocking(&self, candidate: String) -> bool {
        let cred = self.clone();
        tokio::task::spawn_blocking(move || cred.verify(&candidate))
            .await
            .unwrap_or(false)
    }
}

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::presentation::middleware::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const SALT_BYTES: usize = 16;

/// Salted password hashing.
///
/// `hash` must be deterministic for a given password and salt within one
/// deployment; the salt has to feed the hash input rather than be appended to
/// the output.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str, salt: &str) -> Result<String, AppError>;

    /// Recompute and compare in constant time
    fn verify(&self, password: &str, salt: &str, expected: &str) -> Result<bool, AppError> {
        let computed = self.hash(password, salt)?;
        Ok(computed.as_bytes().ct_eq(expected.as_bytes()).into())
    }
}

/// HMAC-SHA256 keyed by the salt, hex encoded
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Hasher;

impl PasswordHasher for HmacSha256Hasher {
    fn hash(&self, password: &str, salt: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(salt.as_bytes())
            .map_err(|e| AppError::Internal { message: format!("Failed to key hasher: {e}") })?;

        mac.update(password.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

/// Fresh random salt, hex encoded
pub fn generate_salt() -> String {
    let bytes: [u8; SALT_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

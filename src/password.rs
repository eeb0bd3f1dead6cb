//! Password hashing with `Argon2id`.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`), so the
//! salt and parameters travel with the stored value and verification needs
//! nothing else.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

/// Memory cost in KiB (19 MiB).
pub const M_COST: u32 = 19_456;
/// Iterations.
pub const T_COST: u32 = 2;
/// Lanes.
pub const P_COST: u32 = 1;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
    #[error("stored hash is not a valid PHC string: {0}")]
    MalformedHash(password_hash::Error),
    #[error("password verification failed: {0}")]
    Verify(password_hash::Error),
}

/// Argon2id hasher with a fixed work factor.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("algorithm", &"argon2id")
            .field("m_cost", &M_COST)
            .field("t_cost", &T_COST)
            .field("p_cost", &P_COST)
            .finish()
    }
}

impl PasswordHasher {
    /// # Errors
    /// Returns an error if the work factor constants are rejected by `argon2`.
    pub fn new() -> Result<Self, HashError> {
        let params = Params::new(M_COST, T_COST, P_COST, None).map_err(HashError::Params)?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Derive a salted PHC hash for `password`.
    ///
    /// # Errors
    /// Returns an error if `argon2` fails to hash the input.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(HashError::Hash)?
            .to_string())
    }

    /// Check `password` against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`; only unusable hashes or internal failures are errors.
    ///
    /// # Errors
    /// Returns an error if the stored hash cannot be parsed or verification fails internally.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, HashError> {
        let parsed = PasswordHash::new(stored_hash).map_err(HashError::MalformedHash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::Verify(e)),
        }
    }
}

//! # Clientes (client credential registry)
//!
//! `clientes` is a small HTTP/JSON backend that registers, authenticates, lists
//! and deletes client accounts kept in a single `PostgreSQL` table.
//!
//! ## Credentials
//!
//! Passwords are never stored or compared in plaintext. Registration derives an
//! `Argon2id` hash (PHC string, random salt, fixed work factor) and login verifies
//! the submitted password against it. Hashes never leave the store layer: the
//! listing endpoint projects only the `usuario` column.
//!
//! ## Wire contract
//!
//! Every `/api/*` response is a JSON object with a boolean `ok` field. Failures
//! carry an `error` string and successes a `mensaje` and/or data field, so the
//! browser form can render them without inspecting status codes.
//!
//! No session or token is issued; each request stands on its own.

pub mod api;
pub mod cli;
pub mod password;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}

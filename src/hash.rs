//! Fingerprint engine.
//!
//! # Algorithm
//!
//! ```text
//! SHA-256(canonical_text_bytes) → 64 lowercase hex chars
//! ```
//!
//! No version byte or discriminator is mixed in: the digest of a body is the
//! plain SHA-256 of its canonical text, so anyone can reproduce it with a
//! stock `sha256sum`. The empty canonical text (a member without a body) has
//! the well-known digest [`EMPTY_DIGEST`].
//!
//! Collision resistance against a deliberate attacker is not a goal; SHA-256
//! is used because it is deterministic everywhere and accidental collisions
//! across a codebase are practically impossible.
//!
//! # Examples
//!
//! ```rust
//! use hashstamp::{digest, EMPTY_DIGEST};
//!
//! let d = digest("return 1 ;");
//! assert_eq!(d.as_str().len(), 64);
//! assert_eq!(d, digest("return 1 ;"));
//! assert_eq!(digest("").as_str(), EMPTY_DIGEST);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

/// SHA-256 of zero bytes; the digest of every bodiless member.
pub const EMPTY_DIGEST: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Fixed-length lowercase hex fingerprint of a canonical body.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub const HEX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when this is the digest of an empty body.
    pub fn is_empty_body(&self) -> bool {
        self.0 == EMPTY_DIGEST
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hash canonical text into a [`Digest`].
pub fn digest(text: &str) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Digest(hex::encode(hasher.finalize()))
}

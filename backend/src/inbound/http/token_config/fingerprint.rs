//! Signing-secret fingerprinting for operational visibility.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! secret without the secret itself reaching the logs.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 digest as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use logistic::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(b"an example signing secret");
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn fingerprint_is_deterministic() {
        assert_eq!(secret_fingerprint(&[b'a'; 32]), secret_fingerprint(&[b'a'; 32]));
    }

    #[rstest]
    fn different_secrets_differ() {
        assert_ne!(secret_fingerprint(&[b'a'; 32]), secret_fingerprint(&[b'b'; 32]));
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex() {
        let fp = secret_fingerprint(b"secret");
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(fp, fp.to_lowercase());
    }
}

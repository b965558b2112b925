//! PKCE code verifier and challenge generation (RFC 7636).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

/// Number of random octets behind a code verifier.
///
/// 32 octets base64url-encode to 43 characters, the RFC 7636 minimum.
const VERIFIER_OCTETS: usize = 32;

/// A PKCE verifier/challenge pair for one authorization request.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Random code verifier, kept secret until the token exchange.
    pub code_verifier: String,
    /// S256 challenge sent with the authorization request.
    pub code_challenge: String,
    /// Challenge method; always `S256`.
    pub code_challenge_method: &'static str,
}

impl PkceChallenge {
    /// Generate a fresh verifier and its S256 challenge.
    pub fn generate() -> Self {
        let code_verifier = generate_code_verifier();
        Self::from_verifier(code_verifier)
    }

    /// Build the challenge for an existing verifier.
    pub fn from_verifier(code_verifier: impl Into<String>) -> Self {
        let code_verifier = code_verifier.into();
        let code_challenge = code_challenge_s256(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: "S256",
        }
    }
}

/// Generate a random code verifier.
///
/// The verifier is the base64url encoding (no padding) of random octets,
/// which stays within the unreserved character set required by RFC 7636.
pub fn generate_code_verifier() -> String {
    let mut bytes = [0u8; VERIFIER_OCTETS];
    getrandom::getrandom(&mut bytes).expect("Failed to generate random bytes");
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Compute the S256 code challenge for a verifier.
pub fn code_challenge_s256(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Check a verifier against a challenge.
///
/// The authorization server performs this check; it is exposed here for
/// tests and for server-side use.
pub fn verify(verifier: &str, challenge: &str) -> bool {
    code_challenge_s256(verifier) == challenge
}

//! Verification token generation.

use rand::Rng;

/// Number of random bytes per token; hex-encoded to 64 characters.
const TOKEN_BYTES: usize = 32;

/// Generates single-use verification tokens for bookings.
///
/// 256 bits of randomness make a collision with an existing token
/// negligible; the store still enforces uniqueness and reports a
/// collision as an invariant breach rather than silently reusing one.
#[derive(Debug, Clone)]
pub struct TokenService;

impl TokenService {
    /// Creates a new token service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a cryptographically secure random token.
    pub fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();
        // `gen` is a reserved keyword in edition 2024.
        let bytes: Vec<u8> = (0..TOKEN_BYTES).map(|_| rng.r#gen::<u8>()).collect();
        hex::encode(bytes)
    }
}

impl Default for TokenService {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple hex encoding without external dependency.
mod hex {
    /// Encode bytes to hex string.
    pub fn encode(bytes: Vec<u8>) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_long_and_distinct() {
        let svc = TokenService::new();
        let a = svc.generate_token();
        let b = svc.generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}

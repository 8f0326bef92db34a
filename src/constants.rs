//! Application-wide constants.
//!
//! Centralizes magic numbers and strings for better maintainability.

// ============================================================================
// Alias Constants
// ============================================================================

/// Characters used for generating aliases (URL-safe alphanumeric)
pub const ALIAS_ALPHABET: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Default length of generated aliases
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Maximum attempts when generating an alias before giving up
pub const MAX_ALIAS_GENERATION_ATTEMPTS: u32 = 10;

// ============================================================================
// Session Constants
// ============================================================================

/// Prefix for all issued session tokens
pub const SESSION_TOKEN_PREFIX: &str = "ask_";

/// Length of the random portion of a session token (excluding prefix)
pub const SESSION_TOKEN_RANDOM_LENGTH: usize = 32;

/// Default session lifetime in seconds
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

// ============================================================================
// Route Constants
// ============================================================================

/// Path prefix under which aliases are resolved
pub const REDIRECT_PREFIX: &str = "/r";

// ============================================================================
// Test Constants
// ============================================================================

/// Password used by test fixtures
#[cfg(test)]
pub const TEST_PASSWORD: &str = "correct-horse";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_length() {
        // Ensure alphabet contains exactly 62 characters (0-9, a-z, A-Z)
        assert_eq!(ALIAS_ALPHABET.len(), 62);
        assert!(ALIAS_ALPHABET.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_alias_constants() {
        assert!(DEFAULT_ALIAS_LENGTH > 0);
        assert!(MAX_ALIAS_GENERATION_ATTEMPTS > 0);
    }

    #[test]
    fn test_redirect_prefix() {
        assert!(REDIRECT_PREFIX.starts_with('/'));
        assert!(!REDIRECT_PREFIX.ends_with('/'));
    }
}

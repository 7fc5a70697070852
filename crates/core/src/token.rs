//! Portal-token generation.
//!
//! Portal tokens are opaque capability strings handed to sponsors: whoever
//! holds one can read (and for deal tokens, write) the scoped subgraph
//! without a staff credential. They are unique, immutable once assigned,
//! and never expire or rotate. Lookups are by exact match, so an unknown or
//! malformed token is simply not found.

use rand::Rng;

/// Length of a generated portal token.
pub const TOKEN_LENGTH: usize = 22;

/// Generate a new random portal token (alphanumeric, URL-safe).
pub fn generate_portal_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_have_the_expected_length() {
        assert_eq!(generate_portal_token().len(), TOKEN_LENGTH);
    }

    #[test]
    fn tokens_are_url_safe() {
        let token = generate_portal_token();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn tokens_do_not_collide_in_practice() {
        let a = generate_portal_token();
        let b = generate_portal_token();
        assert_ne!(a, b);
    }
}

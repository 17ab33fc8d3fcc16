//! Customer capability tokens.
//!
//! Tokens are 256 bits from the operating system RNG, hex encoded. The
//! issuer keeps no state: a token stops working when the table's session
//! epoch rotates, because every lookup it authorises is scoped to that epoch.

use crate::model::CustomerToken;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    pub fn issue() -> CustomerToken {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        CustomerToken::new(hex::encode(bytes))
    }

    /// Constant-time comparison of a presented token against a stored one.
    pub fn matches(presented: &CustomerToken, stored: &CustomerToken) -> bool {
        presented
            .as_str()
            .as_bytes()
            .ct_eq(stored.as_str().as_bytes())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_is_hex_of_256_bits() {
        let token = TokenIssuer::issue();
        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_issued_tokens_differ() {
        assert_ne!(TokenIssuer::issue(), TokenIssuer::issue());
    }

    #[test]
    fn test_matches() {
        let token = TokenIssuer::issue();
        assert!(TokenIssuer::matches(&token.clone(), &token));
        assert!(!TokenIssuer::matches(&TokenIssuer::issue(), &token));
        assert!(!TokenIssuer::matches(&CustomerToken::new(""), &token));
        assert!(!TokenIssuer::matches(
            &CustomerToken::new(&token.as_str()[..10]),
            &token
        ));
    }
}

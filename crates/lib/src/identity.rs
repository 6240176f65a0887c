//! # Identifier Generation
//!
//! Business identifiers are short, human-shareable tags derived from the
//! registration details plus a fresh random salt, so two registrations
//! with identical details still get distinct ids and an id cannot be
//! derived from the details alone. The output is not globally unique by
//! construction: a persistence-layer conflict is a signal to regenerate
//! with a new salt, not a bug.

use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

/// The constant tag prefixed to every business identifier.
pub const BUSINESS_ID_PREFIX: &str = "KM-";

/// Number of hex characters kept from the digest.
const BUSINESS_ID_HASH_LEN: usize = 8;

/// Generates a business identifier such as `KM-A1B2C3D4`.
///
/// The digest covers the three inputs and four bytes from the OS CSPRNG,
/// truncated to eight uppercase hex characters. Calling this twice with
/// identical arguments yields two different identifiers.
pub fn generate_business_id(business_name: &str, business_type: &str, location: &str) -> String {
    let mut salt = [0u8; 4];
    OsRng.fill_bytes(&mut salt);

    let combined = format!(
        "{business_name}{business_type}{location}{}",
        hex::encode(salt)
    )
    .to_lowercase();

    let digest = Sha256::digest(combined.as_bytes());
    let short = &hex::encode(digest)[..BUSINESS_ID_HASH_LEN];
    format!("{BUSINESS_ID_PREFIX}{}", short.to_uppercase())
}

/// Mints a fresh chat-session token: sixteen lowercase hex characters
/// from eight CSPRNG bytes.
pub fn mint_session_id() -> String {
    let mut bytes = [0u8; 8];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_yield_distinct_ids() {
        let a = generate_business_id("Tunde's Fashion Store", "Shoes", "Ikeja");
        let b = generate_business_id("Tunde's Fashion Store", "Shoes", "Ikeja");
        assert_ne!(a, b, "salt must make repeated registrations distinct");
    }

    #[test]
    fn id_has_prefix_and_short_uppercase_hex_body() {
        let id = generate_business_id("Mama Nkechi Kitchen", "Food", "Surulere");
        let body = id.strip_prefix(BUSINESS_ID_PREFIX).expect("missing prefix");
        assert_eq!(body.len(), BUSINESS_ID_HASH_LEN);
        assert!(body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn session_ids_are_hex_and_distinct() {
        let a = mint_session_id();
        let b = mint_session_id();
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}

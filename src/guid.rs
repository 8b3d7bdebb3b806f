//! Stable GUID generation
//!
//! Identifiers that must survive re-generation (the upgrade code, the
//! shortcut component GUID) are derived from content instead of drawn at
//! random, so two runs for the same product agree on them.
//!
//! # Example
//!
//! ```
//! use wixgen::guid::stable_id;
//!
//! let code = stable_id(b"MyProduct");
//! assert_eq!(code, stable_id(b"MyProduct"));
//! assert_eq!(code.len(), 36);
//! ```

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Component GUID that asks the WiX toolset to generate one at build time
pub const AUTO_GUID: &str = "*";

/// Derive a GUID-shaped identifier from arbitrary bytes.
///
/// The first 16 bytes of a SHA-256 digest are stamped as a name-based
/// (version 5) RFC 4122 UUID and rendered in uppercase 8-4-4-4-12 form.
pub fn stable_id(content: &[u8]) -> String {
    let digest = Sha256::digest(content);

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);

    bytes[6] = (bytes[6] & 0x0f) | 0x50;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes).hyphenated().to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deterministic() {
        assert_eq!(stable_id(b"Foo"), stable_id(b"Foo"));
        assert_eq!(stable_id(b""), stable_id(b""));
    }

    #[test]
    fn test_different_content() {
        let corpus: Vec<&[u8]> = vec![
            b"Foo",
            b"foo",
            b"Foo ",
            b"app.exe",
            b"App.exe",
            b"",
            b"MyProduct",
        ];
        let ids: HashSet<_> = corpus.iter().map(|c| stable_id(c)).collect();
        assert_eq!(ids.len(), corpus.len());
    }

    #[test]
    fn test_canonical_shape() {
        let id = stable_id(b"MyProduct");
        let groups: Vec<_> = id.split('-').map(str::len).collect();

        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert!(id
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_parses_as_uuid() {
        let id = stable_id(b"MyProduct");
        let parsed = Uuid::parse_str(&id).unwrap();

        assert_eq!(parsed.get_version_num(), 5);
        assert_eq!(parsed.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn test_never_auto_sentinel() {
        assert_ne!(stable_id(b"*"), AUTO_GUID);
    }
}

//! # Barcode Composition
//!
//! Builds the opaque receiving code stuck on each carton:
//!
//! ```text
//! MUG01-202405-7KQX2N
//! ──┬── ──┬─── ──┬───
//!   │     │      └── 6 random characters from an unambiguous alphabet
//!   │     └───────── year-month stamp (BARCODE_STAMP_FORMAT)
//!   └─────────────── prefix: sku_name, else item_number, else "ITEM"
//! ```
//!
//! ## Why an Unambiguous Alphabet?
//! Codes get read back by humans off a laser-printed sticker. `0/O` and
//! `1/I` are indistinguishable in most label fonts, so the alphabet drops
//! all four. Uniqueness is probabilistic (32^6 ≈ 1.07 billion per
//! prefix-month); the scan matcher resolves collisions by taking the first
//! match in row order.
//!
//! The engine supplies the stamp and the RNG, so everything here stays
//! deterministic under test.

use rand::Rng;

use crate::row::Row;

// =============================================================================
// Alphabet & Shape
// =============================================================================

/// Characters a token may use: uppercase letters and digits minus `0,1,O,I`.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of the random suffix token.
pub const TOKEN_LENGTH: usize = 6;

/// Prefix used when a row names neither a SKU nor an item number.
pub const FALLBACK_PREFIX: &str = "ITEM";

// =============================================================================
// Composition
// =============================================================================

/// Derives the code prefix from a row.
///
/// `sku_name` wins over `item_number`, which wins over [`FALLBACK_PREFIX`];
/// a cell counts only if it has non-whitespace content. Spaces are stripped
/// and the result is upper-cased.
///
/// ## Example
/// ```rust
/// use intake_core::{barcode, Row};
///
/// let mut row = Row::default();
/// row.sku_name = "mug 01".into();
/// assert_eq!(barcode::prefix_for(&row), "MUG01");
///
/// row.sku_name.clear();
/// row.item_number = "a-17".into();
/// assert_eq!(barcode::prefix_for(&row), "A-17");
///
/// row.item_number.clear();
/// assert_eq!(barcode::prefix_for(&row), "ITEM");
/// ```
pub fn prefix_for(row: &Row) -> String {
    let sku = row.sku_name.trim();
    let item = row.item_number.trim();
    let base = if !sku.is_empty() {
        sku
    } else if !item.is_empty() {
        item
    } else {
        FALLBACK_PREFIX
    };

    base.chars()
        .filter(|c| *c != ' ')
        .collect::<String>()
        .to_uppercase()
}

/// Draws a [`TOKEN_LENGTH`]-character token from [`CODE_ALPHABET`].
pub fn random_token(rng: &mut impl Rng) -> String {
    (0..TOKEN_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Joins the three parts into the final `PREFIX-YYYYMM-RRRRRR` shape.
pub fn compose(prefix: &str, stamp: &str, token: &str) -> String {
    format!("{prefix}-{stamp}-{token}")
}

/// Generates a complete code for a row.
///
/// The stamp is the engine-rendered year-month ([`crate::BARCODE_STAMP_FORMAT`]);
/// passing the RNG in keeps this reproducible under a seeded generator.
pub fn generate(row: &Row, stamp: &str, rng: &mut impl Rng) -> String {
    compose(&prefix_for(row), stamp, &random_token(rng))
}

/// Renders a code as a file-name-safe stem for the external image-export
/// collaborator: alphanumerics and `-_.` pass through, anything else
/// becomes `_`.
pub fn file_stem(code: &str) -> String {
    code.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prefix_prefers_sku_then_item_then_fallback() {
        let mut row = Row::default();
        row.sku_name = "mug 01".into();
        row.item_number = "77".into();
        assert_eq!(prefix_for(&row), "MUG01");

        row.sku_name = "   ".into();
        assert_eq!(prefix_for(&row), "77");

        row.item_number.clear();
        assert_eq!(prefix_for(&row), "ITEM");
    }

    #[test]
    fn test_prefix_strips_spaces_and_uppercases() {
        let mut row = Row::default();
        row.sku_name = "  blue mug set  ".into();
        assert_eq!(prefix_for(&row), "BLUEMUGSET");
    }

    #[test]
    fn test_token_uses_only_the_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let token = random_token(&mut rng);
            assert_eq!(token.len(), TOKEN_LENGTH);
            for b in token.bytes() {
                assert!(
                    CODE_ALPHABET.contains(&b),
                    "token byte {b:?} outside alphabet"
                );
                assert!(!b"01OI".contains(&b));
            }
        }
    }

    #[test]
    fn test_token_is_deterministic_under_a_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(random_token(&mut a), random_token(&mut b));
    }

    #[test]
    fn test_generate_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut row = Row::default();
        row.sku_name = "mug 01".into();

        let code = generate(&row, "202405", &mut rng);
        let parts: Vec<&str> = code.splitn(3, '-').collect();
        assert_eq!(parts[0], "MUG01");
        assert_eq!(parts[1], "202405");
        assert_eq!(parts[2].len(), TOKEN_LENGTH);
        assert!(parts[2].bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_file_stem_replaces_unsafe_characters() {
        assert_eq!(file_stem("MUG01-202405-7KQX2N"), "MUG01-202405-7KQX2N");
        assert_eq!(file_stem("a b/c:d?e"), "a_b_c_d_e");
        assert_eq!(file_stem("keep-_.these"), "keep-_.these");
    }
}

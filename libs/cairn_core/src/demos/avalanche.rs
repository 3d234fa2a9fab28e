//! Avalanche-effect analysis: how much of a digest flips under a minimal
//! input change.

use cairn_crypto::hashing::{HashFunction, Hashable};

use super::to_hex;

/// The distance between one original/modified hash pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AvalancheReport {
    /// Description of the modification that was applied.
    pub modification: String,
    /// The modified input itself.
    pub modified_input: String,
    /// Differing positions between the two hex renderings.
    pub hex_distance: usize,
    /// Differing bits between the two digests.
    pub bit_distance: usize,
    /// Total bits in the digest.
    pub total_bits: usize,
    /// `bit_distance / total_bits`, as a percentage.
    pub changed_pct: f64,
}

/// Applies a set of minimal modifications to `input` and measures how far
/// each modified hash lands from the original. Modifications that do not
/// apply (e.g. truncating an empty string) are skipped.
pub fn analyze(input: &str, hasher: &mut impl HashFunction) -> Vec<AvalancheReport> {
    let original_hash = input.hash(hasher).expect("hashing failed");
    let original_hex = to_hex(&original_hash);

    modifications(input)
        .into_iter()
        .filter_map(|(description, modified)| {
            let modified = modified?;
            let modified_hash = modified.hash(hasher).expect("hashing failed");
            let bit_distance = bit_hamming(&original_hash, &modified_hash);
            let total_bits = original_hash.len() * 8;
            Some(AvalancheReport {
                modification: description.to_string(),
                modified_input: modified,
                hex_distance: char_hamming(&original_hex, &to_hex(&modified_hash)),
                bit_distance,
                total_bits,
                changed_pct: bit_distance as f64 / total_bits as f64 * 100.0,
            })
        })
        .collect()
}

fn modifications(input: &str) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("Single character change (last char)", bump_last_char(input)),
        ("Single bit flip (first character)", flip_first_bit(input)),
        ("Case change (first character)", lowercase_first(input)),
        ("Add single space at end", Some(format!("{input} "))),
        ("Remove last character", drop_last_char(input)),
    ]
}

fn bump_last_char(input: &str) -> Option<String> {
    let mut chars: Vec<char> = input.chars().collect();
    let last = chars.pop()?;
    let bumped = char::from_u32(last as u32 + 1)?;
    chars.push(bumped);
    Some(chars.into_iter().collect())
}

fn flip_first_bit(input: &str) -> Option<String> {
    let mut chars = input.chars();
    let first = chars.next()?;
    let flipped = char::from_u32(first as u32 ^ 1)?;
    Some(std::iter::once(flipped).chain(chars).collect())
}

fn lowercase_first(input: &str) -> Option<String> {
    let mut chars = input.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

fn drop_last_char(input: &str) -> Option<String> {
    let mut chars: Vec<char> = input.chars().collect();
    chars.pop()?;
    Some(chars.into_iter().collect())
}

fn char_hamming(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).filter(|(x, y)| x != y).count()
}

fn bit_hamming(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x ^ y).count_ones() as usize)
        .sum()
}

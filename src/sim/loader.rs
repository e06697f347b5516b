//! Image loader: parses an ASCII hex-per-line memory image.
//!
//! Grounded on the teacher's `sim::loader::load_binary` (a thin
//! `fs::read` wrapper translated into a fatal `Result` instead of an
//! `exit(1)` call) and on the original C `read_memory_image`'s use of
//! `fscanf("%x", ...)`, which skips blank lines and tolerates a leading
//! `0x`/`0X` prefix.

use crate::common::{SimError, MAX_IMAGE_WORDS};

/// Parses `text` into an ordered list of 32-bit words, one per
/// non-blank line. Fails if more than [`MAX_IMAGE_WORDS`] lines carry a
/// word, or if any non-blank line is not a valid hex word.
pub fn parse_image(text: &str) -> Result<Vec<u32>, SimError> {
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if words.len() >= MAX_IMAGE_WORDS {
            return Err(SimError::ImageTooLarge(words.len() + 1));
        }
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let word = u32::from_str_radix(digits, 16)
            .map_err(|_| SimError::ImageMalformed(i + 1, trimmed.to_string()))?;
        words.push(word);
    }
    Ok(words)
}

/// Reads and parses an image file from disk.
pub fn load_image(path: &str) -> Result<Vec<u32>, SimError> {
    let text =
        std::fs::read_to_string(path).map_err(|_| SimError::ImageUnreadable(path.to_string()))?;
    parse_image(&text)
}

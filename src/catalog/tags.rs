//! Flat storage form for content tags.
//!
//! Tags are stored as one comma-joined column. There is no escaping, so a tag
//! that itself contains a comma comes back split in two.

pub const TAG_DELIMITER: char = ',';

pub fn encode(tags: &[String]) -> String {
    tags.join(",")
}

/// Splits the stored column back into tags.
///
/// An empty column decodes to a single empty tag, matching what the column
/// has always produced for readers.
pub fn decode(field: &str) -> Vec<String> {
    field.split(TAG_DELIMITER).map(str::to_string).collect()
}

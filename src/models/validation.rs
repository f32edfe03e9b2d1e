//! Field checks shared by the entity validators

/// Characters that cannot appear in any persisted field.
///
/// The catalog files use `;` between fields and `,` between borrowed ISBNs,
/// one record per line, with no escaping.
pub const RESERVED_CHARS: [char; 4] = [';', ',', '\n', '\r'];

/// Return the first reserved character found in `value`, if any
pub(crate) fn find_reserved(value: &str) -> Option<char> {
    value.chars().find(|c| RESERVED_CHARS.contains(c))
}

//! Message length bounding.

/// Maximum `sendMessage` text length, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Marker appended to messages cut to fit [`MAX_MESSAGE_LENGTH`].
pub const TRUNCATION_SUFFIX: &str = "\n\n... (message truncated)";

/// Bound `message` to [`MAX_MESSAGE_LENGTH`] characters.
///
/// Longer messages keep their head and end with [`TRUNCATION_SUFFIX`].
/// Lengths count `char`s, so multi-byte text is never split mid code point.
pub fn truncate(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_LENGTH {
        return message.to_string();
    }

    let budget = MAX_MESSAGE_LENGTH - TRUNCATION_SUFFIX.chars().count();
    let mut truncated: String = message.chars().take(budget).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}

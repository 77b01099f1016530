//! Field validators shared by module commands.

use validator::ValidationError;

/// Rejects strings that are empty after trimming.
///
/// Commands are trimmed in their use case, so `length(min = 1)` alone would
/// accept `"   "` and store an empty string.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

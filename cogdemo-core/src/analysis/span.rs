use snafu::prelude::*;

use crate::error::{CogdemoError, InvalidResponseSnafu};

/// Returns the `length` characters of `text` starting at character `offset`,
/// or `None` when the span runs past the end of `text`.
///
/// Offsets are counted in Unicode code points, matching the
/// `UnicodeCodePoint` string index type the clients request.
pub fn span_text(text: &str, offset: usize, length: usize) -> Option<&str> {
    offset.checked_add(length)?;
    let mut boundaries = text
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()));

    let start = boundaries.nth(offset)?;
    let end = match length {
        0 => start,
        _ => boundaries.nth(length - 1)?,
    };

    Some(&text[start..end])
}

/// Checks that `offset + length` stays within `text`.
pub fn validate_span(
    stage: &str,
    text: &str,
    offset: usize,
    length: usize,
) -> Result<(), CogdemoError> {
    ensure!(
        span_text(text, offset, length).is_some(),
        InvalidResponseSnafu {
            stage,
            message: format!(
                "entity span {}+{} exceeds document length {}",
                offset,
                length,
                text.chars().count()
            ),
        }
    );
    Ok(())
}

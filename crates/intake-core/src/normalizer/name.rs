//! Patient name normalization.

use crate::error::{IntakeError, IntakeResult};

/// Collapse whitespace and title-case every word.
///
/// `"  joão   da silva  "` becomes `"João Da Silva"`. Applying it twice gives the
/// same result as applying it once.
pub fn normalize_name(raw: &str) -> IntakeResult<String> {
    let words: Vec<String> = raw.split_whitespace().map(title_case_word).collect();

    if words.is_empty() {
        return Err(IntakeError::InvalidInput("patient name is required".into()));
    }

    Ok(words.join(" "))
}

/// Uppercase the first letter, lowercase everything else.
fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut seen_letter = false;

    for c in word.chars() {
        if !seen_letter && c.is_alphabetic() {
            // Ligatures such as `ﬁ` uppercase to several chars; only the first stays upper.
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            seen_letter = true;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

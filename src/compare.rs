//! Line ordering used to drive the merge.
//!
//! Both modes are plain ordinal comparisons. No locale, numeric or natural
//! ordering is involved. Case-insensitive mode folds each character to its
//! uppercase mapping before comparing, which is the order `sort -f` produces.

use std::borrow::Cow;
use std::cmp::Ordering;

/// How two lines are ordered against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Byte-wise comparison.
    #[default]
    Ordinal,
    /// Byte-wise comparison after uniform case folding.
    IgnoreCase,
}

impl CompareMode {
    pub fn from_ignore_case(ignore_case: bool) -> Self {
        if ignore_case {
            CompareMode::IgnoreCase
        } else {
            CompareMode::Ordinal
        }
    }

    /// Order line `a` against line `b`.
    #[inline]
    pub fn compare(self, a: &[u8], b: &[u8]) -> Ordering {
        match self {
            CompareMode::Ordinal => a.cmp(b),
            CompareMode::IgnoreCase => compare_folded(a, b),
        }
    }
}

/// Case-folded ordinal comparison: fold each line to a key, compare keys.
#[inline]
fn compare_folded(a: &[u8], b: &[u8]) -> Ordering {
    fold_key(a).cmp(&fold_key(b))
}

/// Uppercase key for one line, independent of what it is compared with.
///
/// Valid UTF-8 folds through the full Unicode uppercase mapping and is
/// re-encoded as UTF-8, so byte order of keys is codepoint order. Anything
/// else gets ASCII-only uppercasing.
pub fn fold_key(line: &[u8]) -> Cow<'_, [u8]> {
    if line.is_ascii() {
        if !line.iter().any(u8::is_ascii_lowercase) {
            return Cow::Borrowed(line);
        }
        return Cow::Owned(line.to_ascii_uppercase());
    }
    match std::str::from_utf8(line) {
        Ok(text) => Cow::Owned(text.to_uppercase().into_bytes()),
        Err(_) => Cow::Owned(line.to_ascii_uppercase()),
    }
}

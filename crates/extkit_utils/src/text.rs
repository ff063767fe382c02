//! String helpers.

use alloc::string::String;

/// Returns the first `len` characters of `value`.
///
/// Counts `char`s rather than bytes, so the cut never lands inside a
/// multi-byte character. Shorter inputs are returned whole.
///
/// # Examples
///
/// ```
/// use extkit_utils::text::truncate_chars;
///
/// assert_eq!(truncate_chars("Hello World", 5), "Hello");
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("", 3), "");
/// ```
pub fn truncate_chars(value: &str, len: usize) -> &str {
    match value.char_indices().nth(len) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Replaces every occurrence of each of `chars` with `replacement`.
///
/// # Examples
///
/// ```
/// use extkit_utils::text::replace_all;
///
/// assert_eq!(replace_all("hello\r\n", &['\r', '\n'], ""), "hello");
/// assert_eq!(replace_all("a-b_c", &['-', '_'], " "), "a b c");
/// ```
pub fn replace_all(value: &str, chars: &[char], replacement: &str) -> String {
    value.replace(chars, replacement)
}

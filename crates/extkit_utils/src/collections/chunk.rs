use alloc::vec::Vec;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// A chunk size of zero was requested.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("chunk size must be positive")]
pub struct InvalidChunkSize;

// -----------------------------------------------------------------------------
// chunk

/// Splits `source` into consecutive groups of at most `size` elements.
///
/// Order is kept within and across groups. Every group except the last has
/// exactly `size` elements, the last one holds the remainder and is never
/// padded. The result is fully materialized and does not borrow `source`.
///
/// # Errors
///
/// Returns [`InvalidChunkSize`] when `size` is `0`, whatever `source` holds.
///
/// # Examples
///
/// ```
/// use extkit_utils::collections::chunk;
///
/// let groups = chunk(1..=10, 3).unwrap();
/// assert_eq!(groups, [vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9], vec![10]]);
///
/// assert!(chunk(1..=10, 0).is_err());
/// ```
pub fn chunk<I: IntoIterator>(source: I, size: usize) -> Result<Vec<Vec<I::Item>>, InvalidChunkSize> {
    if size == 0 {
        return Err(InvalidChunkSize);
    }

    let iter = source.into_iter();
    let hint = iter.size_hint().0;
    // `size` may be far larger than the source, never reserve more than the hint
    let group_capacity = size.min(hint);

    let mut groups = Vec::with_capacity(hint.div_ceil(size));
    let mut current = Vec::with_capacity(group_capacity);

    for item in iter {
        current.push(item);
        if current.len() == size {
            groups.push(core::mem::replace(&mut current, Vec::with_capacity(group_capacity)));
        }
    }

    if !current.is_empty() {
        groups.push(current);
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{InvalidChunkSize, chunk};

    #[test]
    fn even_split() {
        let groups = chunk(1..=10, 5).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups, [vec![1, 2, 3, 4, 5], vec![6, 7, 8, 9, 10]]);
    }

    #[test]
    fn remainder_goes_last() {
        let groups = chunk(1..=10, 3).unwrap();
        let sizes: Vec<_> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, [3, 3, 3, 1]);
        assert_eq!(groups.concat(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn size_larger_than_source() {
        assert_eq!(chunk(["a", "b"], 8).unwrap(), [vec!["a", "b"]]);
    }

    #[test]
    fn empty_source_has_no_groups() {
        assert!(chunk(Vec::<u8>::new(), 2).unwrap().is_empty());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(chunk(1..=10, 0), Err(InvalidChunkSize));
        assert_eq!(chunk(Vec::<u8>::new(), 0), Err(InvalidChunkSize));
    }
}

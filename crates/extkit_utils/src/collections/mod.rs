//! Transforms over in-memory sequences.

// -----------------------------------------------------------------------------
// Modules

mod chunk;
mod flatten;

// -----------------------------------------------------------------------------
// Exports

pub use chunk::{InvalidChunkSize, chunk};
pub use flatten::{Flatten, flatten};

use alloc::vec::Vec;

// -----------------------------------------------------------------------------
// Small sequence helpers

/// Collects `source` into a new `Vec` with `value` pushed at the end.
///
/// # Examples
///
/// ```
/// use extkit_utils::collections::appended;
///
/// assert_eq!(appended(Vec::<i32>::new(), 1), [1]);
/// assert_eq!(appended([1, 2].iter().copied(), 3), [1, 2, 3]);
/// ```
pub fn appended<T>(source: impl IntoIterator<Item = T>, value: T) -> Vec<T> {
    let mut out: Vec<T> = source.into_iter().collect();
    out.push(value);
    out
}

/// Returns `first` if it is `Some`, otherwise the first `Some` in `rest`.
///
/// `rest` is consumed lazily and stops at the first hit.
///
/// # Examples
///
/// ```
/// use extkit_utils::collections::coalesce;
///
/// assert_eq!(coalesce(None, [None, Some("a"), Some("b")]), Some("a"));
/// assert_eq!(coalesce(Some("x"), [Some("a")]), Some("x"));
/// assert_eq!(coalesce::<u8>(None, []), None);
/// ```
pub fn coalesce<T>(first: Option<T>, rest: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    first.or_else(|| rest.into_iter().flatten().next())
}

// -----------------------------------------------------------------------------
// IterExt

/// Method-call access to [`flatten`] and [`chunk`] on any iterable.
///
/// # Examples
///
/// ```
/// use extkit_utils::IterExt;
///
/// let groups = (1..=5).chunked(2).unwrap();
/// assert_eq!(groups, [vec![1, 2], vec![3, 4], vec![5]]);
///
/// let order: Vec<u32> = [1_u32]
///     .flatten_tree(|n| (*n < 4).then(|| [n * 2, n * 2 + 1]))
///     .collect();
/// assert_eq!(order, [1, 3, 7, 6, 2, 5, 4]);
/// ```
pub trait IterExt: IntoIterator + Sized {
    /// See [`flatten`].
    #[inline]
    fn flatten_tree<F, C>(self, children: F) -> Flatten<Self::Item, F>
    where
        F: FnMut(&Self::Item) -> Option<C>,
        C: IntoIterator<Item = Self::Item>,
    {
        flatten(self, children)
    }

    /// See [`chunk`].
    #[inline]
    fn chunked(self, size: usize) -> Result<Vec<Vec<Self::Item>>, InvalidChunkSize> {
        chunk(self, size)
    }
}

impl<I: IntoIterator> IterExt for I {}

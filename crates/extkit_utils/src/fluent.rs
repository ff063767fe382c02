//! Chaining primitives available on every value.

/// Fluent helpers implemented for every sized type.
///
/// # Examples
///
/// ```
/// use extkit_utils::Fluent;
///
/// let len = String::from("hello")
///     .tap(|s| assert_eq!(s, "hello"))
///     .tap_mut(|s| s.push('!'))
///     .pipe(|s| s.len());
///
/// assert_eq!(len, 6);
/// assert!(2.is_in(&[1, 2, 3]));
/// ```
pub trait Fluent: Sized {
    /// Runs `f` on a shared reference, then returns `self` unchanged.
    #[inline]
    fn tap(self, f: impl FnOnce(&Self)) -> Self {
        f(&self);
        self
    }

    /// Runs `f` on a mutable reference, then returns `self`.
    #[inline]
    fn tap_mut(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Passes `self` into `f` and returns its result.
    #[inline]
    fn pipe<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }

    /// Returns `true` if any of `values` equals `self`.
    #[inline]
    fn is_in(&self, values: &[Self]) -> bool
    where
        Self: PartialEq,
    {
        values.contains(self)
    }
}

impl<T> Fluent for T {}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::Fluent;

    #[test]
    fn tap_runs_once_and_returns_input() {
        let calls = Cell::new(0);
        let value = 1.tap(|x| {
            assert_eq!(*x, 1);
            calls.set(calls.get() + 1);
        });
        assert_eq!(value, 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn pipe_maps_value() {
        assert_eq!(1.pipe(|_| 2), 2);
        assert_eq!("abc".pipe(str::len), 3);
    }

    #[test]
    fn is_in_checks_membership() {
        assert!(2.is_in(&[1, 2, 3]));
        assert!(!4.is_in(&[1, 2, 3]));
        assert!(!'a'.is_in(&[]));
    }
}

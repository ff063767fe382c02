/// Shorthand for [`Default::default()`].
///
/// Reads better than a turbofish when the target type is already known,
/// e.g. when a missing input has to be answered with an empty value.
///
/// # Example
///
/// ```
/// use extkit_utils::default;
///
/// fn or_empty(input: Option<Vec<u8>>) -> Vec<u8> {
///     match input {
///         Some(bytes) => bytes,
///         None => default(),
///     }
/// }
///
/// assert!(or_empty(None).is_empty());
/// assert_eq!(or_empty(Some(vec![1])), [1]);
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}

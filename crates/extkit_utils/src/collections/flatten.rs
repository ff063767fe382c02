use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;

// -----------------------------------------------------------------------------
// flatten

/// Lazily walks a forest depth-first using an explicit stack.
///
/// `roots` are pushed in their given order. Each step pops the top node,
/// pushes the nodes returned by `children` (in their given order, `None`
/// meaning a leaf) and yields the popped node. No call-stack recursion is
/// involved, so arbitrarily deep trees are fine.
///
/// Because the stack is last-in-first-out, siblings come out in **reverse**
/// of their given order, and the last root is visited first. A path is always
/// exhausted before backtracking.
///
/// There is no cycle detection: a node reachable from itself is produced
/// forever.
///
/// # Examples
///
/// `children` runs for a node at the moment that node is yielded, not on the
/// following call, so `take(n)` expands exactly `n` nodes.
///
/// ```
/// use extkit_utils::collections::flatten;
///
/// struct Node {
///     id: &'static str,
///     children: Option<Vec<Node>>,
/// }
///
/// let leaf = |id| Node { id, children: None };
/// let roots = vec![
///     Node { id: "1", children: Some(vec![leaf("10"), leaf("11")]) },
///     Node { id: "2", children: Some(vec![leaf("12"), leaf("13")]) },
/// ];
///
/// let ids: Vec<_> = flatten(&roots, |n| n.children.as_ref()).map(|n| n.id).collect();
/// assert_eq!(ids, ["2", "13", "12", "1", "11", "10"]);
/// ```
pub fn flatten<I, F, C>(roots: I, children: F) -> Flatten<I::Item, F>
where
    I: IntoIterator,
    F: FnMut(&I::Item) -> Option<C>,
    C: IntoIterator<Item = I::Item>,
{
    Flatten {
        stack: roots.into_iter().collect(),
        children,
    }
}

/// Iterator returned by [`flatten`].
///
/// Single pass: once drained, call [`flatten`] again to restart.
#[derive(Clone)]
pub struct Flatten<T, F> {
    stack: Vec<T>,
    children: F,
}

impl<T, F, C> Iterator for Flatten<T, F>
where
    F: FnMut(&T) -> Option<C>,
    C: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.stack.pop()?;
        if let Some(children) = (self.children)(&node) {
            self.stack.extend(children);
        }
        Some(node)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<T, F, C> FusedIterator for Flatten<T, F>
where
    F: FnMut(&T) -> Option<C>,
    C: IntoIterator<Item = T>,
{
}

impl<T: Debug, F> Debug for Flatten<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten")
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

//! Non-empty vector type for collections that can never be empty
//!
//! [`NonEmptyVec<T>`] stores a distinguished head element plus a (possibly
//! empty) tail, so `len() == 1 + tail().len()` holds structurally. It is the
//! input type of [`reduce`](crate::traverse::reduce), which needs a first
//! element to seed its accumulator.
//!
//! # Examples
//!
//! ```
//! use undertow::NonEmptyVec;
//!
//! let nev = NonEmptyVec::of(1, [2, 3, 4]);
//! assert_eq!(nev.head(), &1);
//! assert_eq!(nev.tail(), &[2, 3, 4]);
//! assert_eq!(nev.len(), 4);
//! ```

/// A vector guaranteed to contain at least one element.
///
/// # Example
///
/// ```
/// use undertow::NonEmptyVec;
///
/// let nev = NonEmptyVec::new("a", vec!["b"]);
/// assert_eq!(nev.len(), 2);
/// assert_eq!(nev.last(), &"b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Create a non-empty vector from a head element and a tail.
    pub fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Create a non-empty vector from a head and any number of further elements.
    ///
    /// # Example
    ///
    /// ```
    /// use undertow::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::of('x', ['y', 'z']);
    /// assert_eq!(nev.into_vec(), vec!['x', 'y', 'z']);
    ///
    /// let one = NonEmptyVec::of(10, []);
    /// assert_eq!(one.len(), 1);
    /// ```
    pub fn of<I>(head: T, rest: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(head, rest.into_iter().collect())
    }

    /// Create a non-empty vector holding a single element.
    pub fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Try to create a non-empty vector from a `Vec`.
    ///
    /// Returns `None` if the vector is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use undertow::NonEmptyVec;
    ///
    /// assert!(NonEmptyVec::from_vec(vec![1, 2]).is_some());
    /// assert!(NonEmptyVec::from_vec(Vec::<i32>::new()).is_none());
    /// ```
    pub fn from_vec(vec: Vec<T>) -> Option<Self> {
        let mut items = vec.into_iter();
        let head = items.next()?;
        Some(Self::new(head, items.collect()))
    }

    /// Create a non-empty vector from a `Vec` the caller knows is non-empty.
    ///
    /// An empty input is a programming error, not a recoverable failure, so
    /// this never hands back an `Option` or an error value.
    ///
    /// # Panics
    ///
    /// Panics if `vec` is empty.
    ///
    /// ```should_panic
    /// use undertow::NonEmptyVec;
    ///
    /// let _ = NonEmptyVec::unsafe_from_vec(Vec::<i32>::new());
    /// ```
    pub fn unsafe_from_vec(vec: Vec<T>) -> Self {
        match Self::from_vec(vec) {
            Some(nev) => nev,
            None => panic!("NonEmptyVec::unsafe_from_vec called on empty Vec"),
        }
    }

    /// The first element.
    pub fn head(&self) -> &T {
        &self.head
    }

    /// All elements after the first.
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// The last element.
    pub fn last(&self) -> &T {
        self.tail.last().unwrap_or(&self.head)
    }

    /// Number of elements. Always >= 1.
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Always `false`; present to satisfy clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Append an element.
    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    /// Split into the head and the tail.
    pub fn into_parts(self) -> (T, Vec<T>) {
        (self.head, self.tail)
    }

    /// Map a function over all elements, head first.
    ///
    /// # Example
    ///
    /// ```
    /// use undertow::NonEmptyVec;
    ///
    /// let doubled = NonEmptyVec::of(1, [2, 3]).map(|x| x * 2);
    /// assert_eq!(doubled.into_vec(), vec![2, 4, 6]);
    /// ```
    pub fn map<U, F>(self, mut f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> U,
    {
        let head = f(self.head);
        let tail = self.tail.into_iter().map(f).collect();
        NonEmptyVec::new(head, tail)
    }

    /// Map each element to a non-empty vector and concatenate the results.
    ///
    /// The head of the output is the head of `f(head)`, so the result is
    /// non-empty by construction.
    ///
    /// # Example
    ///
    /// ```
    /// use undertow::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::of(1, [2]).flat_map(|x| NonEmptyVec::of(x, [x * 10]));
    /// assert_eq!(nev.into_vec(), vec![1, 10, 2, 20]);
    /// ```
    pub fn flat_map<U, F>(self, mut f: F) -> NonEmptyVec<U>
    where
        F: FnMut(T) -> NonEmptyVec<U>,
    {
        let (head, mut tail) = f(self.head).into_parts();
        for item in self.tail {
            let (h, t) = f(item).into_parts();
            tail.push(h);
            tail.extend(t);
        }
        NonEmptyVec::new(head, tail)
    }

    /// Convert to a regular `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        let mut vec = Vec::with_capacity(self.len());
        vec.push(self.head);
        vec.extend(self.tail);
        vec
    }

    /// Iterate over all elements, head first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}

impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}

impl<T> std::ops::Index<usize> for NonEmptyVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.head,
            n => &self.tail[n - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton() {
        let nev = NonEmptyVec::singleton(42);
        assert_eq!(nev.head(), &42);
        assert_eq!(nev.tail(), &[] as &[i32]);
        assert_eq!(nev.len(), 1);
        assert!(!nev.is_empty());
    }

    #[test]
    fn test_of() {
        let nev = NonEmptyVec::of(1, vec![2, 3]);
        assert_eq!(nev.head(), &1);
        assert_eq!(nev.tail(), &[2, 3]);
        assert_eq!(nev.len(), 1 + nev.tail().len());
    }

    #[test]
    fn test_from_vec() {
        let nev = NonEmptyVec::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(nev.head(), &1);
        assert_eq!(nev.tail(), &[2, 3]);

        assert!(NonEmptyVec::from_vec(Vec::<i32>::new()).is_none());
    }

    #[test]
    fn test_unsafe_from_vec() {
        let nev = NonEmptyVec::unsafe_from_vec(vec!["only"]);
        assert_eq!(nev.head(), &"only");
        assert_eq!(nev.len(), 1);
    }

    #[test]
    #[should_panic(expected = "NonEmptyVec::unsafe_from_vec called on empty Vec")]
    fn test_unsafe_from_vec_panics_on_empty() {
        NonEmptyVec::unsafe_from_vec(Vec::<i32>::new());
    }

    #[test]
    fn test_last() {
        assert_eq!(NonEmptyVec::of(1, [2, 3]).last(), &3);
        assert_eq!(NonEmptyVec::singleton(7).last(), &7);
    }

    #[test]
    fn test_push_keeps_invariant() {
        let mut nev = NonEmptyVec::singleton(1);
        nev.push(2);
        nev.push(3);
        assert_eq!(nev.len(), 3);
        assert_eq!(nev.len(), 1 + nev.tail().len());
    }

    #[test]
    fn test_map_preserves_order() {
        let nev = NonEmptyVec::of(1, [2, 3]).map(|x| x.to_string());
        assert_eq!(nev.into_vec(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_flat_map_concatenates() {
        let nev = NonEmptyVec::of(1usize, [2, 3]).flat_map(|x| NonEmptyVec::of(x, vec![x; x]));
        assert_eq!(nev.into_vec(), vec![1, 1, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_flat_map_singletons() {
        let nev = NonEmptyVec::singleton(5).flat_map(NonEmptyVec::singleton);
        assert_eq!(nev, NonEmptyVec::singleton(5));
    }

    #[test]
    fn test_iteration() {
        let nev = NonEmptyVec::of(1, [2, 3]);
        let sum: i32 = nev.iter().sum();
        assert_eq!(sum, 6);

        let collected: Vec<_> = nev.into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn test_index() {
        let nev = NonEmptyVec::of(1, [2, 3]);
        assert_eq!(nev[0], 1);
        assert_eq!(nev[2], 3);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds() {
        let nev = NonEmptyVec::singleton(42);
        let _ = nev[1];
    }
}

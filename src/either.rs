//! The two-way branch every [`AsyncResult`](crate::AsyncResult) resolves to.
//!
//! `Either<L, R>` holds exactly one of a `Left` or a `Right`. Inside this crate
//! `Left` carries an expected, typed error and `Right` carries a success value.
//!
//! # Right-Biased Convention
//!
//! `map` and `and_then` act on the `Right` variant. Operations on the `Left`
//! side are derived by [`swap`](Either::swap)ping, applying the right-biased
//! operation, and swapping back, so both sides stay symmetric.
//!
//! ```rust
//! use undertow::Either;
//!
//! let parsed: Either<String, i32> = Either::right(21);
//! assert_eq!(parsed.map(|n| n * 2), Either::right(42));
//!
//! let failed: Either<String, i32> = Either::left("bad input".to_string());
//! let shouted = failed.swap().map(|e| e.to_uppercase()).swap();
//! assert_eq!(shouted, Either::left("BAD INPUT".to_string()));
//! ```

/// A value that is either `Left(L)` or `Right(R)`, never both.
///
/// # Example
///
/// ```rust
/// use undertow::Either;
///
/// let e: Either<&str, u16> = Either::right(404);
/// let text = e.fold(|msg| msg.to_string(), |code| format!("status {}", code));
/// assert_eq!(text, "status 404");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    /// The left variant (expected error by convention)
    Left(L),
    /// The right variant (success by convention)
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Create a `Left` value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Borrow both sides: `&Either<L, R>` to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right value (right-biased `map`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::Either;
    ///
    /// let e: Either<&str, i32> = Either::right(20);
    /// assert_eq!(e.map(|x| x + 1), Either::right(21));
    ///
    /// let e: Either<&str, i32> = Either::left("nope");
    /// assert_eq!(e.map(|x| x + 1), Either::left("nope"));
    /// ```
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Alias for [`map`](Either::map), named for symmetry with `map_left`.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        self.map(f)
    }

    /// Transform the left value, derived from `map` through `swap`.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        self.swap().map(f).swap()
    }

    /// Transform both variants.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Exchange the two sides.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::Either;
    ///
    /// let e: Either<i32, &str> = Either::left(7);
    /// assert_eq!(e.swap(), Either::right(7));
    /// assert_eq!(e.swap().swap(), e);
    /// ```
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Chain a computation on the right value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::Either;
    ///
    /// fn half(n: i32) -> Either<String, i32> {
    ///     if n % 2 == 0 {
    ///         Either::right(n / 2)
    ///     } else {
    ///         Either::left(format!("{} is odd", n))
    ///     }
    /// }
    ///
    /// assert_eq!(Either::right(8).and_then(half), Either::right(4));
    /// assert_eq!(Either::right(3).and_then(half), Either::left("3 is odd".to_string()));
    /// ```
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Collapse both variants into a single value.
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    /// Convert into a standard `Result`, `Right` becoming `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Build from a standard `Result`, `Ok` becoming `Right`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_and_predicates() {
        let left: Either<i32, &str> = Either::left(1);
        let right: Either<i32, &str> = Either::right("ok");

        assert!(left.is_left());
        assert!(!left.is_right());
        assert!(right.is_right());
        assert!(!right.is_left());
    }

    #[test]
    fn test_extractors() {
        let left: Either<i32, &str> = Either::left(1);
        let right: Either<i32, &str> = Either::right("ok");

        assert_eq!(left.into_left(), Some(1));
        assert_eq!(left.into_right(), None);
        assert_eq!(right.into_right(), Some("ok"));
        assert_eq!(right.as_ref(), Either::Right(&"ok"));
    }

    #[test]
    fn test_map_is_right_biased() {
        let left: Either<i32, i32> = Either::left(1);
        let right: Either<i32, i32> = Either::right(1);

        assert_eq!(left.map(|x| x + 10), Either::left(1));
        assert_eq!(right.map(|x| x + 10), Either::right(11));
        assert_eq!(right.map_right(|x| x * 3), Either::right(3));
    }

    #[test]
    fn test_map_left_via_swap() {
        let left: Either<i32, &str> = Either::left(2);
        let right: Either<i32, &str> = Either::right("untouched");

        assert_eq!(left.map_left(|x| x * 5), Either::left(10));
        assert_eq!(right.map_left(|x| x * 5), Either::right("untouched"));
    }

    #[test]
    fn test_bimap() {
        let left: Either<i32, &str> = Either::left(1);
        let right: Either<i32, &str> = Either::right("four");

        assert_eq!(left.bimap(|x| x + 1, str::len), Either::left(2));
        assert_eq!(right.bimap(|x| x + 1, str::len), Either::right(4));
    }

    #[test]
    fn test_swap_is_an_involution() {
        let left: Either<i32, char> = Either::left(9);
        let right: Either<i32, char> = Either::right('z');

        assert_eq!(left.swap(), Either::right(9));
        assert_eq!(right.swap(), Either::left('z'));
        assert_eq!(left.swap().swap(), left);
        assert_eq!(right.swap().swap(), right);
    }

    #[test]
    fn test_and_then_short_circuits_left() {
        let left: Either<&str, i32> = Either::left("stop");
        let mut called = false;
        let out = left.and_then(|x| {
            called = true;
            Either::<&str, i32>::right(x)
        });

        assert_eq!(out, Either::left("stop"));
        assert!(!called);
    }

    #[test]
    fn test_fold() {
        let left: Either<i32, &str> = Either::left(3);
        assert_eq!(left.fold(|n| n * 2, |s| s.len() as i32), 6);
    }

    #[test]
    fn test_result_conversions() {
        let ok: Result<i32, String> = Ok(5);
        let err: Result<i32, String> = Err("e".to_string());

        assert_eq!(Either::from(ok.clone()), Either::right(5));
        assert_eq!(Either::from(err.clone()), Either::left("e".to_string()));

        let back: Result<i32, String> = Either::from(ok.clone()).into();
        assert_eq!(back, ok);
        assert_eq!(Either::from_result(err.clone()).into_result(), err);
    }
}

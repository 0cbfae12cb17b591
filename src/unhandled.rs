//! Failures nobody planned for.
//!
//! An [`Unhandled`] is what an [`AsyncResult`](crate::AsyncResult) settles to
//! when the computation behind it blew up instead of returning a typed error:
//! a panic inside [`async_of`](crate::AsyncResult::async_of), a panic inside a
//! function handed to `map`/`flat_map`, or an error explicitly raised with
//! [`raise_unknown_error`](crate::AsyncResult::raise_unknown_error).
//!
//! It travels on its own channel. `map`, `flat_map`, `recover` and friends
//! never see it; only terminal observers do.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// A shareable, type-erased unhandled failure.
///
/// Cloning is cheap and every clone refers to the same underlying error.
/// Equality is identity: two `Unhandled` values are equal only when they are
/// clones of the same failure.
///
/// # Example
///
/// ```rust
/// use undertow::Unhandled;
///
/// let boom = Unhandled::msg("socket closed");
/// assert_eq!(boom.message(), "socket closed");
/// assert_eq!(boom, boom.clone());
/// assert_ne!(boom, Unhandled::msg("socket closed"));
/// ```
#[derive(Clone)]
pub struct Unhandled {
    error: Arc<dyn StdError + Send + Sync>,
}

impl Unhandled {
    /// Wrap any error type.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Unhandled {
            error: Arc::new(error),
        }
    }

    /// Create from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(Message(message.into()))
    }

    /// Create from the payload of a caught panic.
    ///
    /// `&str` and `String` payloads keep their text; anything else is
    /// reported as an opaque panic.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(s) => *s,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(s) => (*s).to_string(),
                Err(_) => "<non-string panic payload>".to_string(),
            },
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(panic = %message, "captured panic as unhandled failure");

        Self::new(Panicked(message))
    }

    /// The rendered error message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Whether this failure was produced by a caught panic.
    pub fn is_panic(&self) -> bool {
        self.error.is::<Panicked>()
    }

    /// Borrow the underlying error as a concrete type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::Unhandled;
    ///
    /// let err = Unhandled::new(std::io::Error::other("disk full"));
    /// assert!(err.downcast_ref::<std::io::Error>().is_some());
    /// assert!(err.downcast_ref::<std::fmt::Error>().is_none());
    /// ```
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: StdError + 'static,
    {
        self.error.downcast_ref::<T>()
    }
}

impl PartialEq for Unhandled {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}

impl Eq for Unhandled {}

impl fmt::Debug for Unhandled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unhandled").field(&self.error).finish()
    }
}

impl fmt::Display for Unhandled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unhandled failure: {}", self.error)
    }
}

impl StdError for Unhandled {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.error)
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

#[derive(Debug)]
struct Panicked(String);

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.0)
    }
}

impl StdError for Panicked {}

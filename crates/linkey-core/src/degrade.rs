//! Swallow-and-log handling for transient failures.
//!
//! Reading one browser root or one metadata file must never abort a whole
//! operation. Each fallible sub-step returns a `Result`, and the caller decides
//! at the boundary whether to propagate it or to degrade it to an empty value
//! with [`Degrade::or_degrade`].

use std::fmt::Display;

pub trait Degrade<T> {
    /// Return the success value, or log a warning and fall back to `T::default()`
    fn or_degrade(self, context: impl Display) -> T
    where
        T: Default;
}

impl<T, E: Display> Degrade<T> for std::result::Result<T, E> {
    fn or_degrade(self, context: impl Display) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {}", context, err);
                T::default()
            }
        }
    }
}

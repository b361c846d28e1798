//! Errors which may be returned when configuring or binding an `ArcBall`.

use std::{error::Error as StdError, fmt};

/// An error which occurs when an `ArcBallOptions` holds a value the
/// controller cannot work with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OptionsError {
    /// The sensitivity was not a finite, positive number.
    InvalidSensitivity(f32),
}

impl OptionsError {
    /// Returns the rejected sensitivity value.
    #[inline]
    pub fn sensitivity(&self) -> f32 {
        match *self {
            OptionsError::InvalidSensitivity(s) => s,
        }
    }
}

impl fmt::Display for OptionsError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptionsError::InvalidSensitivity(s) => write!(
                f,
                "the sensitivity must be a finite value greater than 0, got {}",
                s
            ),
        }
    }
}

impl StdError for OptionsError {}

/// An error which occurs when binding an `ArcBall` to a `Surface`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BindError {
    /// The `ArcBall` is already bound to a surface. It must be unbound
    /// before it can be bound again.
    AlreadyBound,
}

impl fmt::Display for BindError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BindError::AlreadyBound => f.write_str("The arcball is already bound to a surface"),
        }
    }
}

impl StdError for BindError {}

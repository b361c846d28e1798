//! Contains the options which tune how an `ArcBall` responds to input.

use crate::{errors::OptionsError, MouseButtons};

/// Specify how an `ArcBall` reacts to pointer input.
///
/// # Example
///
/// ```
/// # use arcball::{ArcBallOptions, MouseButtons};
/// let options = ArcBallOptions::new()
///     .with_sensitivity(0.25)
///     .with_buttons(MouseButtons::LEFT | MouseButtons::MIDDLE);
///
/// assert!(options.validate().is_ok());
/// assert!(options.with_sensitivity(0.0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcBallOptions {
    /// Scales both the rotation produced by a drag and the size of each zoom
    /// step. Must be finite and positive.
    pub sensitivity: f32,
    /// Which mouse buttons start a drag.
    pub buttons: MouseButtons,
    #[doc(hidden)]
    _nonexhaustive: (),
}

impl Default for ArcBallOptions {
    #[inline]
    fn default() -> Self {
        ArcBallOptions {
            sensitivity: ArcBallOptions::DEFAULT_SENSITIVITY,
            buttons: MouseButtons::LEFT,
            _nonexhaustive: (),
        }
    }
}

impl ArcBallOptions {
    /// The sensitivity used when none is specified.
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;

    /// Create a new `ArcBallOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets `sensitivity` on `self` to the new `sensitivity`.
    #[inline]
    pub fn with_sensitivity(self, sensitivity: f32) -> Self {
        ArcBallOptions {
            sensitivity,
            ..self
        }
    }

    /// Sets `buttons` on `self` to the new `buttons`.
    #[inline]
    pub const fn with_buttons(self, buttons: MouseButtons) -> Self {
        ArcBallOptions { buttons, ..self }
    }

    /// Checks that the options can be used by an `ArcBall`.
    pub fn validate(&self) -> Result<(), OptionsError> {
        check_sensitivity(self.sensitivity)
    }
}

#[inline]
pub(crate) fn check_sensitivity(sensitivity: f32) -> Result<(), OptionsError> {
    if sensitivity.is_finite() && sensitivity > 0.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidSensitivity(sensitivity))
    }
}

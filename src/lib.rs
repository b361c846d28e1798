// Copyright © 2019 George Burton
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of this software
// and associated documentation files (the "Software"), to deal in the Software without restriction,
// including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all copies or substantial
// portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT
// LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN
// NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
// WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

#![warn(unused_imports, missing_docs)]
#![deny(bare_trait_objects)]

//! # About this library
//!
//! A small library which turns pointer drags over a viewport into an accumulated
//! 3D rotation and scale, using the arc-ball (or "virtual sphere") technique.
//!
//! ## The arc-ball
//!
//! Every pointer position inside the viewport is lifted onto an imaginary hemisphere
//! which is centred on the view and faces the camera. Dragging the pointer from one
//! point of the hemisphere to another describes a rotation about the axis which is
//! perpendicular to both points:
//!
//! ```text
//!             up (y)
//!              |
//!           .--+--.
//!         /    |    \        rx = (x - width / 2) / length
//!        |     o-----|--- right (x)
//!         \   /     /        ry = (height / 2 - y) / length
//!           '/-----'
//!           /                rz = sqrt(radius² - rx² - ry²), or 0 outside the sphere
//!       back (z)
//! ```
//!
//! Each rotation is applied in world space, by left-multiplying the accumulated
//! transform, so that the axes do not drift as the orientation builds up. Scrolling
//! the wheel scales the transform uniformly.
//!
//! ## Using this library.
//!
//! ### Driving the controller directly
//!
//! The [`ArcBall::update`][`ArcBall::update`] method consumes a single [`PointerEvent`]
//! [`PointerEvent`], along with the current [`Viewport`][`Viewport`], and returns the new
//! transform if it changed:
//!
//! ```
//! # use arcball::{pointer_events, ArcBall, Viewport};
//! let viewport = Viewport::new(800, 600);
//! let mut arcball = ArcBall::new();
//!
//! let mut last = None;
//! for event in pointer_events![down(LEFT, 500, 300), move(LEFT, 400, 250), up(LEFT, 400, 250)] {
//!     if let Some(transform) = arcball.update(&event, viewport) {
//!         last = Some(transform);
//!     }
//! }
//!
//! assert!(last.is_some());
//! assert!(!arcball.is_dragging());
//! ```
//!
//! ### Binding to a `Surface`
//!
//! A [`Surface`][`Surface`] stands in for the window or widget which receives pointer
//! input. Binding an `ArcBall` to it with [`ArcBall::bind`][`ArcBall::bind`] subscribes
//! the controller to the surface, and the callback is invoked with every new transform:
//!
//! ```
//! # use arcball::{identity, pointer_events, ArcBall, Surface, Transform};
//! # use std::{cell::RefCell, rc::Rc};
//! let mut surface = Surface::new(800, 600);
//! let arcball = Rc::new(RefCell::new(ArcBall::new()));
//! let seen = Rc::new(RefCell::new(Vec::<Transform>::new()));
//!
//! let sink = Rc::clone(&seen);
//! ArcBall::bind(&arcball, &mut surface, identity(), move |m: &Transform| {
//!     sink.borrow_mut().push(*m)
//! })
//! .unwrap();
//!
//! for event in pointer_events![wheel(1), wheel(-1)] {
//!     surface.dispatch(&event);
//! }
//!
//! assert_eq!(seen.borrow().len(), 2);
//! arcball.borrow_mut().unbind();
//! ```
//!
//! ### Configuration
//!
//! The sensitivity of the controller and the mouse buttons which start a drag are set
//! through [`ArcBallOptions`][`ArcBallOptions`].
//!
//! [`ArcBall::update`]: struct.ArcBall.html#method.update
//! [`ArcBall::bind`]: struct.ArcBall.html#method.bind
//! [`PointerEvent`]: enum.PointerEvent.html
//! [`Viewport`]: struct.Viewport.html
//! [`Surface`]: surface/struct.Surface.html
//! [`ArcBallOptions`]: options/struct.ArcBallOptions.html

#[macro_use]
mod macros;

pub mod errors;
pub mod options;
pub mod surface;
pub mod vector;

#[cfg(feature = "ffi")]
pub mod ffi;

mod arcball;

use mint::ColumnMatrix4;
use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

pub use arcball::{ArcBall, DragState, RotationStep};
pub use options::ArcBallOptions;
pub use surface::{ListenerId, PointerListener, Subscription, Surface};

/// The accumulated transform maintained by an [`ArcBall`][`ArcBall`], as a column-major
/// 4x4 matrix.
///
/// [`ArcBall`]: struct.ArcBall.html
pub type Transform = ColumnMatrix4<f32>;

/// Returns the identity `Transform`.
///
/// # Example
///
/// ```
/// let m = arcball::identity();
/// assert_eq!(m.x.x, 1.0);
/// assert_eq!(m.w.x, 0.0);
/// ```
#[inline]
pub fn identity() -> Transform {
    nalgebra::Matrix4::<f32>::identity().into()
}

/// The pixel dimensions of the area which receives pointer input.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Viewport {
    /// Width of the viewport in pixels.
    pub width: u32,
    /// Height of the viewport in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a new `Viewport` with the given `width` and `height`.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// The longest side of the viewport, which is used to bring pixel
    /// coordinates into the unit range.
    #[inline]
    pub fn length(&self) -> f32 {
        self.width.max(self.height) as f32
    }

    /// The squared radius of the virtual sphere: the squared distance from the
    /// centre of the viewport to one of its corners, in units of `length`.
    ///
    /// # Notes
    ///
    /// The half extents are computed with integer division, so odd dimensions
    /// are rounded down.
    #[inline]
    pub fn radius_squared(&self) -> f32 {
        let length = self.length();
        let rx = (self.width / 2) as f32 / length;
        let ry = (self.height / 2) as f32 / length;
        rx * rx + ry * ry
    }

    /// Returns `true` if either dimension is `0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Viewport {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Viewport::new(width, height)
    }
}

/// A set of mouse buttons.
///
/// # Example
///
/// ```
/// # use arcball::MouseButtons;
/// let buttons = MouseButtons::LEFT | MouseButtons::RIGHT;
/// assert!(buttons.intersects(MouseButtons::LEFT));
/// assert!(!buttons.intersects(MouseButtons::MIDDLE));
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct MouseButtons(u8);

impl MouseButtons {
    /// No buttons.
    pub const NONE: MouseButtons = MouseButtons(0);
    /// The primary button.
    pub const LEFT: MouseButtons = MouseButtons(1);
    /// The secondary button.
    pub const RIGHT: MouseButtons = MouseButtons(1 << 1);
    /// The wheel button.
    pub const MIDDLE: MouseButtons = MouseButtons(1 << 2);
    /// The first extended button, usually "back".
    pub const X1: MouseButtons = MouseButtons(1 << 3);
    /// The second extended button, usually "forward".
    pub const X2: MouseButtons = MouseButtons(1 << 4);
    /// Every button.
    pub const ALL: MouseButtons = MouseButtons(0b1_1111);

    /// Create a `MouseButtons` from raw bits, discarding any bits which do not
    /// correspond to a button.
    #[inline]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        MouseButtons((bits & MouseButtons::ALL.0 as u32) as u8)
    }

    /// Returns the raw bits of the set.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0 as u32
    }

    /// Returns `true` if no buttons are in the set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the two sets share at least one button.
    #[inline]
    pub const fn intersects(&self, other: MouseButtons) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every button in `other` is also in `self`.
    #[inline]
    pub const fn contains(&self, other: MouseButtons) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Debug for MouseButtons {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(MouseButtons, &str); 5] = [
            (MouseButtons::LEFT, "LEFT"),
            (MouseButtons::RIGHT, "RIGHT"),
            (MouseButtons::MIDDLE, "MIDDLE"),
            (MouseButtons::X1, "X1"),
            (MouseButtons::X2, "X2"),
        ];

        if self.is_empty() {
            return fmtr.write_str("NONE");
        }

        let mut first = true;
        for &(button, name) in NAMES.iter() {
            if self.contains(button) {
                if !first {
                    fmtr.write_str(" | ")?;
                }
                fmtr.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl BitOr for MouseButtons {
    type Output = MouseButtons;
    #[inline]
    fn bitor(self, rhs: MouseButtons) -> Self::Output {
        MouseButtons(self.0 | rhs.0)
    }
}

impl BitOrAssign for MouseButtons {
    #[inline]
    fn bitor_assign(&mut self, rhs: MouseButtons) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for MouseButtons {
    type Output = MouseButtons;
    #[inline]
    fn bitand(self, rhs: MouseButtons) -> Self::Output {
        MouseButtons(self.0 & rhs.0)
    }
}

impl BitAndAssign for MouseButtons {
    #[inline]
    fn bitand_assign(&mut self, rhs: MouseButtons) {
        self.0 &= rhs.0;
    }
}

impl Not for MouseButtons {
    type Output = MouseButtons;
    #[inline]
    fn not(self) -> Self::Output {
        MouseButtons(!self.0 & MouseButtons::ALL.0)
    }
}

/// A pointer event delivered by the host.
///
/// Coordinates are in pixels, with the origin at the top-left corner of the
/// viewport. They may lie outside of the viewport while a drag is in progress.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PointerEvent {
    /// A button was pressed.
    Down {
        /// The button which was pressed.
        button: MouseButtons,
        /// Horizontal position of the pointer.
        x: i32,
        /// Vertical position of the pointer.
        y: i32,
    },
    /// The pointer moved.
    Move {
        /// The buttons held while moving.
        buttons: MouseButtons,
        /// Horizontal position of the pointer.
        x: i32,
        /// Vertical position of the pointer.
        y: i32,
    },
    /// A button was released.
    Up {
        /// The button which was released.
        button: MouseButtons,
        /// Horizontal position of the pointer.
        x: i32,
        /// Vertical position of the pointer.
        y: i32,
    },
    /// The wheel was scrolled. Positive values scroll away from the user.
    Wheel {
        /// The signed amount which the wheel was scrolled.
        delta: i32,
    },
}

impl PointerEvent {
    /// Returns the pointer position of the event, or `None` for wheel events.
    #[inline]
    pub fn position(&self) -> Option<(i32, i32)> {
        match *self {
            PointerEvent::Down { x, y, .. }
            | PointerEvent::Move { x, y, .. }
            | PointerEvent::Up { x, y, .. } => Some((x, y)),
            PointerEvent::Wheel { .. } => None,
        }
    }

    /// Returns the buttons which the event carries.
    #[inline]
    pub fn buttons(&self) -> MouseButtons {
        match *self {
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => button,
            PointerEvent::Move { buttons, .. } => buttons,
            PointerEvent::Wheel { .. } => MouseButtons::NONE,
        }
    }
}

#![allow(nonstandard_style)]

//! The ffi interface to the `arcball` crate. You must enable the `ffi` feature
//! to access this module.
//!
//! # Features
//!
//! The `ffi` module defines a C-compatible interface to an [`ArcBall`][`ArcBall`].
//! A C host creates a controller with [`arcball_new`][`arcball_new`], feeds it
//! events with [`arcball_update`][`arcball_update`], and receives new transforms
//! either through the out parameter of `arcball_update` or through a callback
//! registered with [`arcball_set_callback`][`arcball_set_callback`].
//!
//! [`ArcBall`]: ../struct.ArcBall.html
//! [`arcball_new`]: fn.arcball_new.html
//! [`arcball_update`]: fn.arcball_update.html
//! [`arcball_set_callback`]: fn.arcball_set_callback.html

use crate::{ArcBall, ArcBallOptions, MouseButtons, PointerEvent, Transform, Viewport};
use libc::{c_float, c_int, c_void};
use log::debug;
use mint::{ColumnMatrix4, Vector4};
use static_assertions::assert_eq_size;
use std::{fmt, ptr};

/// A column-major 4x4 matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct arcball_Matrix4 {
    /// The 16 elements of the matrix, stored column by column.
    pub m: [c_float; 16],
}

assert_eq_size!(arcball_Matrix4, [f32; 16]);

impl Default for arcball_Matrix4 {
    #[inline]
    fn default() -> Self {
        crate::identity().into()
    }
}

/// The type of an `arcball_Event`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum arcball_EventKind {
    /// A button was pressed. Uses `buttons`, `x` and `y`.
    POINTER_DOWN,
    /// The pointer moved. Uses `buttons`, `x` and `y`.
    POINTER_MOVE,
    /// A button was released. Uses `buttons`, `x` and `y`.
    POINTER_UP,
    /// The wheel was scrolled. Uses `delta`.
    WHEEL,
}

/// A pointer event. Fields which are not used by the `kind` of the event
/// are ignored.
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct arcball_Event {
    /// The type of the event.
    pub kind: arcball_EventKind,
    /// A bit mask of the buttons of the event: `1` is the left button, `2` the right,
    /// `4` the middle, and `8` and `16` the extended buttons.
    pub buttons: u32,
    /// Horizontal position of the pointer in pixels from the left edge.
    pub x: c_int,
    /// Vertical position of the pointer in pixels from the top edge.
    pub y: c_int,
    /// The signed amount the wheel was scrolled.
    pub delta: c_int,
}

/// The size in pixels of the area receiving pointer events.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct arcball_Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A function called with every new transform, together with the `user_data`
/// pointer given to `arcball_set_callback`.
pub type arcball_Callback =
    Option<unsafe extern "C" fn(transform: *const arcball_Matrix4, user_data: *mut c_void)>;

/// An opaque arc-ball controller.
pub struct arcball_ArcBall {
    arcball: ArcBall,
    callback: arcball_Callback,
    user_data: *mut c_void,
}

impl fmt::Debug for arcball_ArcBall {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_struct("arcball_ArcBall")
            .field("arcball", &self.arcball)
            .field("has_callback", &self.callback.is_some())
            .field("user_data", &self.user_data)
            .finish()
    }
}

/// Create a new arc-ball controller with an identity transform.
///
/// Returns `NULL` if `sensitivity` is not a finite value greater than `0`.
/// The controller must be destroyed with `arcball_destroy`.
#[no_mangle]
pub extern "C" fn arcball_new(sensitivity: c_float, buttons: u32) -> *mut arcball_ArcBall {
    let options = ArcBallOptions::new()
        .with_sensitivity(sensitivity)
        .with_buttons(MouseButtons::from_bits_truncate(buttons));

    match ArcBall::with_options(options) {
        Ok(arcball) => Box::into_raw(Box::new(arcball_ArcBall {
            arcball,
            callback: None,
            user_data: ptr::null_mut(),
        })),
        Err(e) => {
            debug!("arcball_new: {}", e);
            ptr::null_mut()
        }
    }
}

/// Destroy a controller created with `arcball_new`. Passing `NULL` does nothing.
#[no_mangle]
pub unsafe extern "C" fn arcball_destroy(arcball: *mut arcball_ArcBall) {
    if !arcball.is_null() {
        drop(Box::from_raw(arcball));
    }
}

/// Register `callback` to be called with every new transform produced by
/// `arcball_update`. Passing a `NULL` callback removes it.
///
/// Returns `0` on success, or a non-0 value if `arcball` is `NULL`.
#[no_mangle]
pub unsafe extern "C" fn arcball_set_callback(
    arcball: *mut arcball_ArcBall,
    callback: arcball_Callback,
    user_data: *mut c_void,
) -> c_int {
    match arcball.as_mut() {
        Some(arcball) => {
            arcball.callback = callback;
            arcball.user_data = user_data;
            0
        }
        None => 1,
    }
}

/// Process a single pointer `event` over `viewport`.
///
/// * Returns `1` if the transform changed. The new transform is written to
///   `out_transform` if it is not `NULL`, and the callback is invoked.
///
/// * Returns `0` if the transform did not change, in which case `out_transform`
///   is not modified.
///
/// * Returns `-1` if `arcball` or `event` is `NULL`.
#[no_mangle]
pub unsafe extern "C" fn arcball_update(
    arcball: *mut arcball_ArcBall,
    event: *const arcball_Event,
    viewport: arcball_Viewport,
    out_transform: *mut arcball_Matrix4,
) -> c_int {
    let (arcball, event) = match (arcball.as_mut(), event.as_ref()) {
        (Some(arcball), Some(event)) => (arcball, PointerEvent::from(*event)),
        _ => return -1,
    };

    let transform = match arcball.arcball.update(&event, viewport.into()) {
        Some(transform) => arcball_Matrix4::from(transform),
        None => return 0,
    };

    if let Some(out_transform) = out_transform.as_mut() {
        *out_transform = transform;
    }

    if let Some(callback) = arcball.callback {
        callback(&transform, arcball.user_data);
    }

    1
}

/// Write the current transform of `arcball` to `out_transform`.
///
/// Returns `0` on success, or a non-0 value if either pointer is `NULL`.
#[no_mangle]
pub unsafe extern "C" fn arcball_get_transform(
    arcball: *const arcball_ArcBall,
    out_transform: *mut arcball_Matrix4,
) -> c_int {
    match (arcball.as_ref(), out_transform.as_mut()) {
        (Some(arcball), Some(out_transform)) => {
            *out_transform = arcball.arcball.transform().into();
            0
        }
        _ => 1,
    }
}

/// Replace the transform of `arcball` with `transform`, ending any drag
/// in progress. The callback is not invoked.
///
/// Returns `0` on success, or a non-0 value if either pointer is `NULL`.
#[no_mangle]
pub unsafe extern "C" fn arcball_set_transform(
    arcball: *mut arcball_ArcBall,
    transform: *const arcball_Matrix4,
) -> c_int {
    match (arcball.as_mut(), transform.as_ref()) {
        (Some(arcball), Some(transform)) => {
            arcball.arcball.reset_transform(*transform);
            0
        }
        _ => 1,
    }
}

/// Set the sensitivity of `arcball`.
///
/// Returns `0` on success, or a non-0 value if `arcball` is `NULL` or
/// `sensitivity` is not a finite value greater than `0`.
#[no_mangle]
pub unsafe extern "C" fn arcball_set_sensitivity(
    arcball: *mut arcball_ArcBall,
    sensitivity: c_float,
) -> c_int {
    match arcball.as_mut() {
        Some(arcball) => match arcball.arcball.set_sensitivity(sensitivity) {
            Ok(()) => 0,
            Err(_) => 2,
        },
        None => 1,
    }
}

/// Set the mouse buttons which start a drag, as a bit mask.
///
/// Returns `0` on success, or a non-0 value if `arcball` is `NULL`.
#[no_mangle]
pub unsafe extern "C" fn arcball_set_buttons(
    arcball: *mut arcball_ArcBall,
    buttons: u32,
) -> c_int {
    match arcball.as_mut() {
        Some(arcball) => {
            arcball.arcball.set_buttons(MouseButtons::from_bits_truncate(buttons));
            0
        }
        None => 1,
    }
}

impl From<Transform> for arcball_Matrix4 {
    #[inline]
    fn from(transform: Transform) -> Self {
        let ColumnMatrix4 { x, y, z, w } = transform;
        arcball_Matrix4 {
            m: [
                x.x, x.y, x.z, x.w, y.x, y.y, y.z, y.w, z.x, z.y, z.z, z.w, w.x, w.y, w.z, w.w,
            ],
        }
    }
}

impl From<arcball_Matrix4> for Transform {
    #[inline]
    fn from(matrix: arcball_Matrix4) -> Self {
        let m = matrix.m;
        let column = |i: usize| Vector4 {
            x: m[i * 4],
            y: m[i * 4 + 1],
            z: m[i * 4 + 2],
            w: m[i * 4 + 3],
        };

        ColumnMatrix4 {
            x: column(0),
            y: column(1),
            z: column(2),
            w: column(3),
        }
    }
}

impl From<arcball_Viewport> for Viewport {
    #[inline]
    fn from(viewport: arcball_Viewport) -> Self {
        Viewport::new(viewport.width, viewport.height)
    }
}

impl From<arcball_Event> for PointerEvent {
    #[inline]
    fn from(event: arcball_Event) -> Self {
        let buttons = MouseButtons::from_bits_truncate(event.buttons);
        let arcball_Event { x, y, delta, .. } = event;
        match event.kind {
            arcball_EventKind::POINTER_DOWN => PointerEvent::Down {
                button: buttons,
                x,
                y,
            },
            arcball_EventKind::POINTER_MOVE => PointerEvent::Move { buttons, x, y },
            arcball_EventKind::POINTER_UP => PointerEvent::Up {
                button: buttons,
                x,
                y,
            },
            arcball_EventKind::WHEEL => PointerEvent::Wheel { delta },
        }
    }
}

use crate::{
    errors::{BindError, OptionsError},
    options::{check_sensitivity, ArcBallOptions},
    surface::{PointerListener, Subscription, Surface},
    vector, MouseButtons, PointerEvent, Transform, Viewport,
};
use log::{debug, trace, warn};
use mint::Vector3;
use nalgebra::{Matrix4, Unit};
use std::{cell::RefCell, fmt, rc::Rc};

/// Basis of the frame which the virtual sphere lives in.
const RIGHT: Vector3<f32> = Vector3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};
const UP: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};
const BACK: Vector3<f32> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

type Callback = Box<dyn FnMut(&Transform)>;

impl Viewport {
    /// Lifts the pixel position (`x`, `y`) onto the virtual sphere of this viewport.
    ///
    /// The sphere is centred on the viewport and passes through its corners. Points
    /// which fall outside of the sphere are clamped to its equator, so the `z`
    /// component of the result is never negative.
    ///
    /// # Notes
    ///
    /// An empty viewport has no sphere, and every component of the result will be
    /// NaN or `0`.
    ///
    /// # Example
    ///
    /// ```
    /// # use arcball::Viewport;
    /// let p = Viewport::new(800, 600).project(400, 300);
    /// assert_eq!((p.x, p.y, p.z), (0.0, 0.0, 0.625));
    /// ```
    pub fn project(&self, x: i32, y: i32) -> Vector3<f32> {
        let length = self.length();
        let rx = (i64::from(x) - i64::from(self.width / 2)) as f32 / length;
        let ry = (i64::from(self.height / 2) - i64::from(y)) as f32 / length;
        let zz = self.radius_squared() - rx * rx - ry * ry;
        let rz = if zz > 0.0 { zz.sqrt() } else { 0.0 };

        Vector3 {
            x: rx * RIGHT.x + ry * UP.x + rz * BACK.x,
            y: rx * RIGHT.y + ry * UP.y + rz * BACK.y,
            z: rx * RIGHT.z + ry * UP.z + rz * BACK.z,
        }
    }
}

/// A single rotation of the arc-ball, between two points on the virtual sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationStep {
    /// The angle of the rotation in degrees, already scaled by the sensitivity.
    pub angle_degrees: f32,
    /// The axis of the rotation. This is normalised so that its components
    /// sum to `1` in magnitude, and is degenerate if no rotation is possible.
    pub axis: Vector3<f32>,
}

impl RotationStep {
    /// Computes the rotation which carries `start` onto `end`, with the angle
    /// scaled by `sensitivity`.
    pub fn between(start: Vector3<f32>, end: Vector3<f32>, sensitivity: f32) -> Self {
        let cos_angle = vector::cos_angle(start, end);
        RotationStep {
            angle_degrees: sensitivity * cos_angle.acos().to_degrees(),
            axis: vector::normalize(vector::cross(start, end)),
        }
    }

    /// Returns `true` if the axis of the rotation is undefined, which is the case
    /// when the two points are (anti)parallel or either one is of zero length.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        vector::is_degenerate(self.axis)
    }

    /// Returns the rotation as a homogeneous matrix, or `None` if it is degenerate.
    pub fn to_matrix(&self) -> Option<Matrix4<f32>> {
        if self.is_degenerate() || !self.angle_degrees.is_finite() {
            return None;
        }

        let axis = Unit::new_normalize(nalgebra::Vector3::from(self.axis));
        Some(Matrix4::from_axis_angle(&axis, self.angle_degrees.to_radians()))
    }
}

/// Whether a drag is in progress.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DragState {
    /// No drag is in progress.
    Idle,
    /// A bound button is held, and pointer movement rotates the transform.
    Dragging,
}

impl Default for DragState {
    #[inline]
    fn default() -> Self {
        DragState::Idle
    }
}

/// An arc-ball controller, which accumulates pointer drags into rotations and
/// wheel steps into uniform scalings of a single transform.
///
/// An `ArcBall` can be driven directly with [`update`][`update`], or bound to a
/// [`Surface`][`Surface`] with [`bind`][`bind`], in which case a callback is
/// invoked with every new transform.
///
/// [`update`]: #method.update
/// [`bind`]: #method.bind
/// [`Surface`]: surface/struct.Surface.html
pub struct ArcBall {
    /// The accumulated rotations and scalings.
    transform: Matrix4<f32>,
    options: ArcBallOptions,
    /// The bound buttons at the time the current drag started.
    drag_buttons: MouseButtons,
    /// The viewport at the time the current drag started.
    bounds: Viewport,
    state: DragState,
    start_vector: Vector3<f32>,
    end_vector: Vector3<f32>,
    /// The axis of the last attempted rotation. Kept for diagnostics only.
    rotation_axis: Vector3<f32>,
    callback: Option<Callback>,
    subscription: Option<Subscription>,
}

impl ArcBall {
    /// Create a new `ArcBall` with the default options and an identity transform.
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a new `ArcBall` with the given options and an identity transform.
    ///
    /// Returns `Err` if the options are invalid.
    pub fn with_options(options: ArcBallOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(ArcBall {
            options,
            drag_buttons: options.buttons,
            ..Default::default()
        })
    }

    /// Create a new `ArcBall` with the default options, starting from `transform`.
    #[inline]
    pub fn with_transform<M: Into<Transform>>(transform: M) -> Self {
        let transform: Transform = transform.into();
        ArcBall {
            transform: Matrix4::from(transform),
            ..Default::default()
        }
    }

    /// Binds `this` to `surface`: `initial` becomes the starting transform, and
    /// `callback` is invoked with the new transform every time it changes in
    /// response to an event dispatched to the surface.
    ///
    /// Returns `Err` if the `ArcBall` is already bound. Call [`unbind`][`unbind`]
    /// before binding it again.
    ///
    /// # Panics
    ///
    /// Panics if `this` is currently borrowed.
    ///
    /// # Notes
    ///
    /// The callback runs while the `ArcBall` is mutably borrowed, so it must not
    /// try to borrow `this`.
    ///
    /// [`unbind`]: #method.unbind
    pub fn bind<M, F>(
        this: &Rc<RefCell<ArcBall>>,
        surface: &mut Surface,
        initial: M,
        callback: F,
    ) -> Result<(), BindError>
    where
        M: Into<Transform>,
        F: FnMut(&Transform) + 'static,
    {
        let mut arcball = this.borrow_mut();
        if arcball.is_bound() {
            return Err(BindError::AlreadyBound);
        }

        let initial: Transform = initial.into();
        arcball.transform = Matrix4::from(initial);
        arcball.callback = Some(Box::new(callback));
        arcball.subscription = Some(surface.subscribe(this));
        debug!("arcball bound to {:?}", surface.viewport());

        Ok(())
    }

    /// Unsubscribes from the bound surface, forgets the callback and ends any drag
    /// in progress. Does nothing if the `ArcBall` is not bound.
    pub fn unbind(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            debug!("arcball unbound");
        }
        self.callback = None;
        self.state = DragState::Idle;
    }

    /// Returns `true` if the `ArcBall` is bound to a surface.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    /// Processes a single pointer `event` over `viewport`.
    ///
    /// Returns the new transform if the event changed it, or `None` otherwise. This
    /// method never invokes the callback given to [`bind`][`bind`].
    ///
    /// # Notes
    ///
    /// `viewport` is only read when a drag starts. Events must be given in the
    /// order in which they happened, as each rotation continues from the last.
    ///
    /// [`bind`]: #method.bind
    pub fn update(&mut self, event: &PointerEvent, viewport: Viewport) -> Option<Transform> {
        match *event {
            PointerEvent::Down { button, x, y } => {
                self.pointer_down(button, x, y, viewport);
                None
            }
            PointerEvent::Move { buttons, x, y } => self.pointer_move(buttons, x, y),
            PointerEvent::Up { button, .. } => {
                self.pointer_up(button);
                None
            }
            PointerEvent::Wheel { delta } => self.wheel(delta),
        }
    }

    fn pointer_down(&mut self, button: MouseButtons, x: i32, y: i32, viewport: Viewport) {
        self.drag_buttons = self.options.buttons;
        if !button.intersects(self.drag_buttons) {
            return;
        }

        if viewport.is_empty() {
            debug!("drag started over an empty viewport {:?}", viewport);
        }

        self.bounds = viewport;
        self.start_vector = self.bounds.project(x, y);
        self.state = DragState::Dragging;
        debug!("drag started at ({}, {}) -> {:?}", x, y, self.start_vector);
    }

    fn pointer_move(&mut self, buttons: MouseButtons, x: i32, y: i32) -> Option<Transform> {
        if self.state != DragState::Dragging || !buttons.intersects(self.drag_buttons) {
            return None;
        }

        self.end_vector = self.bounds.project(x, y);
        trace!("pointer at ({}, {}) -> {:?}", x, y, self.end_vector);

        let step = RotationStep::between(self.start_vector, self.end_vector, self.options.sensitivity);
        self.rotation_axis = step.axis;

        let rotation = match step.to_matrix() {
            Some(rotation) => rotation,
            None => {
                debug!("degenerate rotation skipped: {:?}", step);
                return None;
            }
        };

        self.start_vector = self.end_vector;
        // Rotations are applied in world space, before everything accumulated so far.
        self.transform = rotation * self.transform;
        trace!("rotated by {} degrees about {:?}", step.angle_degrees, step.axis);

        Some(self.transform.into())
    }

    fn pointer_up(&mut self, button: MouseButtons) {
        if button.intersects(self.drag_buttons) && self.state == DragState::Dragging {
            self.state = DragState::Idle;
            debug!("drag ended");
        }
    }

    fn wheel(&mut self, delta: i32) -> Option<Transform> {
        let sensitivity = self.options.sensitivity;
        let scale = if delta > 0 {
            1.0 + sensitivity
        } else {
            1.0 - sensitivity
        };

        // A sensitivity of 1 or more cannot shrink the transform without collapsing it.
        if scale <= 0.0 {
            debug!("wheel step skipped, scale {} is not positive", scale);
            return None;
        }

        self.transform *=
            Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(scale, scale, scale));
        trace!("scaled by {}", scale);

        Some(self.transform.into())
    }

    /// Returns the current transform.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform.into()
    }

    /// Replaces the accumulated transform with `transform`, and ends any drag in
    /// progress. The callback is not invoked.
    pub fn reset_transform<M: Into<Transform>>(&mut self, transform: M) {
        let transform: Transform = transform.into();
        self.transform = Matrix4::from(transform);
        self.state = DragState::Idle;
    }

    /// Returns whether a drag is in progress.
    #[inline]
    pub const fn drag_state(&self) -> DragState {
        self.state
    }

    /// Returns `true` if a drag is in progress.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Returns the axis of the last attempted rotation. This may be degenerate.
    #[inline]
    pub const fn rotation_axis(&self) -> Vector3<f32> {
        self.rotation_axis
    }

    /// Returns the options of the `ArcBall`.
    #[inline]
    pub const fn options(&self) -> &ArcBallOptions {
        &self.options
    }

    /// Replaces all of the options at once. The new options apply from the
    /// next event.
    ///
    /// Returns `Err`, leaving the options unchanged, if `options` is invalid.
    pub fn set_options(&mut self, options: ArcBallOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Returns the sensitivity of the `ArcBall`.
    #[inline]
    pub const fn sensitivity(&self) -> f32 {
        self.options.sensitivity
    }

    /// Sets the sensitivity, which applies from the next event.
    ///
    /// Returns `Err`, leaving the sensitivity unchanged, if `sensitivity` is
    /// not a finite value greater than `0`.
    ///
    /// With a sensitivity of `1` or more, wheel steps towards the user are
    /// ignored, as they would scale the transform by `0` or less.
    pub fn set_sensitivity(&mut self, sensitivity: f32) -> Result<(), OptionsError> {
        check_sensitivity(sensitivity)?;
        self.options.sensitivity = sensitivity;
        Ok(())
    }

    /// Returns the buttons which start a drag.
    #[inline]
    pub const fn buttons(&self) -> MouseButtons {
        self.options.buttons
    }

    /// Sets the buttons which start a drag. A drag which is already in progress
    /// keeps using the buttons it started with.
    #[inline]
    pub fn set_buttons(&mut self, buttons: MouseButtons) {
        self.options.buttons = buttons;
    }
}

impl Default for ArcBall {
    #[inline]
    fn default() -> Self {
        let options = ArcBallOptions::default();
        ArcBall {
            transform: Matrix4::identity(),
            options,
            drag_buttons: options.buttons,
            bounds: Viewport::default(),
            state: DragState::Idle,
            start_vector: Vector3::from([0.0; 3]),
            end_vector: Vector3::from([0.0; 3]),
            rotation_axis: UP,
            callback: None,
            subscription: None,
        }
    }
}

impl PointerListener for ArcBall {
    fn on_pointer_event(&mut self, event: &PointerEvent, viewport: Viewport) {
        if !self.is_bound() {
            warn!("arcball received {:?} while unbound, ignoring", event);
            return;
        }

        if let Some(transform) = self.update(event, viewport) {
            if let Some(ref mut callback) = self.callback {
                callback(&transform);
            }
        }
    }
}

impl fmt::Debug for ArcBall {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_struct("ArcBall")
            .field("transform", &self.transform)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("start_vector", &self.start_vector)
            .field("end_vector", &self.end_vector)
            .field("rotation_axis", &self.rotation_axis)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __pointer_event {
    (down ($($button:ident)|+, $x:expr, $y:expr)) => {
        $crate::PointerEvent::Down {
            button: $crate::MouseButtons::NONE $(| $crate::MouseButtons::$button)+,
            x: $x,
            y: $y,
        }
    };
    (move ($($button:ident)|+, $x:expr, $y:expr)) => {
        $crate::PointerEvent::Move {
            buttons: $crate::MouseButtons::NONE $(| $crate::MouseButtons::$button)+,
            x: $x,
            y: $y,
        }
    };
    (up ($($button:ident)|+, $x:expr, $y:expr)) => {
        $crate::PointerEvent::Up {
            button: $crate::MouseButtons::NONE $(| $crate::MouseButtons::$button)+,
            x: $x,
            y: $y,
        }
    };
    (wheel ($delta:expr)) => {
        $crate::PointerEvent::Wheel { delta: $delta }
    };
    ($other:tt $($rest:tt)*) => {
        compile_error!(concat!("Unknown pointer event `", stringify!($other), "`"));
    };
}

/// Create a `Vec` of [`PointerEvent`][`PointerEvent`]s with a compact syntax,
/// which is convenient for scripting gestures.
///
/// Each event is one of:
///
/// * `down(<buttons>, <x>, <y>)`
/// * `move(<buttons>, <x>, <y>)`
/// * `up(<buttons>, <x>, <y>)`
/// * `wheel(<delta>)`
///
/// where `<buttons>` is one or more [`MouseButtons`][`MouseButtons`] constant names
/// separated by `|`.
///
/// # Example
///
/// ```
/// # use arcball::{pointer_events, MouseButtons, PointerEvent};
/// let events = pointer_events![
///     down(LEFT, 400, 300),
///     move(LEFT | RIGHT, 410, 290),
///     up(LEFT, 410, 290),
///     wheel(-1),
/// ];
///
/// assert_eq!(events.len(), 4);
/// assert_eq!(
///     events[1],
///     PointerEvent::Move {
///         buttons: MouseButtons::LEFT | MouseButtons::RIGHT,
///         x: 410,
///         y: 290,
///     }
/// );
/// ```
///
/// [`PointerEvent`]: enum.PointerEvent.html
/// [`MouseButtons`]: struct.MouseButtons.html
#[macro_export]
macro_rules! pointer_events {
    () => {
        ::std::vec::Vec::<$crate::PointerEvent>::new()
    };
    ($($kind:tt $args:tt),+ $(,)?) => {
        {
            let events: ::std::vec::Vec<$crate::PointerEvent> =
                ::std::vec![$($crate::__pointer_event!($kind $args)),+];
            events
        }
    };
}

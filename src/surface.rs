//! An explicit event source which stands in for the window or widget
//! which receives pointer input.
//!
//! A [`Surface`][`Surface`] keeps track of the current viewport size and a list of
//! [`PointerListener`][`PointerListener`]s. The host forwards every pointer event
//! to [`Surface::dispatch`][`Surface::dispatch`], which delivers it to each listener
//! synchronously, in the order in which they subscribed.
//!
//! Listeners are held weakly, so a surface never keeps a listener alive.
//!
//! [`Surface`]: struct.Surface.html
//! [`PointerListener`]: trait.PointerListener.html
//! [`Surface::dispatch`]: struct.Surface.html#method.dispatch

use crate::{PointerEvent, Viewport};
use log::trace;
use smallvec::SmallVec;
use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

/// Receives pointer events from a `Surface`.
pub trait PointerListener {
    /// Called for every event dispatched to the surface, together with the
    /// size of the surface at the time of the event.
    fn on_pointer_event(&mut self, event: &PointerEvent, viewport: Viewport);
}

impl<F: FnMut(&PointerEvent, Viewport)> PointerListener for F {
    #[inline]
    fn on_pointer_event(&mut self, event: &PointerEvent, viewport: Viewport) {
        self(event, viewport)
    }
}

/// Identifies a listener subscribed to a `Surface`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ListenerId(u64);

type WeakListener = Weak<RefCell<dyn PointerListener>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: SmallVec<[(ListenerId, WeakListener); 4]>,
}

impl Registry {
    fn insert(&mut self, listener: WeakListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != len
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(other, _)| *other == id)
    }

    /// Forgets every listener which has been dropped.
    fn prune(&mut self) {
        self.listeners.retain(|(_, l)| l.strong_count() > 0);
    }
}

/// The source of pointer events for one viewport.
pub struct Surface {
    viewport: Viewport,
    registry: Rc<RefCell<Registry>>,
}

impl Surface {
    /// Create a new `Surface` of the given size, with no listeners.
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Surface {
            viewport: Viewport::new(width, height),
            registry: Default::default(),
        }
    }

    /// Returns the current size of the surface.
    #[inline]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Changes the size of the surface. Listeners see the new size with
    /// the next dispatched event.
    #[inline]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Subscribes `listener` to the events of this surface.
    ///
    /// The surface only holds a weak reference to the listener. The listener
    /// stays subscribed until the returned `Subscription` is cancelled or
    /// dropped, or until the listener itself is dropped.
    pub fn subscribe<L>(&mut self, listener: &Rc<RefCell<L>>) -> Subscription
    where
        L: PointerListener + 'static,
    {
        let listener: Rc<RefCell<dyn PointerListener>> = listener.clone();
        let id = self.registry.borrow_mut().insert(Rc::downgrade(&listener));
        trace!("listener {:?} subscribed", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every live listener, and returns the number of
    /// listeners which received it.
    ///
    /// A listener which is unsubscribed by an earlier listener during the
    /// dispatch does not receive the event.
    ///
    /// # Panics
    ///
    /// Panics if a listener is already mutably borrowed, which happens if
    /// a listener dispatches to the surface that is currently calling it.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        // Copy the list, so that listeners may unsubscribe while being called.
        let listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.prune();
            registry.listeners.clone()
        };

        let mut delivered = 0;
        for (id, listener) in listeners.iter() {
            if !self.registry.borrow().contains(*id) {
                trace!("listener {:?} unsubscribed during dispatch, skipping", id);
                continue;
            }

            if let Some(listener) = listener.upgrade() {
                listener.borrow_mut().on_pointer_event(event, self.viewport);
                delivered += 1;
            }
        }
        delivered
    }

    /// Returns the number of live listeners subscribed to the surface.
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| l.strong_count() > 0)
            .count()
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_struct("Surface")
            .field("viewport", &self.viewport)
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener subscribed to a `Surface`.
///
/// Dropping the `Subscription` removes the listener from the surface. If the
/// surface is dropped first, this does nothing.
#[must_use = "dropping a `Subscription` unsubscribes its listener"]
pub struct Subscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Returns the id of the subscribed listener.
    #[inline]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns `true` if the surface which issued this subscription still exists.
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.registry.strong_count() > 0
    }

    /// Removes the listener from the surface.
    #[inline]
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.borrow_mut().remove(self.id) {
                trace!("listener {:?} unsubscribed", self.id);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.debug_struct("Subscription")
            .field("id", &self.id)
            .field("connected", &self.is_connected())
            .finish()
    }
}

//! Short-lived UI markers (click ripples, toasts) that remove themselves
//! after a fixed time-to-live.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::timer::{Scheduler, TimerHandle};

pub type MarkerId = u64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker<T> {
    pub id: MarkerId,
    pub created_at: f64,
    pub payload: T,
}

struct Inner<T> {
    // Ids grow monotonically, so key order is insertion order.
    markers: BTreeMap<MarkerId, Marker<T>>,
    expiries: HashMap<MarkerId, TimerHandle>,
    next_id: MarkerId,
    listener: Option<Rc<dyn Fn()>>,
}

/// Keyed collection of markers, each with its own expiry timer. Clones share
/// the same collection; pending expiries are cancelled once the last clone
/// is dropped.
pub struct MarkerList<T: 'static> {
    inner: Rc<RefCell<Inner<T>>>,
    scheduler: Rc<dyn Scheduler>,
    ttl_ms: u32,
}

impl<T: 'static> Clone for MarkerList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            scheduler: self.scheduler.clone(),
            ttl_ms: self.ttl_ms,
        }
    }
}

impl<T: 'static> MarkerList<T> {
    pub fn new(scheduler: Rc<dyn Scheduler>, ttl_ms: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                markers: BTreeMap::new(),
                expiries: HashMap::new(),
                next_id: 0,
                listener: None,
            })),
            scheduler,
            ttl_ms,
        }
    }

    /// Called after every spawn and removal.
    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        self.inner.borrow_mut().listener = Some(listener);
    }

    /// Adds a marker and arms its expiry. Returns immediately.
    pub fn spawn(&self, payload: T) -> MarkerId {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.markers.insert(
                id,
                Marker {
                    id,
                    created_at: self.scheduler.now(),
                    payload,
                },
            );
            id
        };

        let weak = Rc::downgrade(&self.inner);
        let expiry = self
            .scheduler
            .schedule(self.ttl_ms, Box::new(move || expire_weak(&weak, id)));
        self.inner.borrow_mut().expiries.insert(id, expiry);
        self.notify();
        id
    }

    /// Removes a marker. Returns `false` if it was already gone.
    pub fn expire(&self, id: MarkerId) -> bool {
        let removed = remove(&self.inner, id);
        if removed {
            self.notify();
        }
        removed
    }

    /// Drops every marker and cancels all pending expiries.
    pub fn clear(&self) {
        let (markers, expiries) = {
            let mut inner = self.inner.borrow_mut();
            (
                std::mem::take(&mut inner.markers),
                std::mem::take(&mut inner.expiries),
            )
        };
        drop(expiries);
        if !markers.is_empty() {
            self.notify();
        }
    }

    /// Teardown: forgets the listener, then drops every marker and expiry.
    pub fn detach(&self) {
        self.inner.borrow_mut().listener = None;
        self.clear();
    }

    pub fn contains(&self, id: MarkerId) -> bool {
        self.inner.borrow().markers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().markers.is_empty()
    }

    /// Number of expiry timers still armed.
    pub fn armed(&self) -> usize {
        self.inner.borrow().expiries.len()
    }

    fn notify(&self) {
        let listener = self.inner.borrow().listener.clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

impl<T: Clone + 'static> MarkerList<T> {
    /// Live markers in insertion order.
    pub fn markers(&self) -> Vec<Marker<T>> {
        self.inner.borrow().markers.values().cloned().collect()
    }

    pub fn get(&self, id: MarkerId) -> Option<Marker<T>> {
        self.inner.borrow().markers.get(&id).cloned()
    }
}

fn remove<T>(inner: &RefCell<Inner<T>>, id: MarkerId) -> bool {
    let (marker, expiry) = {
        let mut inner = inner.borrow_mut();
        (inner.markers.remove(&id), inner.expiries.remove(&id))
    };
    drop(expiry);
    marker.is_some()
}

// A late expiry for a marker that is already gone is a no-op.
fn expire_weak<T>(inner: &Weak<RefCell<Inner<T>>>, id: MarkerId) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    if remove(&inner, id) {
        let listener = inner.borrow().listener.clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

/// Single-toast slot: showing a new toast replaces the current one and
/// disarms its expiry, so only the newest toast's TTL governs visibility.
#[derive(Clone)]
pub struct ToastSlot {
    list: MarkerList<String>,
}

impl ToastSlot {
    pub fn new(scheduler: Rc<dyn Scheduler>, ttl_ms: u32) -> Self {
        Self {
            list: MarkerList::new(scheduler, ttl_ms),
        }
    }

    pub fn set_listener(&self, listener: Rc<dyn Fn()>) {
        self.list.set_listener(listener);
    }

    pub fn show(&self, message: impl Into<String>) -> MarkerId {
        self.list.clear();
        self.list.spawn(message.into())
    }

    pub fn dismiss(&self) {
        self.list.clear();
    }

    pub fn detach(&self) {
        self.list.detach();
    }

    pub fn current(&self) -> Option<Marker<String>> {
        self.list.markers().pop()
    }

    pub fn message(&self) -> Option<String> {
        self.current().map(|toast| toast.payload)
    }
}

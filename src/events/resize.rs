use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::ViewportDimensions;

type Handler = Rc<RefCell<dyn FnMut(ViewportDimensions)>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Handler)>,
}

impl Subscribers {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Fans viewport resize notifications out to every live subscriber.
///
/// Cloning yields another handle to the same subscriber list.
#[derive(Clone, Default)]
pub struct ResizeDispatcher {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl ResizeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `handler` to the end of the list. It stays registered until the
    /// returned subscription is dropped.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe<F>(&self, handler: F) -> ResizeSubscription
    where
        F: FnMut(ViewportDimensions) + 'static,
    {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        subscribers.entries.push((id, handler));
        log::trace!("resize subscriber {} registered", id);

        ResizeSubscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Invokes each handler once, synchronously, in subscription order.
    ///
    /// Handlers subscribed during a dispatch first run on the next one;
    /// handlers unsubscribed during a dispatch are not invoked again.
    pub fn dispatch(&self, dimensions: ViewportDimensions) {
        let snapshot: Vec<(u64, Handler)> = self
            .subscribers
            .borrow()
            .entries
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in snapshot {
            if !self.subscribers.borrow().contains(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut *handler)(dimensions),
                Err(_) => log::warn!("resize subscriber {} re-entered during dispatch; skipped", id),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().entries.len()
    }
}

/// Registration token returned by [`ResizeDispatcher::subscribe`].
pub struct ResizeSubscription {
    id: u64,
    subscribers: Weak<RefCell<Subscribers>>,
}

impl ResizeSubscription {
    /// Removes the handler now rather than when the token goes out of scope.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
            log::trace!("resize subscriber {} removed", self.id);
        }
    }
}

/// Single-consumer registration: each `on_resize` replaces the handler the
/// slot registered before.
pub struct ResizeSlot {
    dispatcher: ResizeDispatcher,
    current: RefCell<Option<ResizeSubscription>>,
}

impl ResizeSlot {
    pub fn new(dispatcher: &ResizeDispatcher) -> Self {
        Self {
            dispatcher: dispatcher.clone(),
            current: RefCell::new(None),
        }
    }

    pub fn on_resize<F>(&self, handler: F)
    where
        F: FnMut(u32, u32) + 'static,
    {
        let mut handler = handler;
        let subscription = self
            .dispatcher
            .subscribe(move |dims| handler(dims.width, dims.height));
        let previous = self.current.replace(Some(subscription));
        drop(previous);
    }

    pub fn clear(&self) {
        self.current.replace(None);
    }

    pub fn is_registered(&self) -> bool {
        self.current.borrow().is_some()
    }
}

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::LoadError;

type Callback<H> = Box<dyn FnOnce(Result<H, LoadError>)>;
type ReleaseHook = Box<dyn FnOnce()>;

struct Pending<H> {
    callback: Option<Callback<H>>,
    release: Vec<ReleaseHook>,
}

/// One-shot completion slot for a single resource request.
///
/// Clones share the slot. The first `complete` wins; later calls return
/// `false` and drop their result.
pub struct Completion<H> {
    pending: Rc<RefCell<Pending<H>>>,
}

impl<H> Clone for Completion<H> {
    fn clone(&self) -> Self {
        Self {
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<H: 'static> Completion<H> {
    pub fn new<F>(callback: F) -> Self
    where
        F: FnOnce(Result<H, LoadError>) + 'static,
    {
        Self {
            pending: Rc::new(RefCell::new(Pending {
                callback: Some(Box::new(callback)),
                release: Vec::new(),
            })),
        }
    }

    /// Settles the request. Release hooks run before the callback.
    pub fn complete(&self, result: Result<H, LoadError>) -> bool {
        let callback = self.pending.borrow_mut().callback.take();
        let Some(callback) = callback else {
            return false;
        };
        self.release();
        callback(result);
        true
    }

    pub fn is_settled(&self) -> bool {
        self.pending.borrow().callback.is_none()
    }

    /// Registers cleanup for host-side state (listeners, in-flight requests)
    /// to run once the request settles. Runs immediately if it already has.
    pub fn on_release<F>(&self, hook: F)
    where
        F: FnOnce() + 'static,
    {
        if self.is_settled() {
            hook();
            return;
        }
        self.pending.borrow_mut().release.push(Box::new(hook));
    }

    pub fn cancel_token(&self) -> CancelToken {
        let completion = self.clone();
        CancelToken {
            cancel: Rc::new(move || completion.complete(Err(LoadError::Cancelled))),
        }
    }

    fn release(&self) {
        let hooks = std::mem::take(&mut self.pending.borrow_mut().release);
        for hook in hooks {
            hook();
        }
    }
}

/// Aborts a pending load. The load's callback receives
/// [`LoadError::Cancelled`] unless it has already been invoked.
#[derive(Clone)]
pub struct CancelToken {
    cancel: Rc<dyn Fn() -> bool>,
}

impl CancelToken {
    /// Returns `true` if this call settled the request.
    pub fn cancel(&self) -> bool {
        (self.cancel)()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken").finish_non_exhaustive()
    }
}

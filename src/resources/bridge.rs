use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use super::{CancelToken, Completion, ResourceFetcher, ResourceLocator};
use crate::error::LoadError;

/// Turns a host fetch primitive into exactly-once, cancellable loads.
///
/// Completions arrive in whatever order the host finishes them.
pub struct ResourceLoadBridge<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> ResourceLoadBridge<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Starts loading `locator`. `on_complete` runs exactly once, after the
    /// resource is fully available, after the host reports a failure, or
    /// when the returned token cancels the request.
    pub fn load<C>(&self, locator: impl Into<ResourceLocator>, on_complete: C) -> CancelToken
    where
        C: FnOnce(Result<F::Handle, LoadError>) + 'static,
    {
        let locator = locator.into();
        log::debug!("loading resource {}", locator);

        let completion = Completion::new(on_complete);
        let token = completion.cancel_token();
        self.fetcher.fetch(&locator, completion);
        token
    }

    /// Future-returning form of [`load`](Self::load).
    pub fn load_async(&self, locator: impl Into<ResourceLocator>) -> (LoadFuture<F::Handle>, CancelToken) {
        let (sender, receiver) = oneshot::channel();
        let token = self.load(locator, move |result| {
            // Receiver gone means the caller stopped waiting.
            let _ = sender.send(result);
        });
        (LoadFuture { receiver }, token)
    }
}

/// Resolves with the outcome of one [`ResourceLoadBridge::load_async`] call.
pub struct LoadFuture<H> {
    receiver: oneshot::Receiver<Result<H, LoadError>>,
}

impl<H> Future for LoadFuture<H> {
    type Output = Result<H, LoadError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx).map(|received| {
            received.unwrap_or_else(|_| Err(LoadError::Host("request dropped before completion".to_string())))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records requests so tests can settle them by hand, in any order.
    #[derive(Default)]
    struct ManualFetcher {
        requests: RefCell<Vec<(ResourceLocator, Completion<String>)>>,
    }

    impl ManualFetcher {
        fn settle(&self, index: usize) -> bool {
            let (locator, completion) = self.requests.borrow()[index].clone();
            completion.complete(Ok(format!("handle:{}", locator)))
        }

        fn fail(&self, index: usize) -> bool {
            let (locator, completion) = self.requests.borrow()[index].clone();
            completion.complete(Err(LoadError::Failed {
                locator: locator.to_string(),
            }))
        }

        fn forget(&self) {
            self.requests.borrow_mut().clear();
        }
    }

    impl ResourceFetcher for ManualFetcher {
        type Handle = String;

        fn fetch(&self, locator: &ResourceLocator, completion: Completion<String>) {
            self.requests.borrow_mut().push((locator.clone(), completion));
        }
    }

    /// Fails every request synchronously, like a host that refuses to start.
    struct RefusingFetcher;

    impl ResourceFetcher for RefusingFetcher {
        type Handle = ();

        fn fetch(&self, _: &ResourceLocator, completion: Completion<()>) {
            completion.complete(Err(LoadError::Host("no network".into())));
        }
    }

    fn collector<H: 'static>() -> (
        Rc<RefCell<Vec<Result<H, LoadError>>>>,
        impl FnOnce(Result<H, LoadError>) + 'static,
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        (calls, move |result| sink.borrow_mut().push(result))
    }

    #[test]
    fn callback_waits_for_host_and_fires_once() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (calls, cb) = collector();

        bridge.load("valid-url", cb);
        assert!(calls.borrow().is_empty());

        assert!(bridge.fetcher().settle(0));
        assert!(!bridge.fetcher().settle(0));
        assert!(!bridge.fetcher().fail(0));
        assert_eq!(*calls.borrow(), vec![Ok("handle:valid-url".to_string())]);
    }

    #[test]
    fn completions_follow_host_order() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let order = order.clone();
            bridge.load(name, move |result: Result<String, LoadError>| {
                order.borrow_mut().push(result.unwrap());
            });
        }

        bridge.fetcher().settle(2);
        bridge.fetcher().settle(0);
        bridge.fetcher().settle(1);
        assert_eq!(*order.borrow(), vec!["handle:c", "handle:a", "handle:b"]);
    }

    #[test]
    fn host_failure_reaches_callback() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (calls, cb) = collector();
        bridge.load("missing.png", cb);

        bridge.fetcher().fail(0);
        assert_eq!(
            *calls.borrow(),
            vec![Err(LoadError::Failed {
                locator: "missing.png".into()
            })]
        );
    }

    #[test]
    fn cancel_beats_late_host_completion() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (calls, cb) = collector();
        let token = bridge.load("slow.png", cb);

        assert!(token.cancel());
        assert!(!bridge.fetcher().settle(0));
        assert_eq!(*calls.borrow(), vec![Err(LoadError::Cancelled)]);
    }

    #[test]
    fn synchronous_refusal_is_reported() {
        let bridge = ResourceLoadBridge::new(RefusingFetcher);
        let (calls, cb) = collector();
        let token = bridge.load("anything", cb);

        assert!(!token.cancel());
        assert_eq!(*calls.borrow(), vec![Err(LoadError::Host("no network".into()))]);
    }

    #[test]
    fn future_resolves_with_handle() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (future, _token) = bridge.load_async("valid-url");
        bridge.fetcher().settle(0);

        let result = futures::executor::block_on(future);
        assert_eq!(result, Ok("handle:valid-url".to_string()));
    }

    #[test]
    fn future_resolves_cancelled() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (future, token) = bridge.load_async("slow.png");
        token.cancel();

        assert_eq!(futures::executor::block_on(future), Err(LoadError::Cancelled));
    }

    #[test]
    fn abandoned_request_resolves_with_host_error() {
        let bridge = ResourceLoadBridge::new(ManualFetcher::default());
        let (future, token) = bridge.load_async("lost.png");
        drop(token);
        bridge.fetcher().forget();

        assert!(matches!(futures::executor::block_on(future), Err(LoadError::Host(_))));
    }
}

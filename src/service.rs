use std::{
    fmt,
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::time::sleep;

use crate::{Config, Rejection};

/// What a fake service call settles to: the canned value, either way.
pub type Outcome<T> = std::result::Result<T, Rejection<T>>;

/// A remote call the business logic depends on.
///
/// Business logic takes its service as a parameter so tests can inject a
/// [`FakeService`] while production code passes a real client.
pub trait Service<Req>: Send + Sync {
    type Response: Send;
    type Error: Send;

    fn request(
        &self,
        request: Req,
    ) -> impl Future<Output = std::result::Result<Self::Response, Self::Error>> + Send;
}

impl<Req, S: Service<Req>> Service<Req> for Arc<S> {
    type Response = S::Response;
    type Error = S::Error;

    fn request(
        &self,
        request: Req,
    ) -> impl Future<Output = std::result::Result<Self::Response, Self::Error>> + Send {
        (**self).request(request)
    }
}

/// A stand-in for a network call that settles with a canned value after a
/// fixed delay.
///
/// Every [`call`](FakeService::call) returns a fresh deferred computation, so
/// one service can be awaited several times. There are no retries and no
/// backoff: each call is a single shot.
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use mockstore::{FakeService, Rejection};
///
/// let ok = FakeService::resolving("token");
/// assert_eq!(ok.call().await, Ok("token"));
///
/// let failing = FakeService::rejecting("unauthorized");
/// assert_eq!(failing.call().await, Err(Rejection("unauthorized")));
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FakeService<T> {
    result: T,
    succeeds: bool,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

/// Build a fake service resolving with `result` when `succeeds` is true and
/// rejecting with it otherwise.
pub fn make_fake_service<T>(result: T, succeeds: bool) -> FakeService<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    FakeService::new(result, succeeds)
}

impl<T> FakeService<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
{
    pub fn new(result: T, succeeds: bool) -> Self {
        Self {
            result,
            succeeds,
            delay: Config::default().service_delay,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn resolving(result: T) -> Self {
        Self::new(result, true)
    }

    pub fn rejecting(result: T) -> Self {
        Self::new(result, false)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Take the delay from a harness [`Config`].
    pub fn with_config(self, config: &Config) -> Self {
        self.with_delay(config.service_delay)
    }

    pub fn succeeds(&self) -> bool {
        self.succeeds
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of calls created so far, shared between clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Start a simulated call.
    ///
    /// Nothing happens until the returned future is polled; it then sleeps
    /// for the fixed delay and settles exactly once.
    pub fn call(&self) -> impl Future<Output = Outcome<T>> + Send + 'static {
        let call_no = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let result = self.result.clone();
        let succeeds = self.succeeds;
        let delay = self.delay;
        async move {
            sleep(delay).await;
            tracing::trace!(call_no, succeeds, ?delay, "fake service settled");
            if succeeds {
                Ok(result)
            } else {
                Err(Rejection(result))
            }
        }
    }
}

impl<T, Req> Service<Req> for FakeService<T>
where
    T: Clone + fmt::Debug + Send + Sync + 'static,
    Req: Send,
{
    type Response = T;
    type Error = Rejection<T>;

    fn request(&self, _request: Req) -> impl Future<Output = Outcome<T>> + Send {
        self.call()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, timeout};

    #[tokio::test(start_paused = true)]
    async fn resolves_with_result_after_delay() {
        let service = FakeService::resolving(vec![1, 2, 3])
            .with_delay(Duration::from_millis(50));
        let start = Instant::now();

        let outcome = service.call().await;

        assert_eq!(outcome, Ok(vec![1, 2, 3]));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_with_result_when_failing() {
        let service = make_fake_service("boom", false);
        assert_eq!(service.call().await, Err(Rejection("boom")));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_settle_before_delay() {
        let service = FakeService::resolving(7).with_delay(Duration::from_millis(50));
        let call = service.call();
        tokio::pin!(call);

        assert!(timeout(Duration::from_millis(49), &mut call).await.is_err());
        assert_eq!(call.await, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_only_after_delay() {
        let service = FakeService::rejecting("denied").with_delay(Duration::from_millis(50));
        let start = Instant::now();
        let call = service.call();
        tokio::pin!(call);

        assert!(timeout(Duration::from_millis(49), &mut call).await.is_err());
        assert_eq!(call.await, Err(Rejection("denied")));
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn every_call_is_fresh() {
        let service = FakeService::resolving("x");
        let first = service.call();
        let second = service.call();

        assert_eq!(service.calls(), 2);
        assert_eq!(first.await, Ok("x"));
        assert_eq!(second.await, Ok("x"));
    }

    #[tokio::test(start_paused = true)]
    async fn implements_service_for_any_request() {
        let service = Arc::new(FakeService::rejecting(404u16));
        let outcome = service.request(("user", "secret")).await;
        assert_eq!(outcome.map_err(Rejection::into_inner), Err(404));
    }

    #[test]
    fn config_delay_is_applied() {
        let config = Config::default().with_service_delay(Duration::from_millis(3));
        let service = FakeService::resolving(()).with_config(&config);
        assert_eq!(service.delay(), Duration::from_millis(3));
        assert!(service.succeeds());
    }
}

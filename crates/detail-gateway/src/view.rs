//! Fetch state of one catalog view, resolved latest-wins.

use crate::gateway::{Fetched, GatewayError, Source};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Where a view is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded { source: Source },
}

/// Outcome of handing a finished fetch to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The result is now the view's data.
    Applied,
    /// A newer fetch started meanwhile; the result was discarded.
    Superseded,
}

/// Ticket for one fetch, issued by [`CatalogView::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

struct Current<T> {
    state: FetchState,
    data: Option<T>,
}

/// Data shown by one view plus its fetch state.
///
/// Every fetch takes a token from a monotonic counter. Only the result of
/// the most recently started fetch is applied.
pub struct CatalogView<T> {
    latest: AtomicU64,
    current: Mutex<Current<T>>,
}

impl<T> Default for CatalogView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CatalogView<T> {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            current: Mutex::new(Current {
                state: FetchState::Idle,
                data: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Current<T>> {
        self.current.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Start a fetch. Any fetch started earlier is superseded.
    pub fn begin(&self) -> RequestToken {
        let mut current = self.lock();
        let token = RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        current.state = FetchState::Loading;
        token
    }

    /// Whether `token` belongs to the most recently started fetch.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Hand in the result of the fetch started with `token`.
    ///
    /// A superseded result is dropped whatever it holds, errors included.
    /// A current error returns the view to `Idle` and is passed back.
    pub fn commit(
        &self,
        token: RequestToken,
        result: Result<Fetched<T>, GatewayError>,
    ) -> Result<Commit, GatewayError> {
        let mut current = self.lock();
        if !self.is_current(token) {
            tracing::debug!(token = token.0, "discarding superseded fetch");
            return Ok(Commit::Superseded);
        }
        match result {
            Ok(fetched) => {
                current.state = FetchState::Loaded {
                    source: fetched.source,
                };
                current.data = Some(fetched.data);
                Ok(Commit::Applied)
            }
            Err(e) => {
                current.state = FetchState::Idle;
                current.data = None;
                Err(e)
            }
        }
    }

    /// Run `fetch` as the view's newest fetch and commit its result.
    pub async fn load<F>(&self, fetch: F) -> Result<Commit, GatewayError>
    where
        F: Future<Output = Result<Fetched<T>, GatewayError>>,
    {
        let token = self.begin();
        let result = fetch.await;
        self.commit(token, result)
    }

    pub fn state(&self) -> FetchState {
        self.lock().state
    }

    /// Leave the view: back to `Idle`, data dropped, in-flight fetches
    /// superseded.
    pub fn reset(&self) {
        let mut current = self.lock();
        self.latest.fetch_add(1, Ordering::SeqCst);
        current.state = FetchState::Idle;
        current.data = None;
    }
}

impl<T: Clone> CatalogView<T> {
    pub fn data(&self) -> Option<T> {
        self.lock().data.clone()
    }
}

impl<T> std::fmt::Debug for CatalogView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogView")
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::FallbackReason;

    #[test]
    fn test_state_cycle() {
        let view = CatalogView::<Vec<u32>>::new();
        assert_eq!(view.state(), FetchState::Idle);

        let token = view.begin();
        assert_eq!(view.state(), FetchState::Loading);

        let commit = view.commit(token, Ok(Fetched::fallback(vec![1], FallbackReason::Empty)));
        assert_eq!(commit, Ok(Commit::Applied));
        assert_eq!(
            view.state(),
            FetchState::Loaded {
                source: Source::Fallback {
                    reason: FallbackReason::Empty
                }
            }
        );
        assert_eq!(view.data(), Some(vec![1]));

        view.reset();
        assert_eq!(view.state(), FetchState::Idle);
        assert_eq!(view.data(), None);
    }

    #[test]
    fn test_older_result_is_discarded() {
        let view = CatalogView::new();
        let first = view.begin();
        let second = view.begin();
        assert!(first < second);

        assert_eq!(
            view.commit(second, Ok(Fetched::remote("new"))),
            Ok(Commit::Applied)
        );
        assert_eq!(
            view.commit(first, Ok(Fetched::remote("old"))),
            Ok(Commit::Superseded)
        );
        assert_eq!(view.data(), Some("new"));
    }

    #[test]
    fn test_superseded_error_is_dropped() {
        let view = CatalogView::<u8>::new();
        let first = view.begin();
        let _second = view.begin();
        assert_eq!(
            view.commit(first, Err(GatewayError::Unauthorized)),
            Ok(Commit::Superseded)
        );
        assert_eq!(view.state(), FetchState::Loading);
    }

    #[test]
    fn test_current_error_returns_to_idle() {
        let view = CatalogView::<u8>::new();
        let token = view.begin();
        assert_eq!(
            view.commit(token, Err(GatewayError::Unauthorized)),
            Err(GatewayError::Unauthorized)
        );
        assert_eq!(view.state(), FetchState::Idle);
    }

    #[test]
    fn test_reset_supersedes_in_flight() {
        let view = CatalogView::new();
        let token = view.begin();
        view.reset();
        assert_eq!(view.commit(token, Ok(Fetched::remote(1))), Ok(Commit::Superseded));
        assert_eq!(view.state(), FetchState::Idle);
    }
}

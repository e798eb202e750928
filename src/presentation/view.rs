// Top-level view state and the scoped, cancellable refresh
use crate::application::loader::ChartLoader;
use crate::domain::chart::ChartDefinition;
use futures::future::{abortable, AbortHandle, Aborted};
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Ready(Vec<ChartDefinition>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    /// The request was abandoned; the state was left as it was.
    Cancelled,
}

/// Holds the in-flight request. Dropping the scope, or calling `cancel`,
/// aborts the request on every exit path.
#[derive(Debug)]
pub struct RequestScope {
    handle: AbortHandle,
}

impl RequestScope {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub struct DashboardView {
    loader: ChartLoader,
    url: String,
    state: ViewState,
}

impl DashboardView {
    pub fn new(loader: ChartLoader, url: String) -> Self {
        Self {
            loader,
            url,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Start a fetch of the chart list.
    ///
    /// Returns the scope owning the request and the future that applies its
    /// result. State changes only when that future runs to completion with
    /// the request still live.
    pub fn refresh(&mut self) -> (RequestScope, impl Future<Output = RefreshOutcome> + '_) {
        self.state = ViewState::Loading;

        let loader = self.loader.clone();
        let url = self.url.clone();
        let (request, handle) = abortable(async move { loader.load(&url).await });

        let apply = async move {
            match request.await {
                Ok(Ok(charts)) => {
                    self.state = ViewState::Ready(charts);
                    RefreshOutcome::Completed
                }
                Ok(Err(e)) => {
                    self.state = ViewState::Failed(e.to_string());
                    RefreshOutcome::Completed
                }
                Err(Aborted) => {
                    tracing::info!("Chart request for {} cancelled", self.url);
                    RefreshOutcome::Cancelled
                }
            }
        };

        (RequestScope { handle }, apply)
    }

    /// Refresh, cancelling if `interrupt` fires first. An interrupt that
    /// fails to arm is logged and the refresh runs to completion.
    pub async fn refresh_until<I>(&mut self, interrupt: I) -> RefreshOutcome
    where
        I: Future<Output = std::io::Result<()>>,
    {
        let (scope, refresh) = self.refresh();
        tokio::pin!(refresh);

        tokio::select! {
            outcome = &mut refresh => outcome,
            signal = interrupt => {
                match signal {
                    Ok(()) => scope.cancel(),
                    Err(e) => tracing::warn!("Interrupt unavailable, waiting for the charts: {}", e),
                }
                refresh.await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_source::HttpChartSource;
    use crate::infrastructure::mock_server::{MockResponse, MockServer};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn view_for(server: &MockServer) -> DashboardView {
        let source = HttpChartSource::new(Duration::from_secs(5)).unwrap();
        DashboardView::new(ChartLoader::new(Arc::new(source)), server.url())
    }

    #[tokio::test]
    async fn test_refresh_moves_to_ready() {
        let server = MockServer::with_fixture().await;
        let mut view = view_for(&server);
        assert_eq!(view.state(), &ViewState::Loading);

        let (_scope, apply) = view.refresh();
        assert_eq!(apply.await, RefreshOutcome::Completed);

        let ViewState::Ready(charts) = view.state() else {
            panic!("expected ready state, got {:?}", view.state());
        };
        let titles: Vec<&str> = charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Mock Single Series", "Mock Multi Series", "Invalid Timestamp", "Chart 4"]
        );
    }

    #[tokio::test]
    async fn test_refresh_moves_to_failed_with_status() {
        let server = MockServer::start(MockResponse::status(500)).await;
        let mut view = view_for(&server);

        let (_scope, apply) = view.refresh();
        assert_eq!(apply.await, RefreshOutcome::Completed);

        let ViewState::Failed(message) = view.state() else {
            panic!("expected failed state, got {:?}", view.state());
        };
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_schema_failure_blocks_all_charts() {
        let server = MockServer::start(MockResponse::json(json!([{ "data": [] }, "oops"]))).await;
        let mut view = view_for(&server);

        let (_scope, apply) = view.refresh();
        apply.await;
        assert_eq!(view.state(), &ViewState::Failed("Invalid chart at index 1".to_string()));
    }

    #[tokio::test]
    async fn test_cancel_leaves_state_untouched() {
        let server = MockServer::start(
            MockResponse::json(json!([{ "data": [] }])).delayed(Duration::from_secs(2)),
        )
        .await;
        let mut view = view_for(&server);

        let (scope, apply) = view.refresh();
        let cancel = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            scope.cancel();
        };
        let (outcome, ()) = tokio::join!(apply, cancel);

        assert_eq!(outcome, RefreshOutcome::Cancelled);
        assert!(scope.is_cancelled());
        assert_eq!(view.state(), &ViewState::Loading);
    }

    #[tokio::test]
    async fn test_interrupt_cancels_pending_refresh() {
        let server = MockServer::start(MockResponse::status(500).delayed(Duration::from_secs(2))).await;
        let mut view = view_for(&server);

        let interrupt = async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(())
        };
        assert_eq!(view.refresh_until(interrupt).await, RefreshOutcome::Cancelled);
        assert_eq!(view.state(), &ViewState::Loading);
    }

    #[tokio::test]
    async fn test_failed_interrupt_keeps_waiting_for_refresh() {
        let server = MockServer::with_fixture().await;
        let mut view = view_for(&server);

        let interrupt = std::future::ready(Err(std::io::Error::other("no signal handler")));
        assert_eq!(view.refresh_until(interrupt).await, RefreshOutcome::Completed);
        assert!(matches!(view.state(), ViewState::Ready(charts) if charts.len() == 4));
    }

    #[tokio::test]
    async fn test_dropping_the_scope_cancels() {
        let server = MockServer::start(MockResponse::status(500).delayed(Duration::from_secs(2))).await;
        let mut view = view_for(&server);

        let (scope, apply) = view.refresh();
        drop(scope);
        assert_eq!(apply.await, RefreshOutcome::Cancelled);
        assert_eq!(view.state(), &ViewState::Loading);
    }
}

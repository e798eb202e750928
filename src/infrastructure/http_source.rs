// HTTP implementation of the chart source
use crate::application::chart_source::{ChartSource, LoadError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpChartSource {
    client: reqwest::Client,
}

impl HttpChartSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChartSource for HttpChartSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| LoadError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| LoadError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body)
            .map_err(|e| LoadError::schema(format!("Response from {} is not valid JSON: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::loader::normalize_charts;
    use crate::application::renderer::ChartRenderer;
    use crate::domain::visual::RenderError;
    use crate::infrastructure::mock_server::{MockResponse, MockServer};
    use serde_json::json;

    fn source() -> HttpChartSource {
        HttpChartSource::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_json_document() {
        let server = MockServer::start(MockResponse::json(json!([{ "title": "A", "data": [] }]))).await;
        let value = source().fetch_json(&server.url()).await.unwrap();
        assert_eq!(value, json!([{ "title": "A", "data": [] }]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start(MockResponse::status(500)).await;
        let err = source().fetch_json(&server.url()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_schema_error() {
        let server = MockServer::start(MockResponse::text("[{ not json")).await;
        let err = source().fetch_json(&server.url()).await.unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_timestamp_only_breaks_its_chart() {
        let body = r#"[{"title": "Huge", "data": [[1e400, 1]]}, {"title": "Fine", "data": [[0, 1], [1, 2]]}]"#;
        let server = MockServer::start(MockResponse::text(body)).await;
        let value = source().fetch_json(&server.url()).await.unwrap();
        let charts = normalize_charts(value).unwrap();

        let renderer = ChartRenderer::default();
        let huge = renderer.render(&charts[0].title, &charts[0].data);
        let fine = renderer.render(&charts[1].title, &charts[1].data);
        assert_eq!(huge.error(), Some(RenderError::InvalidTimestamp));
        assert!(fine.plot().is_some());
    }

    #[tokio::test]
    async fn test_unreachable_source_is_a_network_error() {
        // port 9 (discard) on localhost is not expected to serve HTTP
        let err = source().fetch_json("http://127.0.0.1:9/data.json").await.unwrap_err();
        assert!(err.is_fetch());
        assert_eq!(err.status(), None);
    }
}

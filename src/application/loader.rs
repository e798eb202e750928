// Chart loader - Use case for fetching and validating the chart list
use crate::application::chart_source::{ChartSource, LoadError};
use crate::domain::chart::{ChartDefinition, RawDatum};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartLoader {
    source: Arc<dyn ChartSource>,
}

impl ChartLoader {
    pub fn new(source: Arc<dyn ChartSource>) -> Self {
        Self { source }
    }

    /// Fetch `url` and normalize it into chart definitions, in input order.
    ///
    /// Dropping the returned future abandons the request; nothing is
    /// reported for it afterwards.
    pub async fn load(&self, url: &str) -> Result<Vec<ChartDefinition>, LoadError> {
        tracing::debug!("Fetching chart definitions from {}", url);

        let raw = match self.source.fetch_json(url).await {
            Ok(raw) => raw,
            Err(e) if e.is_fetch() => {
                tracing::warn!(status = ?e.status(), "Error fetching {}: {}", url, e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Unreadable payload from {}: {}", url, e);
                return Err(e);
            }
        };

        match normalize_charts(raw) {
            Ok(charts) => {
                tracing::info!("Loaded {} charts from {}", charts.len(), url);
                Ok(charts)
            }
            Err(e) => {
                tracing::warn!("Rejected payload from {}: {}", url, e);
                Err(e)
            }
        }
    }
}

/// Validate the top-level document and normalize every chart entry.
pub fn normalize_charts(raw: Value) -> Result<Vec<ChartDefinition>, LoadError> {
    let Value::Array(entries) = raw else {
        return Err(LoadError::schema(
            "chart source must contain an array of chart definitions",
        ));
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_chart(index, entry))
        .collect()
}

fn normalize_chart(index: usize, entry: &Value) -> Result<ChartDefinition, LoadError> {
    let Some(chart) = entry.as_object() else {
        return Err(LoadError::schema(format!("Invalid chart at index {}", index)));
    };

    let Some(data) = chart.get("data").and_then(Value::as_array) else {
        return Err(LoadError::schema(format!(
            "Invalid data at chart with index {}",
            index
        )));
    };

    let title = match chart.get("title") {
        Some(Value::String(title)) => title.clone(),
        _ => format!("Chart {}", index + 1),
    };

    Ok(ChartDefinition::new(
        title,
        data.iter().map(RawDatum::from_json).collect(),
    ))
}

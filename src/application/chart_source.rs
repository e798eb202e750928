// Port for fetching the raw chart document
use async_trait::async_trait;
use serde_json::Value;

/// Page-level failures while loading the chart list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data source answered with a non-success status.
    #[error("Failed to fetch {url}: {status}")]
    Status { url: String, status: u16 },

    /// The data source could not be reached at all.
    #[error("Failed to fetch {url}: {reason}")]
    Network { url: String, reason: String },

    /// The payload does not have the expected structure.
    #[error("{0}")]
    Schema(String),
}

impl LoadError {
    pub fn schema(message: impl Into<String>) -> Self {
        LoadError::Schema(message.into())
    }

    /// Network and status failures, as opposed to a malformed payload.
    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Status { .. } | LoadError::Network { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ChartSource: Send + Sync {
    /// Read the document at `url` and parse it as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_carries_code() {
        let err = LoadError::Status {
            url: "http://localhost/data.json".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "Failed to fetch http://localhost/data.json: 500");
        assert!(err.is_fetch());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_schema_error_is_not_fetch() {
        let err = LoadError::schema("Invalid chart at index 2");
        assert_eq!(err.to_string(), "Invalid chart at index 2");
        assert!(!err.is_fetch());
        assert_eq!(err.status(), None);
    }
}

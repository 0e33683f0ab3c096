//! Source of the optional startup resources (sample dataset and strategy).

use async_trait::async_trait;

use crate::domain::error::FluxbackError;

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch `resource` (a relative path such as `demo/aapl_sample.csv`) as text.
    async fn fetch_text(&self, resource: &str) -> Result<String, FluxbackError>;
}

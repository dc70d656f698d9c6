//! Free-text tool search pipeline.
//!
//! `query → classifier → filter compiler → catalogue → rows`. A failure in
//! any stage aborts the request with that stage's error; nothing downstream
//! of a failed stage runs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use toolfinder_core::{
    defaults, CatalogueRepository, Classification, CompiledQuery, Error, FieldJoin,
    KeywordClassifier, Result, SearchRequest, SearchResponse,
};
use toolfinder_db::FilterCompiler;

/// Orchestrates one search request across the classifier and the catalogue.
pub struct SearchService {
    classifier: Arc<dyn KeywordClassifier>,
    catalogue: Arc<dyn CatalogueRepository>,
    field_join: FieldJoin,
    classifier_timeout: Duration,
}

impl SearchService {
    pub fn new(
        classifier: Arc<dyn KeywordClassifier>,
        catalogue: Arc<dyn CatalogueRepository>,
    ) -> Self {
        Self {
            classifier,
            catalogue,
            field_join: FieldJoin::default(),
            classifier_timeout: Duration::from_secs(defaults::CLASSIFIER_TIMEOUT_SECS),
        }
    }

    /// Cross-field join used when a request does not pick one.
    pub fn with_field_join(mut self, field_join: FieldJoin) -> Self {
        self.field_join = field_join;
        self
    }

    /// Upper bound on a single classifier call.
    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    pub fn field_join(&self) -> FieldJoin {
        self.field_join
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Classify the query, bounded by the classifier timeout.
    ///
    /// A blank query never reaches the classifier and yields the empty
    /// classification.
    pub async fn classify(&self, query: &str) -> Result<Classification> {
        if query.trim().is_empty() {
            debug!(
                subsystem = "api",
                component = "search",
                op = "classify",
                "Blank query, skipping classifier"
            );
            return Ok(Classification::new());
        }

        match tokio::time::timeout(self.classifier_timeout, self.classifier.classify(query)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    subsystem = "api",
                    component = "search",
                    op = "classify",
                    classifier = %self.classifier.name(),
                    timeout_secs = self.classifier_timeout.as_secs(),
                    "Classifier timed out"
                );
                Err(Error::ClassifierUnavailable(format!(
                    "Classifier did not answer within {}s",
                    self.classifier_timeout.as_secs()
                )))
            }
        }
    }

    /// Compile a classification with the configured or overridden join.
    pub fn compile(
        &self,
        classification: &Classification,
        field_join: Option<FieldJoin>,
    ) -> CompiledQuery {
        FilterCompiler::new(field_join.unwrap_or(self.field_join)).compile(classification)
    }

    /// Run the full pipeline for one request.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();
        let field_join = request.field_join.unwrap_or(self.field_join);

        debug!(
            subsystem = "api",
            component = "search",
            op = "search",
            query = %request.query,
            field_join = %field_join,
            "Search started"
        );

        let keywords = self.classify(&request.query).await?;
        let compiled = self.compile(&keywords, Some(field_join));
        let tools = self.catalogue.execute(&compiled).await?;

        info!(
            subsystem = "api",
            component = "search",
            op = "search",
            field_join = %field_join,
            keyword_count = keywords.len(),
            param_count = compiled.param_count(),
            result_count = tools.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(SearchResponse { tools, keywords })
    }

    /// Check that the catalogue store is reachable.
    pub async fn ping_store(&self) -> Result<()> {
        self.catalogue.ping().await
    }
}

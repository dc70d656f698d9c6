//! LLM-backed keyword classifier.
//!
//! Asks a chat model to split a search query into keywords and assign each
//! keyword to one or more catalogue columns, then parses the model's
//! line-oriented answer (`keyword → column, column`) into a
//! [`Classification`].

use std::time::Instant;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use toolfinder_core::{Classification, GenerationBackend, KeywordClassifier, Result};

/// System prompt describing the catalogue columns and the answer format.
pub const SYSTEM_PROMPT: &str = "\
You extract keywords from a user's search query and classify each keyword into one or more \
columns of a tool catalogue. The columns are:
- reviews: sentiment and quality words (e.g. 'best', 'top', 'recommended')
- tool_type: tool categories (e.g. 'Collaboration', 'Content Creation')
- learning_activities: activities the tool supports (e.g. 'Critical Thinking', 'Communication Skills')
- ease_of_use: skill level (e.g. 'beginner', 'advanced')
- name: the name of a specific tool
- description: free-text description, including attributes such as 'software architecture'

Rules:
1. Ignore filler words of the request itself (e.g. 'give', 'me', 'tools').
2. Quality, feeling or trend words (e.g. 'best', 'top') go under reviews and description.
3. Purpose or function words (e.g. 'designing') go under tool_type, learning_activities or description.
4. Specific features or attributes (e.g. 'software architecture') go under description, tool_type or reviews.
5. Names of tools go under name.
6. Answer with one line per keyword in the form: keyword → column, column
   Use only the column names listed above and write nothing else.

Example query: 'Give me the best tools for designing software architecture'
Answer:
- best → reviews, description
- designing → tool_type, learning_activities, description
- software architecture → description, tool_type, reviews";

/// User message wrapping the raw query.
pub fn user_prompt(query: &str) -> String {
    format!(
        "Classify the following user query: '{}' into the appropriate columns.",
        query.trim()
    )
}

static ARROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"→|⟶|->|=>").expect("valid arrow regex"));

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*•+]+|\d+[.)])\s*").expect("valid list marker regex"));

static COLUMN_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;|]").expect("valid separator regex"));

fn is_wrapping(c: char) -> bool {
    matches!(
        c,
        '"' | '\'' | '`' | '*' | '“' | '”' | '‘' | '’' | '[' | ']' | '(' | ')'
    )
}

fn clean_keyword(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unlisted = match LIST_MARKER.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => trimmed,
    };
    unlisted
        .trim()
        .trim_end_matches(':')
        .trim_matches(is_wrapping)
        .trim()
}

fn clean_column(raw: &str) -> &str {
    raw.trim()
        .trim_end_matches('.')
        .trim_matches(is_wrapping)
        .trim()
}

/// Parse a model answer into a classification.
///
/// Lines without an arrow are ignored, as are lines whose keyword or
/// column list ends up empty. Column names are kept verbatim (apart from
/// quoting and list punctuation); the filter compiler decides which ones
/// are real fields.
pub fn parse_classification(response: &str) -> Classification {
    let mut classification = Classification::new();

    for line in response.lines() {
        let Some(arrow) = ARROW.find(line) else {
            continue;
        };

        let keyword = clean_keyword(&line[..arrow.start()]);
        let columns: Vec<&str> = COLUMN_SEPARATOR
            .split(&line[arrow.end()..])
            .map(clean_column)
            .filter(|c| !c.is_empty())
            .collect();

        if keyword.is_empty() || columns.is_empty() {
            trace!(subsystem = "inference", line, "Skipping unusable classifier line");
            continue;
        }

        classification.insert(keyword, columns);
    }

    classification
}

/// Keyword classifier backed by a chat-completion model.
pub struct LlmKeywordClassifier<B> {
    backend: B,
    name: String,
}

impl<B: GenerationBackend> LlmKeywordClassifier<B> {
    pub fn new(backend: B) -> Self {
        let name = format!("llm:{}", backend.model_name());
        Self { backend, name }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: GenerationBackend> KeywordClassifier for LlmKeywordClassifier<B> {
    async fn classify(&self, text: &str) -> Result<Classification> {
        if text.trim().is_empty() {
            return Ok(Classification::new());
        }

        let start = Instant::now();
        let response = self
            .backend
            .generate_with_system(SYSTEM_PROMPT, &user_prompt(text))
            .await?;
        let classification = parse_classification(&response);

        debug!(
            subsystem = "inference",
            component = "classifier",
            op = "classify",
            model = %self.backend.model_name(),
            response_len = response.len(),
            keyword_count = classification.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Query classified"
        );

        Ok(classification)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

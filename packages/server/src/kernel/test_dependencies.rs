// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.
// Mocks are cheap to clone and share their recorded state, so a test can keep
// a handle and inspect calls after the deps have been consumed.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::deps::{DigestSettings, ServerDeps};
use super::{BaseAI, BaseSafetyClassifier, BaseSearchProvider, SearchPage};
use crate::domains::digest::cache::ResponseCache;
use crate::domains::digest::models::{ModerationResult, Post, SummaryBackend};
use crate::error::{DigestError, DigestResult};

/// Build a post whose author fields derive from `author_id`.
pub fn mock_post(id: &str, author_id: &str, text: &str) -> Post {
    Post {
        id: id.to_string(),
        author_id: author_id.to_string(),
        author_name: format!("User {}", author_id),
        author_username: format!("user_{}", author_id),
        text: text.to_string(),
        created_at: None,
    }
}

// =============================================================================
// Mock Search Provider
// =============================================================================

/// Arguments captured from a search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCallArgs {
    pub query: String,
    pub page_size: u32,
    pub next_token: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockSearchProvider {
    responses: Arc<Mutex<VecDeque<DigestResult<SearchPage>>>>,
    /// Returned once the queue is drained
    fallback: Arc<Mutex<SearchPage>>,
    calls: Arc<Mutex<Vec<SearchCallArgs>>>,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one page of results
    pub fn with_page(self, posts: Vec<Post>, next_token: Option<&str>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(SearchPage {
            posts,
            next_token: next_token.map(str::to_string),
        }));
        self
    }

    /// Queue a failing call
    pub fn with_error(self, error: DigestError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Page returned for every call after the queue is drained
    pub fn repeating_page(self, posts: Vec<Post>, next_token: Option<&str>) -> Self {
        *self.fallback.lock().unwrap() = SearchPage {
            posts,
            next_token: next_token.map(str::to_string),
        };
        self
    }

    pub fn calls(&self) -> Vec<SearchCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseSearchProvider for MockSearchProvider {
    async fn search_page(
        &self,
        query: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> DigestResult<SearchPage> {
        self.calls.lock().unwrap().push(SearchCallArgs {
            query: query.to_string(),
            page_size,
            next_token: next_token.map(str::to_string),
        });

        let queued = self.responses.lock().unwrap().pop_front();
        match queued {
            Some(result) => result,
            None => Ok(self.fallback.lock().unwrap().clone()),
        }
    }
}

// =============================================================================
// Mock Safety Classifier
// =============================================================================

#[derive(Clone)]
enum ClassifierBehavior {
    Clean,
    Flag(String),
    Fail(String),
}

#[derive(Clone)]
pub struct MockSafetyClassifier {
    behavior: ClassifierBehavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSafetyClassifier {
    /// Never flags anything
    pub fn new() -> Self {
        Self {
            behavior: ClassifierBehavior::Clean,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Flags every input under `category`
    pub fn flagging(category: &str) -> Self {
        Self {
            behavior: ClassifierBehavior::Flag(category.to_string()),
            ..Self::new()
        }
    }

    /// Every call fails with an upstream error
    pub fn failing(message: &str) -> Self {
        Self {
            behavior: ClassifierBehavior::Fail(message.to_string()),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockSafetyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSafetyClassifier for MockSafetyClassifier {
    async fn classify(&self, text: &str) -> DigestResult<ModerationResult> {
        self.calls.lock().unwrap().push(text.to_string());

        match &self.behavior {
            ClassifierBehavior::Clean => Ok(ModerationResult {
                flagged: false,
                categories: IndexMap::from([("violence".to_string(), false)]),
                scores: IndexMap::from([("violence".to_string(), 0.001)]),
            }),
            ClassifierBehavior::Flag(category) => Ok(ModerationResult {
                flagged: true,
                categories: IndexMap::from([(category.clone(), true)]),
                scores: IndexMap::from([(category.clone(), 0.97)]),
            }),
            ClassifierBehavior::Fail(message) => Err(DigestError::Upstream(message.clone())),
        }
    }
}

// =============================================================================
// Mock AI
// =============================================================================

pub const MOCK_AI_MODEL: &str = "mock-model";

#[derive(Clone)]
pub struct MockAI {
    responses: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a raw response (returned verbatim)
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(response.into());
        self
    }

    /// Queue a response serialized from `data`
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).unwrap();
        self.with_response(json)
    }

    /// User prompts received, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    fn model(&self) -> &str {
        MOCK_AI_MODEL
    }

    async fn generate_structured(
        &self,
        _schema_name: &str,
        _system_prompt: &str,
        user_prompt: &str,
        _schema: serde_json::Value,
    ) -> DigestResult<String> {
        self.calls.lock().unwrap().push(user_prompt.to_string());

        let queued = self.responses.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| {
            serde_json::json!({
                "summary": "Mock summary",
                "suggested_post": "Mock suggested post",
                "keywords": ["mock"],
                "bullets": ["Mock bullet"]
            })
            .to_string()
        }))
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

pub struct TestDependencies {
    search: MockSearchProvider,
    classifier: MockSafetyClassifier,
    ai: MockAI,
    cache: Arc<ResponseCache<crate::domains::digest::models::DigestResponse>>,
    settings: DigestSettings,
    missing_credential: Option<&'static str>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            search: MockSearchProvider::new(),
            classifier: MockSafetyClassifier::new(),
            ai: MockAI::new(),
            cache: Arc::new(ResponseCache::new()),
            settings: DigestSettings::default(),
            missing_credential: None,
        }
    }

    pub fn mock_search(mut self, search: MockSearchProvider) -> Self {
        self.search = search;
        self
    }

    pub fn mock_classifier(mut self, classifier: MockSafetyClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = ai;
        self
    }

    pub fn summary_backend(mut self, backend: SummaryBackend) -> Self {
        self.settings.summary_backend = backend;
        self
    }

    pub fn cache_ttl_seconds(mut self, ttl: i64) -> Self {
        self.settings.cache_ttl_seconds = ttl;
        self
    }

    pub fn target_count(mut self, count: usize) -> Self {
        self.settings.target_count = count;
        self
    }

    /// Simulate a deployment without the named credential
    pub fn missing_credential(mut self, name: &'static str) -> Self {
        self.missing_credential = Some(name);
        self
    }

    pub fn into_deps(self) -> ServerDeps {
        let mut deps = ServerDeps::new(
            Arc::new(self.search),
            Arc::new(self.classifier),
            Arc::new(self.ai),
            self.cache,
            self.settings,
        );
        deps.missing_credential = self.missing_credential;
        deps
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

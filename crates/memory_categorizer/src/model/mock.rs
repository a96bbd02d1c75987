//! Scripted model that replays queued results

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::{CategoryModel, MemoryCategories};
use crate::error::{CategorizeError, Result};

/// In-memory `CategoryModel` returning scripted results in order
#[derive(Debug, Default)]
pub struct MockModel {
    responses: Mutex<VecDeque<Result<MemoryCategories>>>,
    calls: AtomicUsize,
    last_memory: Mutex<Option<String>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model that always answers with the given categories once
    pub fn returning<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new().then(Ok(MemoryCategories::new(categories)))
    }

    /// Queue another result
    pub fn then(mut self, result: Result<MemoryCategories>) -> Self {
        self.responses.get_mut().push_back(result);
        self
    }

    /// Number of `categorize` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Memory text passed to the most recent call
    pub async fn last_memory(&self) -> Option<String> {
        self.last_memory.lock().await.clone()
    }
}

#[async_trait]
impl CategoryModel for MockModel {
    async fn categorize(&self, memory: &str) -> Result<MemoryCategories> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_memory.lock().await = Some(memory.to_string());

        self.responses.lock().await.pop_front().unwrap_or_else(|| {
            Err(CategorizeError::EmptyResponse(
                "mock model has no scripted responses left".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let mock = MockModel::returning(["a"]).then(Err(CategorizeError::Refusal("no".to_string())));

        assert_eq!(mock.categorize("m1").await.unwrap().categories, vec!["a"]);
        assert!(matches!(
            mock.categorize("m2").await,
            Err(CategorizeError::Refusal(_))
        ));
        assert!(matches!(
            mock.categorize("m3").await,
            Err(CategorizeError::EmptyResponse(_))
        ));
        assert_eq!(mock.calls(), 3);
        assert_eq!(mock.last_memory().await.as_deref(), Some("m3"));
    }
}

// Shared test doubles for the provider chain.

#![allow(dead_code)]

use async_trait::async_trait;
use cascade_core::{ProviderAdapter, ProviderError, ProviderId};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Adapter with a fixed answer that counts how often it was called.
pub struct CountingAdapter {
    id: ProviderId,
    answer: Result<String, u16>,
    calls: Arc<AtomicUsize>,
}

impl CountingAdapter {
    pub fn succeeding(id: ProviderId, text: &str) -> Self {
        Self {
            id,
            answer: Ok(text.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails with `HTTP <status>`.
    pub fn failing(id: ProviderId, status: u16) -> Self {
        Self {
            id,
            answer: Err(status),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ProviderAdapter for CountingAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .map_err(|status| ProviderError::Http { status })
    }
}

/// Adapter that panics, standing in for a bug below the boundary.
pub struct PanickingAdapter;

#[async_trait]
impl ProviderAdapter for PanickingAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        panic!("adapter exploded");
    }
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

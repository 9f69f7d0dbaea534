//! Block fulfillment: asks the content source for text, one call per selected block.
//!
//! Calls are issued concurrently and joined back by position, so the block
//! order never depends on which call finishes first. Any failure (error,
//! empty text, timeout) leaves that block unfulfilled; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use crate::assembly::blocks::{BlockKind, ContentBlock};
use crate::llm_client::{LlmClient, LlmError};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Anything that turns a prompt into block text.
///
/// Carried in `AppState` as `Arc<dyn ContentSource>`.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl ContentSource for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_text(prompt).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fulfillment
// ────────────────────────────────────────────────────────────────────────────

/// Outcome counts for one fulfillment run, for logging and API responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct FulfillmentReport {
    pub requested: usize,
    pub fulfilled: usize,
    pub failed: usize,
}

/// Generates text for every selected, not-yet-fulfilled block.
///
/// Returns the blocks in the order they were passed in, each populated with
/// its generated text when the call succeeded within `timeout`.
pub async fn fulfill_blocks(
    source: &dyn ContentSource,
    mut blocks: Vec<ContentBlock>,
    timeout: Duration,
) -> (Vec<ContentBlock>, FulfillmentReport) {
    let jobs: Vec<(usize, BlockKind, String)> = blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_selected() && b.generated().is_none())
        .map(|(i, b)| (i, b.kind(), b.kind().generation_prompt(b.prompt())))
        .collect();
    let requested = jobs.len();

    let calls = jobs.into_iter().map(|(idx, kind, prompt)| async move {
        let outcome = match tokio::time::timeout(timeout, source.generate(&prompt)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
            Ok(Ok(_)) => {
                warn!("Content source returned empty text for '{kind}', block omitted");
                None
            }
            Ok(Err(e)) => {
                warn!("Generation failed for '{kind}': {e}, block omitted");
                None
            }
            Err(_) => {
                warn!(
                    "Generation for '{kind}' timed out after {}s, block omitted",
                    timeout.as_secs()
                );
                None
            }
        };
        (idx, outcome)
    });

    // join_all yields results in submission order regardless of completion order.
    let results = join_all(calls).await;

    let mut report = FulfillmentReport {
        requested,
        ..FulfillmentReport::default()
    };

    for (idx, outcome) in results {
        match outcome {
            Some(text) => {
                blocks[idx].fulfill(text);
                report.fulfilled += 1;
            }
            None => report.failed += 1,
        }
    }

    info!(
        "Fulfilled {}/{} block(s) ({} failed)",
        report.fulfilled, report.requested, report.failed
    );

    (blocks, report)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::assemble;
    use crate::assembly::blocks::blocks_for_selection;
    use crate::assembly::theme::PaletteInput;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the prompt back, delaying later blocks less so completion order
    /// is the reverse of submission order.
    struct ReversingSource;

    #[async_trait]
    impl ContentSource for ReversingSource {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            let delay = if prompt.contains("about us") {
                50
            } else if prompt.contains("features") {
                30
            } else {
                5
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("generated: {prompt}"))
        }
    }

    /// Fails for pricing, hangs for testimonials, succeeds otherwise.
    struct FlakySource;

    #[async_trait]
    impl ContentSource for FlakySource {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            if prompt.contains("pricing") {
                return Err(LlmError::EmptyContent);
            }
            if prompt.contains("testimonials") {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            if prompt.contains("call to action") {
                return Ok("   ".to_string());
            }
            Ok("ok".to_string())
        }
    }

    struct IndentedListSource;

    #[async_trait]
    impl ContentSource for IndentedListSource {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok("  - fast builds\n  - happy teams\n".to_string())
        }
    }

    struct CountingSource(AtomicUsize);

    #[async_trait]
    impl ContentSource for CountingSource {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok("text".to_string())
        }
    }

    #[tokio::test]
    async fn test_results_rejoined_in_canonical_order() {
        let blocks = blocks_for_selection(&BlockKind::CANONICAL, |_| None);
        let (blocks, report) =
            fulfill_blocks(&ReversingSource, blocks, Duration::from_secs(5)).await;

        assert_eq!(report.fulfilled, 5);
        let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind()).collect();
        assert_eq!(kinds, BlockKind::CANONICAL.to_vec());
        assert!(blocks[0]
            .generated()
            .unwrap()
            .contains("Write an about us section"));
        assert!(blocks[4]
            .generated()
            .unwrap()
            .contains("compelling call to action"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_and_timeouts_leave_blocks_unfulfilled() {
        let blocks = blocks_for_selection(&BlockKind::CANONICAL, |_| None);
        let (blocks, report) = fulfill_blocks(&FlakySource, blocks, Duration::from_secs(10)).await;

        assert_eq!(report.requested, 5);
        assert_eq!(report.fulfilled, 2);
        assert_eq!(report.failed, 3);

        let fulfilled: Vec<BlockKind> = blocks
            .iter()
            .filter(|b| b.is_fulfilled())
            .map(|b| b.kind())
            .collect();
        assert_eq!(fulfilled, vec![BlockKind::AboutUs, BlockKind::Features]);
    }

    #[tokio::test]
    async fn test_generated_text_is_stored_verbatim() {
        let blocks = blocks_for_selection(&[BlockKind::Features], |_| None);
        let (blocks, _) =
            fulfill_blocks(&IndentedListSource, blocks, Duration::from_secs(5)).await;

        let doc = assemble("T", "D", "Light", &PaletteInput::default(), blocks).unwrap();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].text, "  - fast builds\n  - happy teams\n");
    }

    #[tokio::test]
    async fn test_only_selected_blocks_are_requested() {
        let source = CountingSource(AtomicUsize::new(0));
        let blocks = blocks_for_selection(&[BlockKind::Pricing], |_| None);
        let (blocks, report) = fulfill_blocks(&source, blocks, Duration::from_secs(5)).await;

        assert_eq!(source.0.load(Ordering::SeqCst), 1);
        assert_eq!(report.requested, 1);
        assert_eq!(blocks.iter().filter(|b| b.is_fulfilled()).count(), 1);
    }

    #[tokio::test]
    async fn test_already_fulfilled_blocks_are_not_regenerated() {
        let source = CountingSource(AtomicUsize::new(0));
        let mut block = ContentBlock::new(BlockKind::AboutUs, true, "x");
        block.fulfill("kept");
        let (blocks, report) = fulfill_blocks(&source, vec![block], Duration::from_secs(5)).await;

        assert_eq!(source.0.load(Ordering::SeqCst), 0);
        assert_eq!(report.requested, 0);
        assert_eq!(blocks[0].generated(), Some("kept"));
    }
}

//! Streaming completion support

use crate::error::CascadeResult;
use crate::messages::TokenUsage;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// A chunk of a streaming completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Incremental content
    pub content: Option<String>,
    /// Usage information (usually only on the last chunk)
    pub usage: Option<TokenUsage>,
    /// Whether this is the final chunk
    pub is_final: bool,
    /// Finish reason (if final)
    pub finish_reason: Option<String>,
}

impl StreamChunk {
    /// Create a content chunk
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            usage: None,
            is_final: false,
            finish_reason: None,
        }
    }

    /// Create a final chunk with usage information
    pub fn final_chunk(usage: Option<TokenUsage>, finish_reason: Option<String>) -> Self {
        Self {
            content: None,
            usage,
            is_final: true,
            finish_reason,
        }
    }
}

/// Stream of completion chunks
///
/// Lazy and finite per call; a stream cannot be restarted once handed out.
pub type CompletionStream = Pin<Box<dyn Stream<Item = CascadeResult<StreamChunk>> + Send>>;

//! Text-generation provider layer for stock-pulse
//!
//! This crate provides provider-agnostic abstractions for chat-style
//! text generation:
//!
//! - Message and completion request/response types
//! - Provider trait for text-generation services
//! - An OpenAI-compatible HTTP provider
//! - Structured-output helpers (format instructions, tolerant JSON reply parsing)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod structured;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{Message, Role};
pub use provider::LlmProvider;
pub use providers::{OpenAiConfig, OpenAiProvider};
pub use structured::{format_instructions, parse_json_reply};

//! Core traits and types for the eco assistant gateway
//!
//! This crate provides foundational types used across all other crates:
//! - Model profiles and operating modes
//! - Conversation turns and chat messages
//! - Content-type labels produced by classification
//! - Traits for the external collaborators (completion, speech, images)
//! - Error types

pub mod content;
pub mod conversation;
pub mod error;
pub mod llm_types;
pub mod profile;
pub mod traits;

pub use content::ContentType;
pub use conversation::{ConversationTurn, Mode};
pub use error::{Error, Result};
pub use llm_types::{FinishReason, GenerateResponse, Message, Role};
pub use profile::{ModelProfile, ProfileName};

pub use traits::{AudioInput, CompletionService, ImageReference, ImageSource, SpeechSynthesizer, Transcriber};

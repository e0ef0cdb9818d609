//! Core traits for the gateway
//!
//! Every external service sits behind one of these traits so the
//! orchestration can be exercised with mocks and backends can be swapped
//! through configuration.
//!
//! ```text
//! Language models:
//!   - CompletionService: chat completion under a model profile
//!
//! Speech:
//!   - SpeechSynthesizer: text -> audio bytes
//!   - Transcriber: audio upload -> text
//!
//! Images:
//!   - ImageSource: keywords -> reachable image reference
//! ```

mod images;
mod llm;
mod speech;

pub use images::{ImageReference, ImageSource};
pub use llm::CompletionService;
pub use speech::{AudioInput, SpeechSynthesizer, Transcriber};

//! Text processing for the eco assistant
//!
//! This crate provides the pure text stages of a chat turn:
//! - **Classification**: infer the kind of answer a query asks for
//! - **Formatting**: turn markdown-like model output into presentation markup
//! - **Keywords**: derive image search keywords and image prompts
//! - **Markup**: tag stripping and char-safe truncation
//!
//! Every function here is total; none of them fail or perform I/O.
//!
//! # Example
//!
//! ```
//! use eco_assistant_core::ContentType;
//! use eco_assistant_text_processing::{classify, format_response};
//!
//! let classification = classify("Draw a picture of a wind farm");
//! assert_eq!(classification.label(), ContentType::Image);
//!
//! let html = format_response("## Tips\n- Reuse\n- Recycle");
//! assert_eq!(html, "<h3>Tips</h3>\n<ul>\n<li>Reuse</li>\n<li>Recycle</li>\n</ul>");
//! ```

pub mod classifier;
pub mod formatter;
pub mod keywords;
pub mod markup;

pub use classifier::{classify, Classification};
pub use formatter::{format_blocks, format_response, render_blocks, FormattedBlock};
pub use keywords::{extract_keywords, image_prompt_for};
pub use markup::{strip_tags, truncate_chars};

//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **URL validation**: Syntax checks for feed and article URLs, site naming
//! - **Text processing**: Whitespace normalization, sentence and word splitting
//! - **HTTP**: The shared `reqwest` client with a bounded redirect policy
//!
//! # Examples
//!
//! ```
//! use newsbrief::util::{validate_url, website_name, split_sentences};
//!
//! let url = validate_url("https://www.example.com/story").unwrap();
//! assert_eq!(website_name(&url), "example.com");
//!
//! let sentences = split_sentences("One. Two.");
//! assert_eq!(sentences.len(), 2);
//! ```

mod http;
mod text;
mod url_validator;

pub use http::build_client;
pub use text::{normalize_whitespace, split_sentences, truncate_chars, words};
pub use url_validator::{validate_url, website_name, UrlValidationError};

/// Maximum allowed search query length
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;

//! REST client for the Gemini generative-language API.
//!
//! Wraps the two endpoints this system needs -- text generation
//! (`generateContent`) and query embeddings (`embedContent`) -- behind a
//! typed [`reqwest`] client with explicit error classification.

pub mod client;

pub use client::{GeminiClient, GeminiConfig, GeminiError};

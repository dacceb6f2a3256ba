//! AI-assisted conveniences backed by an external generative-language API
//!
//! Pitch drafting and smart import both go through the `TextGenerator` seam.

mod gemini;
pub mod pitch;
mod provider;
pub mod smart_import;

#[cfg(test)]
pub(crate) mod testing;

pub use gemini::Gemini;
pub use provider::{AiError, TextGenerator};

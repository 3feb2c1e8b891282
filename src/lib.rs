//! Plant identification service
//!
//! Accepts a photo over HTTP, asks a vision-language model (Gemini) to
//! identify the plant in it, and returns a structured result with care
//! instructions. Without a provider credential a canned identification is
//! served so front-ends stay demonstrable.

pub mod ai;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};

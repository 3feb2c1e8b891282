pub mod client;
pub mod identify;
pub mod types;

pub use client::GeminiHttpClient;
pub use identify::{parse_identification, GeminiPlantClient};

pub mod ads;
pub mod client;
pub mod schema;
pub mod types;

pub use ads::GeminiAdClient;
pub use client::GeminiHttpClient;

//! Shopping ad generator - turns product information into ad copy
//!
//! Collects a product's name, details, audience and optional image, asks a
//! generative model for an SEO title, description, category and compliance
//! verdict, and exports the result as text.

pub mod ai;
pub mod app;
pub mod error;
pub mod export;
pub mod image;
pub mod models;
pub mod prompts;
pub mod render;
pub mod session;

pub use error::{Error, Result};

// Interview question generation.
// Implements: prompt templates, response recovery, completion and export.
// All chat calls go through llm_client.

pub mod export;
pub mod extract;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;

// Resume optimization pipeline: relevance scoring → per-category selection →
// markdown rendering. The first three modules are pure; service and handlers
// wire them to the profile store, the LLM and storage.

pub mod handlers;
pub mod optimizer;
pub mod relevance;
pub mod renderer;
pub mod service;

//! Cross-cutting services shared by the HTTP layer and the core pipelines.

pub mod pricing;

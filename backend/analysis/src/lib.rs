//! `scamlens-analysis` — the analysis pipeline and its providers.
//!
//! Everything "intelligent" lives in the hosted completion provider; this
//! crate only builds the fixed prompts, runs the optional OCR pre-step,
//! issues the classification call, and validates the reply.

pub mod ocr;
pub mod pipeline;
pub mod prompt;
pub mod providers;

pub use pipeline::AnalysisService;
pub use providers::{MockProvider, OpenAiProvider};

//! `scamlens-core` — shared building blocks for the scamlens service.
//!
//! Holds the wire types (`AnalyzeRequest`, `ScamVerdict`), the closed error
//! taxonomy, the `LlmProvider` trait implemented by the analysis crate, and
//! the verdict extraction/validation path shared by every caller.

pub mod error;
pub mod traits;
pub mod types;
pub mod verdict;

pub use error::{AnalysisError, CallStage};
pub use traits::{LlmProvider, LlmRequest, LlmResponse};
pub use types::{
    AnalyzeRequest, CategoryFinding, RiskLevel, ScamVerdict, VerdictDetails,
    REQUIRED_DETAIL_FIELDS, REQUIRED_FIELDS,
};
pub use verdict::{parse_verdict, VerdictError};

//! Domain models for RandGen.
//!
//! This module contains the generation options, persisted records, and API
//! contracts.

pub mod dto;
pub mod options;
pub mod record;

pub use dto::{
    ApiResponse, HealthResponse, ReadyComponents, ReadyResponse, RecordResponse, RetrieveQuery,
};
pub use options::{GenerationKind, GenerationOptions, RawOptions};
pub use record::{GenerateOutcome, GeneratedRecord, MAX_IDEMPOTENCY_KEY_LEN, NewRecord};

//! Service layer module.
//!
//! Contains option normalization, the generation engine, and the idempotent
//! generate/retrieve orchestration.

pub mod engine;
pub mod generate;
pub mod validator;

pub use engine::{MAX_LENGTH, MIN_LENGTH, reduce_to_unique};
pub use generate::GenerateService;
pub use validator::normalize;

//! AI-assisted field extraction
//! Wraps the OpenAI chat API behind a trait so processing works with or without it

pub mod field_extractor;
pub mod prompts;

pub use field_extractor::{
    build_field_extractor, CandidateFields, DisabledFieldExtractor, FieldExtractor,
    OpenAiFieldExtractor,
};

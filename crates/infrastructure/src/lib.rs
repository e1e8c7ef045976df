//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod gemini_answer_generator;
mod in_memory_application_repository;
mod in_memory_inquiry_repository;
mod in_memory_profile_repository;
mod postgres_application_repository;
mod postgres_inquiry_repository;
mod postgres_profile_repository;

pub use gemini_answer_generator::{GeminiAnswerGenerator, GeminiConfig};
pub use in_memory_application_repository::InMemoryApplicationRepository;
pub use in_memory_inquiry_repository::InMemoryInquiryRepository;
pub use in_memory_profile_repository::InMemoryProfileRepository;
pub use postgres_application_repository::PostgresApplicationRepository;
pub use postgres_inquiry_repository::PostgresInquiryRepository;
pub use postgres_profile_repository::PostgresProfileRepository;

//! Application services and ports.

#![forbid(unsafe_code)]

mod chat_service;
mod inquiry_service;
mod payload;
mod profile_service;
mod recruiting_service;

pub use chat_service::{AnswerGenerator, ChatService, GenerationOutcome, GenerationRequest};
pub use inquiry_service::{
    InquiryRecord, InquiryRepository, InquiryService, InquirySummaryRecord, NewInquiry,
};
pub use profile_service::{ProfileRepository, ProfileService, ProfileUpsert, UserProfileRecord};
pub use recruiting_service::{
    ApplicationRecord, ApplicationRepository, NewApplication, RecruitingService, ResumeReference,
};

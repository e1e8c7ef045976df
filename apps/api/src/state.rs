use campusforge_application::{ChatService, InquiryService, ProfileService, RecruitingService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub inquiry_service: InquiryService,
    pub recruiting_service: RecruitingService,
    pub chat_service: ChatService,
    pub pool: PgPool,
}

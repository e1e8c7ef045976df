use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use campusforge_application::{InquiryRecord, InquiryRepository, InquirySummaryRecord, NewInquiry};
use campusforge_core::AppResult;
use campusforge_domain::{InquiryId, InquiryStatus};

/// In-memory inquiry repository implementation.
///
/// Rows are held in submission order; listings walk the rows in reverse
/// to match the newest-first contract of the persistent store.
#[derive(Debug, Default)]
pub struct InMemoryInquiryRepository {
    inquiries: RwLock<Vec<InquiryRecord>>,
}

impl InMemoryInquiryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inquiries: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl InquiryRepository for InMemoryInquiryRepository {
    async fn insert(&self, inquiry: NewInquiry) -> AppResult<InquiryId> {
        let record = InquiryRecord {
            id: InquiryId::new(),
            user_id: inquiry.user_id,
            customer_name: inquiry.customer_name,
            customer_email: inquiry.customer_email,
            customer_phone: inquiry.customer_phone,
            service_type: inquiry.service_type,
            project_details: inquiry.project_details,
            status: InquiryStatus::New,
            raw_form_data: inquiry.raw_form_data,
            created_at: Utc::now(),
            last_updated_by: None,
            last_updated_at: None,
        };
        let inquiry_id = record.id;
        self.inquiries.write().await.push(record);

        Ok(inquiry_id)
    }

    async fn list(&self, status: Option<InquiryStatus>) -> AppResult<Vec<InquiryRecord>> {
        Ok(self
            .inquiries
            .read()
            .await
            .iter()
            .rev()
            .filter(|record| status.is_none_or(|wanted| record.status == wanted))
            .cloned()
            .collect())
    }

    async fn list_for_subject(&self, subject: &str) -> AppResult<Vec<InquirySummaryRecord>> {
        Ok(self
            .inquiries
            .read()
            .await
            .iter()
            .rev()
            .filter(|record| record.user_id == subject)
            .map(|record| InquirySummaryRecord {
                id: record.id,
                created_at: record.created_at,
                service_type: record.service_type.clone(),
                project_details: record.project_details.clone(),
                status: record.status,
            })
            .collect())
    }

    async fn update_status(
        &self,
        inquiry_id: InquiryId,
        status: InquiryStatus,
        updated_by: &str,
    ) -> AppResult<Option<InquiryRecord>> {
        let mut inquiries = self.inquiries.write().await;
        let Some(record) = inquiries.iter_mut().find(|record| record.id == inquiry_id) else {
            return Ok(None);
        };

        record.status = status;
        record.last_updated_by = Some(updated_by.to_owned());
        record.last_updated_at = Some(Utc::now());

        Ok(Some(record.clone()))
    }
}

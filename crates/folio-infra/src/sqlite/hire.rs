//! SQLite hire request store.

use folio_core::repository::hire::HireRequestRepository;
use folio_types::error::RepositoryError;
use folio_types::hire::HireRequest;

use super::pool::DatabasePool;
use super::{format_datetime, query_error};

#[derive(Clone)]
pub struct SqliteHireRequestRepository {
    pool: DatabasePool,
}

impl SqliteHireRequestRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl HireRequestRepository for SqliteHireRequestRepository {
    async fn create(&self, request: &HireRequest) -> Result<(), RepositoryError> {
        let channels = serde_json::to_string(&request.preferred_communication)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO hire_requests (id, gig_id, user_id, name, email, company, phone,
                   project_title, message, proposed_budget, budget_details, timeline,
                   timeline_details, preferred_communication, meeting_requested,
                   meeting_availability, source, status, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(request.id.to_string())
        .bind(request.gig_id)
        .bind(request.user_id.map(|id| id.to_string()))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.company)
        .bind(&request.phone)
        .bind(&request.project_title)
        .bind(&request.message)
        .bind(request.proposed_budget.as_str())
        .bind(&request.budget_details)
        .bind(request.timeline.as_str())
        .bind(&request.timeline_details)
        .bind(channels)
        .bind(request.meeting_requested)
        .bind(&request.meeting_availability)
        .bind(&request.source)
        .bind(request.status.to_string())
        .bind(format_datetime(&request.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                RepositoryError::NotFound
            } else {
                query_error(e)
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::portfolio::SqlitePortfolioRepository;
    use crate::sqlite::test_support::test_pool;
    use chrono::Utc;
    use folio_core::repository::portfolio::PortfolioRepository;
    use folio_types::catalog::{DeliveryUnit, GigStatus, PriceType};
    use folio_types::hire::{BudgetRange, HireStatus, Timeline};
    use folio_types::import::NewGig;
    use uuid::Uuid;

    fn lead(gig_id: i64) -> HireRequest {
        HireRequest {
            id: Uuid::now_v7(),
            gig_id,
            user_id: None,
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            company: "Navy".to_string(),
            phone: String::new(),
            project_title: "Billing API".to_string(),
            message: "We need a billing API.".to_string(),
            proposed_budget: BudgetRange::From10kTo25k,
            budget_details: String::new(),
            timeline: Timeline::TwoWeeks,
            timeline_details: String::new(),
            preferred_communication: vec!["email".to_string(), "zoom".to_string()],
            meeting_requested: true,
            meeting_availability: "Weekday mornings".to_string(),
            source: "referral".to_string(),
            status: HireStatus::New,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_stores_every_field() {
        let pool = test_pool().await;
        let gig = SqlitePortfolioRepository::new(pool.clone())
            .upsert_gig(
                &NewGig {
                    title: "API Development".to_string(),
                    slug: None,
                    short_description: String::new(),
                    long_description: String::new(),
                    price_min: 1500.0,
                    price_max: None,
                    price_type: PriceType::Fixed,
                    delivery_time_min: 2,
                    delivery_time_max: None,
                    delivery_time_unit: DeliveryUnit::Weeks,
                    status: GigStatus::Open,
                    is_featured: false,
                    order: 0,
                },
                "api-development",
            )
            .await
            .unwrap();
        let repo = SqliteHireRequestRepository::new(pool.clone());
        let request = lead(gig.id);
        repo.create(&request).await.unwrap();

        let row: (i64, String, String, String, bool, String) = sqlx::query_as(
            r#"SELECT gig_id, proposed_budget, timeline, preferred_communication,
                      meeting_requested, status
               FROM hire_requests WHERE id = ?"#,
        )
        .bind(request.id.to_string())
        .fetch_one(&pool.reader)
        .await
        .unwrap();
        assert_eq!(row.0, gig.id);
        assert_eq!(row.1, "10k_25k");
        assert_eq!(row.2, "2_weeks");
        assert_eq!(
            serde_json::from_str::<Vec<String>>(&row.3).unwrap(),
            vec!["email", "zoom"]
        );
        assert!(row.4);
        assert_eq!(row.5, "new");
    }

    #[tokio::test]
    async fn test_missing_gig_is_not_found() {
        let repo = SqliteHireRequestRepository::new(test_pool().await);
        let err = repo.create(&lead(404)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}

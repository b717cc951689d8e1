//! Repository for the `franchise_inquiries` table.

use sqlx::PgPool;

use crate::models::franchise_inquiry::{CreateFranchiseInquiry, FranchiseInquiry};

const COLUMNS: &str = "id, name, email, phone, city, message, created_at";

pub struct FranchiseInquiryRepo;

impl FranchiseInquiryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFranchiseInquiry,
    ) -> Result<FranchiseInquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO franchise_inquiries (name, email, phone, city, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FranchiseInquiry>(&query)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(&input.phone)
            .bind(&input.city)
            .bind(input.message.trim())
            .fetch_one(pool)
            .await
    }

    /// Most recent inquiries first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FranchiseInquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM franchise_inquiries \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, FranchiseInquiry>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

use chrono::Utc;

use sqlx::types::Json;
use sqlx::PgExecutor;

use uuid::Uuid;

use crate::model::{NewSubmission, Submission};

/// Repository for the `submissions` table.
/// Every operation is a single statement, so callers never need a transaction.
pub struct SubmissionRepo;

impl SubmissionRepo {
    #[tracing::instrument(name = "Insert submission", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        new_submission: &NewSubmission,
    ) -> sqlx::Result<Submission> {
        let id = Uuid::new_v4();
        let submitted_at = Utc::now();

        sqlx::query_as::<_, Submission>(
            "insert into submissions(
                id, first_name, last_name, email, phone, interests,
                subscription, frequency, comments, terms_accepted, submitted_at
            )
            values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            returning *",
        )
        .bind(id)
        .bind(new_submission.first_name.as_ref())
        .bind(new_submission.last_name.as_ref())
        .bind(new_submission.email.as_ref())
        .bind(new_submission.phone.as_deref())
        .bind(Json(new_submission.interests.as_value()))
        .bind(new_submission.subscription.as_ref())
        .bind(&new_submission.frequency)
        .bind(new_submission.comments.as_deref())
        .bind(new_submission.terms_accepted)
        .bind(submitted_at)
        .fetch_one(executor)
        .await
    }

    #[tracing::instrument(name = "Fetch all submissions", skip(executor))]
    pub async fn fetch_all<'con>(executor: impl PgExecutor<'con>) -> sqlx::Result<Vec<Submission>> {
        sqlx::query_as::<_, Submission>("select * from submissions order by submitted_at desc")
            .fetch_all(executor)
            .await
    }

    #[tracing::instrument(name = "Fetch a submission by id", skip(executor))]
    pub async fn fetch_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<Submission>> {
        sqlx::query_as::<_, Submission>("select * from submissions where id=$1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a submission by id, returning whether a row was removed
    #[tracing::instrument(name = "Delete a submission by id", skip(executor))]
    pub async fn delete_by_id<'con>(executor: impl PgExecutor<'con>, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("delete from submissions where id=$1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

use actix_web::dev::HttpServiceFactory;
use actix_web::{delete, get, post, web, HttpResponse};

use sqlx::PgPool;

use formapp::body::{MessageBody, Operation};
use formapp::error::Error;
use formapp::model::{parse_submission_id, NewSubmission, SubmissionPayload};
use formapp::repo::SubmissionRepo;

use crate::error::{RestError, RestResult};

#[tracing::instrument(name = "List all submissions", skip(pool))]
#[get("")]
async fn list_submissions(pool: web::Data<PgPool>) -> RestResult<HttpResponse> {
    let submissions = SubmissionRepo::fetch_all(pool.get_ref())
        .await
        .map_err(|e| RestError::new(Operation::List, e))?;

    Ok(HttpResponse::Ok().json(submissions))
}

#[tracing::instrument(name = "Fetch a submission", skip(pool))]
#[get("/{id}")]
async fn fetch_submission(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> RestResult<HttpResponse> {
    let err = |e: Error| RestError::new(Operation::Fetch, e);

    let id = parse_submission_id(&path).map_err(err)?;
    let submission = SubmissionRepo::fetch_by_id(pool.get_ref(), id)
        .await
        .map_err(|e| err(e.into()))?
        .ok_or_else(|| err(Error::NotFound))?;

    Ok(HttpResponse::Ok().json(submission))
}

#[tracing::instrument(name = "Create a new submission", skip(pool, payload))]
#[post("")]
async fn create_submission(
    pool: web::Data<PgPool>,
    payload: web::Json<SubmissionPayload>,
) -> RestResult<HttpResponse> {
    let new_submission: NewSubmission = payload
        .into_inner()
        .try_into()
        .map_err(|e| RestError::new(Operation::Create, e))?;

    let submission = SubmissionRepo::insert(pool.get_ref(), &new_submission)
        .await
        .map_err(|e| RestError::new(Operation::Create, e))?;

    tracing::info!(submission.id = %submission.id, "Created submission");
    Ok(HttpResponse::Created().json(submission))
}

#[tracing::instrument(name = "Delete a submission", skip(pool))]
#[delete("/{id}")]
async fn delete_submission(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> RestResult<HttpResponse> {
    let err = |e: Error| RestError::new(Operation::Delete, e);

    let id = parse_submission_id(&path).map_err(err)?;
    if !SubmissionRepo::delete_by_id(pool.get_ref(), id)
        .await
        .map_err(|e| err(e.into()))?
    {
        return Err(err(Error::NotFound));
    }

    tracing::info!(submission.id = %id, "Deleted submission");
    Ok(HttpResponse::Ok().json(MessageBody::deleted()))
}

/// JSON extractor configuration reporting undecodable bodies as client errors
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|e, _req| RestError::malformed_body(e).into())
}

/// Submissions API endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/submissions")
        .app_data(json_config())
        .service(list_submissions)
        .service(create_submission)
        .service(fetch_submission)
        .service(delete_submission)
}

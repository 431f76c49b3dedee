//! Request catalog: ownership-checked CRUD over blog requests plus the
//! owner-facing views (details, my requests, schedule).

use bookswap_core::catalog::{validate_book_name, validate_window};
use bookswap_core::error::CoreError;
use bookswap_core::reservation::parse_date;
use bookswap_core::types::{Date, DbId};
use bookswap_db::models::blog_request::{
    BlogRequest, ClaimedRequest, CreateBlogRequest, OwnedRequest, UpdateBlogRequest,
};
use bookswap_db::models::claim::ClaimWithClaimant;
use bookswap_db::repositories::{BlogRequestRepo, ClaimRepo};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::reservation::{request_not_found, ReservationEngine};
use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Raw input for creating a request. Dates arrive as strings so malformed
/// values are reported as `INVALID_FORMAT` rather than a deserialization
/// failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestInput {
    pub book_name: String,
    pub start_date: String,
    pub available_from: String,
    pub available_to: String,
}

/// Raw partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequestInput {
    pub book_name: Option<String>,
    pub start_date: Option<String>,
    pub available_from: Option<String>,
    pub available_to: Option<String>,
}

/// Owner's detail view of one request.
#[derive(Debug, Serialize)]
pub struct RequestDetails {
    pub request: BlogRequest,
    pub claims: Vec<ClaimWithClaimant>,
    pub claim_count: usize,
}

/// Everything the caller created and everything the caller claimed.
#[derive(Debug, Serialize)]
pub struct MyRequests {
    pub created: Vec<OwnedRequest>,
    pub accepted: Vec<ClaimedRequest>,
}

/// Calendar markers for the caller.
#[derive(Debug, Serialize)]
pub struct Schedule {
    /// Dates on which the caller must publish a promotion.
    pub promotion_dates: Vec<Date>,
    /// Start dates of the caller's own requests.
    pub request_dates: Vec<Date>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Request catalog operations.
pub struct RequestCatalog;

impl RequestCatalog {
    /// Create a request owned by `owner_id`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRequestInput,
    ) -> AppResult<BlogRequest> {
        let book_name = input.book_name.trim().to_string();
        validate_book_name(&book_name)?;
        let start_date = parse_date("start_date", &input.start_date)?;
        let available_from = parse_date("available_from", &input.available_from)?;
        let available_to = parse_date("available_to", &input.available_to)?;
        validate_window(available_from, available_to)?;

        let request = BlogRequestRepo::create(
            pool,
            owner_id,
            &CreateBlogRequest {
                book_name,
                start_date,
                available_from,
                available_to,
            },
        )
        .await?;

        tracing::info!(request_id = request.id, owner_id, "Blog request created");
        Ok(request)
    }

    /// Apply a partial update. Only the owner may update.
    ///
    /// Existing claims are kept even if the new window no longer covers them.
    pub async fn update(
        pool: &PgPool,
        caller_id: DbId,
        request_id: DbId,
        input: &UpdateRequestInput,
    ) -> AppResult<BlogRequest> {
        let mut tx = pool.begin().await?;

        let current = BlogRequestRepo::find_by_id_for_update(&mut *tx, request_id)
            .await?
            .ok_or_else(|| request_not_found(request_id))?;
        check_owner(caller_id, &current)?;

        let patch = parse_update(input)?;
        if patch.is_empty() {
            return Err(CoreError::Validation("No fields to update".into()).into());
        }
        validate_window(
            patch.available_from.unwrap_or(current.available_from),
            patch.available_to.unwrap_or(current.available_to),
        )?;

        let updated = BlogRequestRepo::update(&mut *tx, request_id, &patch)
            .await?
            .ok_or_else(|| request_not_found(request_id))?;
        tx.commit().await?;

        tracing::info!(request_id, owner_id = caller_id, "Blog request updated");
        Ok(updated)
    }

    /// Delete a request and cancel all of its claims. Only the owner may delete.
    ///
    /// Returns the number of claims that were cancelled.
    pub async fn delete(pool: &PgPool, caller_id: DbId, request_id: DbId) -> AppResult<u64> {
        let mut tx = pool.begin().await?;

        let current = BlogRequestRepo::find_by_id_for_update(&mut *tx, request_id)
            .await?
            .ok_or_else(|| request_not_found(request_id))?;
        check_owner(caller_id, &current)?;

        let cancelled = ReservationEngine::cancel_all(&mut *tx, request_id).await?;
        BlogRequestRepo::delete(&mut *tx, request_id).await?;
        tx.commit().await?;

        tracing::info!(request_id, owner_id = caller_id, cancelled, "Blog request deleted");
        Ok(cancelled)
    }

    /// Owner's detail view: the request and every claim on it, newest first.
    pub async fn details(pool: &PgPool, caller_id: DbId, request_id: DbId) -> AppResult<RequestDetails> {
        let request = BlogRequestRepo::find_by_id(pool, request_id)
            .await?
            .ok_or_else(|| request_not_found(request_id))?;
        check_owner(caller_id, &request)?;

        let claims = ClaimRepo::list_for_request(pool, request_id).await?;
        Ok(RequestDetails {
            claim_count: claims.len(),
            request,
            claims,
        })
    }

    /// The caller's created requests and the requests they claimed.
    pub async fn mine(pool: &PgPool, caller_id: DbId) -> AppResult<MyRequests> {
        let created = BlogRequestRepo::list_owned(pool, caller_id).await?;
        let accepted = BlogRequestRepo::list_claimed_by(pool, caller_id).await?;
        Ok(MyRequests { created, accepted })
    }

    /// Calendar markers for the caller.
    pub async fn schedule(pool: &PgPool, caller_id: DbId) -> AppResult<Schedule> {
        let promotion_dates = ClaimRepo::claimed_dates_for(pool, caller_id).await?;
        let request_dates = BlogRequestRepo::start_dates_for_owner(pool, caller_id).await?;
        Ok(Schedule {
            promotion_dates,
            request_dates,
        })
    }
}

/// Reject callers other than the request's owner.
fn check_owner(caller_id: DbId, request: &BlogRequest) -> Result<(), CoreError> {
    if request.owner_id != caller_id {
        return Err(CoreError::Forbidden(format!(
            "Only the owner may modify request {}",
            request.id
        )));
    }
    Ok(())
}

/// Parse and validate each supplied field on its own.
fn parse_update(input: &UpdateRequestInput) -> Result<UpdateBlogRequest, CoreError> {
    let book_name = match &input.book_name {
        Some(name) => {
            let name = name.trim().to_string();
            validate_book_name(&name)?;
            Some(name)
        }
        None => None,
    };
    let parse_opt = |field: &str, value: &Option<String>| {
        value.as_deref().map(|v| parse_date(field, v)).transpose()
    };

    Ok(UpdateBlogRequest {
        book_name,
        start_date: parse_opt("start_date", &input.start_date)?,
        available_from: parse_opt("available_from", &input.available_from)?,
        available_to: parse_opt("available_to", &input.available_to)?,
    })
}

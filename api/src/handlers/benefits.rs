//! Benefit handlers
//!
//! Endpoints for creating, listing, activating, deactivating and deleting
//! benefits.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::ListRequest;
use crate::domain::entities::{Benefit, BenefitId, NewBenefit};
use crate::domain::ports::{CountFilter, ListOptions};
use crate::error::{AppError, DomainError};
use crate::AppState;

/// Largest accepted `limit` or `offset`
const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// Query parameters for listing benefits
///
/// Everything arrives as text so that every malformed value can be reported
/// at once instead of failing on the first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBenefitsQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
    pub active_only: Option<String>,
    pub inactive_only: Option<String>,
    /// Substring search on the name
    pub name: Option<String>,
}

impl ListBenefitsQuery {
    /// Validate the raw parameters into a listing request
    pub fn to_request(&self) -> Result<ListRequest, AppError> {
        let mut errors = Vec::new();
        let mut options = ListOptions::default();

        // Storage binds limit and offset as signed 64-bit integers
        if let Some(raw) = &self.limit {
            match raw.trim().parse::<u64>() {
                Ok(limit) if limit > 0 && limit <= MAX_PAGE_VALUE => options.limit = Some(limit),
                _ => errors.push(format!("limit must be a positive integer (got '{}')", raw)),
            }
        }

        if let Some(raw) = &self.offset {
            match raw.trim().parse::<u64>() {
                Ok(offset) if offset <= MAX_PAGE_VALUE => options.offset = Some(offset),
                _ => errors.push(format!(
                    "offset must be a non-negative integer (got '{}')",
                    raw
                )),
            }
        }

        if let Some(raw) = &self.order_by {
            match raw.parse() {
                Ok(field) => options.order_by = field,
                Err(e) => errors.push(e),
            }
        }

        if let Some(raw) = &self.order_direction {
            match raw.parse() {
                Ok(direction) => options.direction = direction,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(AppError::InvalidQuery(errors));
        }

        Ok(ListRequest {
            options,
            active_only: is_true(&self.active_only),
            inactive_only: is_true(&self.inactive_only),
        })
    }

    /// Trimmed search term, if one was given
    pub fn search_term(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Query parameters for counting benefits
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountBenefitsQuery {
    pub is_active: Option<String>,
}

impl CountBenefitsQuery {
    pub fn to_filter(&self) -> CountFilter {
        CountFilter {
            is_active: self.is_active.as_ref().map(|raw| raw == "true"),
        }
    }
}

fn is_true(raw: &Option<String>) -> bool {
    raw.as_deref() == Some("true")
}

/// Request to create a new benefit
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBenefitRequest {
    /// Missing names fall through to the entity's own validation
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl From<CreateBenefitRequest> for NewBenefit {
    fn from(req: CreateBenefitRequest) -> Self {
        NewBenefit {
            name: req.name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

/// Benefit as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitResponse {
    pub id: Option<BenefitId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Benefit> for BenefitResponse {
    fn from(b: Benefit) -> Self {
        BenefitResponse {
            id: b.id,
            name: b.name,
            description: b.description,
            is_active: b.is_active,
            created_at: b.created_at.to_rfc3339(),
            updated_at: b.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub total: u64,
}

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    fn with_message(data: T, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }
}

/// Path ids arrive as text so that "abc" is a 400 like "0" is
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DomainError::InvalidId(raw.to_string()).into())
}

/// GET /api/benefits
///
/// List benefits, optionally filtered by status or searched by name.
pub async fn list_benefits(
    State(state): State<AppState>,
    Query(query): Query<ListBenefitsQuery>,
) -> Result<Json<ApiResponse<Vec<BenefitResponse>>>, AppError> {
    let request = query.to_request()?;

    let benefits = match query.search_term() {
        Some(name) => {
            state
                .benefit_service
                .search(name, &request.options)
                .await?
        }
        None => state.benefit_service.list(&request).await?,
    };

    let data = benefits.into_iter().map(BenefitResponse::from).collect();
    Ok(Json(ApiResponse::ok(data)))
}

/// GET /api/benefits/count
pub async fn count_benefits(
    State(state): State<AppState>,
    Query(query): Query<CountBenefitsQuery>,
) -> Result<Json<ApiResponse<CountResponse>>, AppError> {
    let total = state.benefit_service.count(&query.to_filter()).await?;
    Ok(Json(ApiResponse::ok(CountResponse { total })))
}

/// POST /api/benefits
pub async fn create_benefit(
    State(state): State<AppState>,
    payload: Result<Json<CreateBenefitRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<BenefitResponse>>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let benefit = state.benefit_service.create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            benefit.into(),
            "Benefit created successfully",
        )),
    ))
}

/// PUT /api/benefits/:id/activate
pub async fn activate_benefit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BenefitResponse>>, AppError> {
    let benefit = state.benefit_service.activate(parse_id(&id)?).await?;

    Ok(Json(ApiResponse::with_message(
        benefit.into(),
        "Benefit activated successfully",
    )))
}

/// PUT /api/benefits/:id/deactivate
pub async fn deactivate_benefit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BenefitResponse>>, AppError> {
    let benefit = state.benefit_service.deactivate(parse_id(&id)?).await?;

    Ok(Json(ApiResponse::with_message(
        benefit.into(),
        "Benefit deactivated successfully",
    )))
}

/// DELETE /api/benefits/:id
pub async fn delete_benefit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.benefit_service.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Authority handlers.

use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::dtos::authority::AuthorityResponse;
use crate::middleware::Caller;
use crate::AppState;

/// List all authorities.
///
/// GET /api/authorities
#[utoipa::path(
    get,
    path = "/api/authorities",
    responses(
        (status = 200, description = "All authorities known to the server", body = [AuthorityResponse]),
        (status = 401, description = "Missing or invalid bearer token", body = crate::dtos::ErrorResponse),
        (status = 403, description = "Caller lacks the admin authority", body = crate::dtos::ErrorResponse),
        (status = 503, description = "Authority store unavailable", body = crate::dtos::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authorities"
)]
pub async fn list_authorities(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Result<Json<Vec<AuthorityResponse>>, AppError> {
    let authorities = state.authority_service.list_authorities(&caller).await?;
    Ok(Json(authorities))
}

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
};
use std::collections::HashMap;
use crate::state::AppState;
use std::sync::Arc;

/// The `{garage_id}` path segment, resolved against an existing garage.
pub struct GarageId(pub String);

impl FromRequestParts<Arc<AppState>> for GarageId {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let params: Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;

        let garage_id = params.get("garage_id").ok_or(StatusCode::BAD_REQUEST)?;

        match state.garage_repo.find_by_id(garage_id).await {
            Ok(Some(_)) => Ok(GarageId(garage_id.clone())),
            Ok(None) => Err(StatusCode::NOT_FOUND),
            Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    listing::{self, ListingQuery},
    permissions,
    types::{DisplayMode, User},
};

use super::{
    models::{ErrorResponse, HealthResponse, ListingResponse, RepositoryResponse},
    AppState,
};

/// Header carrying the authenticated username, set by the fronting proxy.
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

#[tracing::instrument(skip_all)]
pub async fn list_repositories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
) -> Response {
    let query = match listing_query(&params, state.listing.mode) {
        Ok(query) => query,
        Err(message) => {
            log::warn!("Rejected listing request: {}", message);
            return bad_request(message);
        }
    };

    let user = match current_user(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let records = match state.storage.list_visible_repositories(user.as_ref()) {
        Ok(records) => records,
        Err(err) => {
            log::error!("Failed to list repositories: {:?}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match listing::build_listing(records, &state.listing, &query) {
        Ok(page) => {
            log::debug!(
                "Serving {} of {} repositories (page {})",
                page.entries.len(),
                page.total,
                page.page
            );
            Json(ListingResponse::from_page(page, user.as_ref(), &state.admin)).into_response()
        }
        Err(err) => {
            log::error!("Failed to build listing: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_repository(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Response {
    let user = match current_user(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.storage.load_repository(&name) {
        Ok(Some(record)) if permissions::can_view(user.as_ref(), &record) => {
            let actions = state.admin.row_actions(user.as_ref(), &record);
            Json(RepositoryResponse::new(&record, actions)).into_response()
        }
        Ok(_) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            log::error!("Failed to load repository {}: {:?}", name, err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
}

/// Unknown usernames are served as anonymous.
fn current_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, Response> {
    let Some(username) = headers
        .get(REMOTE_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };

    match state.storage.load_user(username) {
        Ok(Some(user)) => Ok(Some(user)),
        Ok(None) => {
            log::debug!("Unknown user {}, listing anonymously", username);
            Ok(None)
        }
        Err(err) => {
            log::error!("Failed to load user {}: {:?}", username, err);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
    }
}

/// Grouped listings ignore sort and paging, so only flat mode validates them.
fn listing_query(params: &ListingParams, mode: DisplayMode) -> Result<ListingQuery, String> {
    if mode == DisplayMode::Grouped {
        return Ok(ListingQuery::default());
    }

    let page = parse_count("page", params.page.as_deref())?.unwrap_or(0);
    let page_size = parse_count("pageSize", params.page_size.as_deref())?;
    let ascending = params.order.as_deref().map(parse_order).transpose()?;

    Ok(ListingQuery {
        sort: params.sort.clone(),
        ascending,
        page,
        page_size,
    })
}

fn parse_order(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok(true),
        "desc" => Ok(false),
        _ => Err("invalid order".to_string()),
    }
}

fn parse_count(name: &str, value: Option<&str>) -> Result<Option<usize>, String> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid {name}"))
        })
        .transpose()
}

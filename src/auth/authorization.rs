use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::Session;
use crate::auth::routing::Role;
use crate::db::portfolio as portfolio_db;
use crate::db::profiles as profile_db;
use crate::db::requests as request_db;
use crate::models::{portfolio, profiles, requests};

/// Reject the call unless the session belongs to `id`.
pub fn ensure_self(session: &Session, id: Uuid, action: &str) -> Result<(), HttpResponse> {
    if session.user_id == id {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": format!("You can only {action} your own account"),
        })))
    }
}

/// Load the caller's profile and check it has `role`.
pub async fn require_role(
    db: &DatabaseConnection,
    session: &Session,
    role: Role,
) -> Result<profiles::Model, HttpResponse> {
    let profile = profile_db::get_profile_by_id(db, session.user_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Profile not found. Sign in again to finish setting up your account.",
            }))
        })?;

    match profile.role() {
        Ok(actual) if actual == role => Ok(profile),
        _ => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": format!("Only {role}s can do this"),
        }))),
    }
}

/// Load a portfolio entry owned by the caller.
pub async fn owned_portfolio(
    db: &DatabaseConnection,
    portfolio_id: Uuid,
    user_id: Uuid,
) -> Result<portfolio::Model, HttpResponse> {
    match portfolio_db::get_portfolio_by_id(db, portfolio_id).await {
        Ok(Some(item)) if item.freelancer_id == user_id => Ok(item),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own portfolio items",
        }))),
        Ok(None) => Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Portfolio item {portfolio_id} not found"),
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// Which side of a request the caller must be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestParty {
    Client,
    Freelancer,
}

/// Load a request and check the caller is the expected party to it.
pub async fn request_for_party(
    db: &DatabaseConnection,
    request_id: Uuid,
    user_id: Uuid,
    party: RequestParty,
) -> Result<requests::Model, HttpResponse> {
    let request = request_db::get_request_by_id(db, request_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Request {request_id} not found"),
            }))
        })?;

    let allowed = match party {
        RequestParty::Client => request.client_id == user_id,
        RequestParty::Freelancer => request.freelancer_id == user_id,
    };

    if !allowed {
        let message = match party {
            RequestParty::Client => "Only the client who sent this request can cancel it",
            RequestParty::Freelancer => "Only the freelancer addressed can accept or reject it",
        };
        return Err(HttpResponse::Forbidden().json(serde_json::json!({ "error": message })));
    }

    Ok(request)
}

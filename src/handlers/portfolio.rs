use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{owned_portfolio, require_role};
use crate::auth::middleware::Session;
use crate::auth::routing::Role;
use crate::config::AppConfig;
use crate::db::portfolio as portfolio_db;
use crate::models::portfolio::{CreatePortfolio, NewPortfolioEntry, PortfolioResponse};
use crate::screenshot::ScreenshotService;
use crate::supabase::storage::BlobStore;

/// Capture `project_url` and store the image, returning its public URL.
///
/// Any failure is logged and yields `None`; the entry is saved without a
/// screenshot rather than rejected.
pub async fn capture_screenshot(
    screenshots: &dyn ScreenshotService,
    storage: &dyn BlobStore,
    bucket: &str,
    freelancer_id: Uuid,
    project_url: &str,
) -> Option<String> {
    let bytes = match screenshots.capture(project_url).await {
        Ok(Some(bytes)) if !bytes.is_empty() => bytes,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!("Screenshot of {project_url} failed: {e}");
            return None;
        }
    };

    let object = format!("{freelancer_id}-{}.png", chrono::Utc::now().timestamp_millis());
    match storage.upload(bucket, &object, bytes, "image/png", false).await {
        Ok(()) => Some(storage.public_url(bucket, &object)),
        Err(e) => {
            tracing::warn!("Uploading screenshot {object} failed: {e}");
            None
        }
    }
}

/// Portfolio entries newest first. A failed fetch shows as an empty list.
pub(crate) async fn portfolio_or_empty(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Vec<PortfolioResponse> {
    match portfolio_db::get_portfolios_by_freelancer(db, freelancer_id).await {
        Ok(items) => items.into_iter().map(PortfolioResponse::from).collect(),
        Err(e) => {
            tracing::error!("Failed to fetch portfolio for {freelancer_id}: {e}");
            Vec::new()
        }
    }
}

/// GET /api/portfolios/freelancer/{freelancer_id}: a freelancer's entries, newest first.
pub async fn get_portfolios_by_freelancer(
    _session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let freelancer_id = path.into_inner();
    HttpResponse::Ok().json(portfolio_or_empty(db.get_ref(), freelancer_id).await)
}

/// POST /api/portfolios: add a project to the caller's portfolio.
pub async fn create_portfolio(
    session: Session,
    db: web::Data<DatabaseConnection>,
    screenshots: web::Data<Arc<dyn ScreenshotService>>,
    storage: web::Data<Arc<dyn BlobStore>>,
    config: web::Data<AppConfig>,
    body: web::Json<CreatePortfolio>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(message) = input.validate() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": message,
        }));
    }

    let freelancer = match require_role(db.get_ref(), &session, Role::Freelancer).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let project_url = input.project_url.trim().to_string();
    let screenshot_url = capture_screenshot(
        screenshots.get_ref().as_ref(),
        storage.get_ref().as_ref(),
        &config.portfolio_bucket,
        freelancer.id,
        &project_url,
    )
    .await;

    let entry = NewPortfolioEntry {
        freelancer_id: freelancer.id,
        project_name: input.project_name.trim().to_string(),
        project_url,
        project_description: input.project_description.trim().to_string(),
        screenshot_url,
    };

    match portfolio_db::insert_portfolio(db.get_ref(), entry).await {
        Ok(item) => {
            tracing::info!("Portfolio item {} added for {}", item.id, item.freelancer_id);
            HttpResponse::Created().json(PortfolioResponse::from(item))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create portfolio item: {e}"),
        })),
    }
}

/// DELETE /api/portfolios/{id}: remove one of the caller's entries.
pub async fn delete_portfolio(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(resp) = owned_portfolio(db.get_ref(), id, session.user_id).await {
        return resp;
    }

    match portfolio_db::delete_portfolio(db.get_ref(), id).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Portfolio item deleted",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete portfolio item: {e}"),
        })),
    }
}

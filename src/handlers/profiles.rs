use actix_web::{HttpRequest, HttpResponse, Responder, http::header, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::ensure_self;
use crate::auth::middleware::Session;
use crate::auth::routing::Role;
use crate::config::AppConfig;
use crate::db::profiles as profile_db;
use crate::models::profiles::{ProfileResponse, UpdateProfile};
use crate::supabase::storage::BlobStore;

/// File extension for the image types a profile picture may have.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// GET /api/profiles/{id}: a single profile (requires authentication).
pub async fn get_profile(
    _session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match profile_db::get_profile_by_id(db.get_ref(), id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/profiles/{id}: edit name, e-mail, country, description and,
/// for freelancers, the rate.
pub async fn update_profile(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProfile>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(resp) = ensure_self(&session, id, "edit") {
        return resp;
    }

    let input = body.into_inner();
    if let Err(msg) = input.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }));
    }

    if input.rate.is_some() {
        let profile = match profile_db::get_profile_by_id(db.get_ref(), id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Profile {id} not found"),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };
        if profile.role() != Ok(Role::Freelancer) {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Only freelancers have an hourly rate",
            }));
        }
    }

    match profile_db::update_profile(db.get_ref(), id, input).await {
        Ok(profile) => {
            tracing::info!("Profile {id} updated");
            HttpResponse::Ok().json(ProfileResponse::from(profile))
        }
        Err(DbErr::RecordNotFound(_)) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update profile: {e}"),
        })),
    }
}

/// PUT /api/profiles/{id}/image: replace the profile picture with the raw
/// image in the request body.
pub async fn upload_profile_image(
    session: Session,
    req: HttpRequest,
    db: web::Data<DatabaseConnection>,
    storage: web::Data<Arc<dyn BlobStore>>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(resp) = ensure_self(&session, id, "change the picture of") {
        return resp;
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let Some(ext) = image_extension(content_type) else {
        return HttpResponse::UnsupportedMediaType().json(serde_json::json!({
            "error": "Profile pictures must be PNG, JPEG, WebP or GIF",
        }));
    };
    if body.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Image body is empty",
        }));
    }

    let bucket = &config.profile_image_bucket;
    let object = format!("{id}-{}.{ext}", chrono::Utc::now().timestamp_millis());
    if let Err(e) = storage
        .upload(bucket, &object, body.to_vec(), content_type, true)
        .await
    {
        tracing::error!("Profile image upload for {id} failed: {e}");
        return HttpResponse::BadGateway().json(serde_json::json!({
            "error": format!("Failed to upload image: {e}"),
        }));
    }

    let public_url = storage.public_url(bucket, &object);
    match profile_db::set_profile_image(db.get_ref(), id, public_url).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Err(DbErr::RecordNotFound(_)) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to save profile image: {e}"),
        })),
    }
}

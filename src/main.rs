use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use freelink_backend::auth::jwks::JwksCache;
use freelink_backend::auth::jwt::TokenVerifier;
use freelink_backend::config::AppConfig;
use freelink_backend::create_pool;
use freelink_backend::handlers;
use freelink_backend::screenshot::{ApiFlash, ScreenshotService};
use freelink_backend::supabase::auth::{AuthProvider, SupabaseAuth};
use freelink_backend::supabase::storage::{BlobStore, SupabaseStorage};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Largest profile picture accepted in one upload.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let db = create_pool(&config.database_url, config.run_migrations)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to connect to database: {e}")))?;
    let db_data = web::Data::new(db);
    tracing::info!("Connected to database");

    let verifier = match &config.jwt_secret {
        Some(secret) => TokenVerifier::Secret(secret.clone()),
        None => TokenVerifier::Jwks(JwksCache::new(
            &config.supabase_url,
            &config.supabase_anon_key,
        )),
    };
    let verifier_data = web::Data::new(verifier);

    let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    ));
    let storage: Arc<dyn BlobStore> = Arc::new(SupabaseStorage::new(
        &config.supabase_url,
        &config.supabase_service_key,
    ));
    let screenshots: Arc<dyn ScreenshotService> = Arc::new(ApiFlash::new(
        &config.screenshot_endpoint,
        config.screenshot_access_key.clone(),
    ));
    if config.screenshot_access_key.is_none() {
        tracing::warn!("SCREENSHOT_ACCESS_KEY not set; portfolio entries will have no screenshot");
    }

    let auth_data = web::Data::new(auth);
    let storage_data = web::Data::new(storage);
    let screenshot_data = web::Data::new(screenshots);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let config_data = web::Data::new(config);
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::PayloadConfig::new(MAX_IMAGE_BYTES))
            .app_data(db_data.clone())
            .app_data(verifier_data.clone())
            .app_data(auth_data.clone())
            .app_data(storage_data.clone())
            .app_data(screenshot_data.clone())
            .app_data(config_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}

//! Portfolio entries and the screenshot pipeline.
mod common;

use uuid::Uuid;

use common::{FakeScreenshots, FakeStorage, portfolio_item};
use freelink_backend::handlers::portfolio::capture_screenshot;
use freelink_backend::models::portfolio::{
    CreatePortfolio, PLACEHOLDER_SCREENSHOT, PortfolioResponse,
};

const BUCKET: &str = "portfolio-screenshots";

#[tokio::test]
async fn test_captured_screenshot_is_uploaded_and_linked() {
    let freelancer = Uuid::new_v4();
    let screenshots = FakeScreenshots::Image(vec![0x89, b'P', b'N', b'G']);
    let storage = FakeStorage::default();

    let url = capture_screenshot(
        &screenshots,
        &storage,
        BUCKET,
        freelancer,
        "https://bakery.example.com",
    )
    .await
    .expect("screenshot URL");

    let uploads = storage.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    let (bucket, path, size, content_type, upsert) = &uploads[0];
    assert_eq!(bucket, BUCKET);
    assert!(path.starts_with(&format!("{freelancer}-")));
    assert!(path.ends_with(".png"));
    assert_eq!(*size, 4);
    assert_eq!(content_type, "image/png");
    assert!(!upsert);
    assert_eq!(url, format!("https://storage.example.com/public/{BUCKET}/{path}"));
}

#[tokio::test]
async fn test_capture_failure_leaves_entry_without_screenshot() {
    let storage = FakeStorage::default();

    let url = capture_screenshot(
        &FakeScreenshots::Failing,
        &storage,
        BUCKET,
        Uuid::new_v4(),
        "https://bakery.example.com",
    )
    .await;

    assert_eq!(url, None);
    assert!(storage.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_capture_skips_upload() {
    let storage = FakeStorage::default();

    let url = capture_screenshot(
        &FakeScreenshots::Disabled,
        &storage,
        BUCKET,
        Uuid::new_v4(),
        "https://bakery.example.com",
    )
    .await;

    assert_eq!(url, None);
    assert!(storage.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_failure_leaves_entry_without_screenshot() {
    let storage = FakeStorage {
        fail: true,
        ..Default::default()
    };

    let url = capture_screenshot(
        &FakeScreenshots::Image(vec![1, 2, 3]),
        &storage,
        BUCKET,
        Uuid::new_v4(),
        "https://bakery.example.com",
    )
    .await;

    assert_eq!(url, None);
}

#[test]
fn test_missing_screenshot_shows_placeholder() {
    let item = portfolio_item(Uuid::new_v4(), None);
    let response = PortfolioResponse::from(item);

    assert_eq!(response.screenshot_url, None);
    assert_eq!(response.image, PLACEHOLDER_SCREENSHOT);

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["screenshot_url"].is_null());
}

#[test]
fn test_stored_screenshot_is_used_as_image() {
    let item = portfolio_item(Uuid::new_v4(), Some("https://cdn.example.com/shot.png"));
    let response = PortfolioResponse::from(item);
    assert_eq!(response.image, "https://cdn.example.com/shot.png");
}

#[test]
fn test_portfolio_input_validation() {
    let valid = CreatePortfolio {
        project_name: "Bakery site".to_string(),
        project_url: "https://bakery.example.com".to_string(),
        project_description: "Landing page".to_string(),
    };
    assert!(valid.validate().is_ok());

    let no_scheme = CreatePortfolio {
        project_url: "bakery.example.com".to_string(),
        ..valid.clone()
    };
    assert!(no_scheme.validate().is_err());

    let no_name = CreatePortfolio {
        project_name: String::new(),
        ..valid
    };
    assert_eq!(no_name.validate().unwrap_err(), "Project name is required");
}

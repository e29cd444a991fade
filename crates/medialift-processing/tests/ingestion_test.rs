mod helpers;

use helpers::fixtures::{sample_pdf, sample_pdf_base64, temp_file, text_file};
use helpers::{cdn_config, setup_uploader, DEFAULT_BUCKET};
use medialift_core::{CdnConfig, Visibility};
use medialift_processing::{MediaError, MediaValue, UploadOptions, UrlOverrides};
use medialift_storage::{StorageError, StoredObject};

fn stored_pdf(visibility: Visibility) -> StoredObject {
    StoredObject {
        data: sample_pdf(),
        content_type: "application/pdf".to_string(),
        visibility,
    }
}

#[tokio::test]
async fn test_upload_base64_uses_default_cdn() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let url = app
        .uploader
        .upload_base64("file_key", &sample_pdf_base64(), Visibility::Public)
        .await
        .unwrap();

    assert_eq!(url, "http://media.example.com/file_key.pdf");
    assert_eq!(app.storage.get("file_key.pdf"), Some(stored_pdf(Visibility::Public)));
}

#[tokio::test]
async fn test_upload_base64_rejects_garbage() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_base64("file_key", "garbage", Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidBase64Media));
    assert_eq!(err.to_string(), "The base64 encoded string is not a valid image.");
    assert!(app.storage.keys().is_empty());
}

#[tokio::test]
async fn test_upload_base64_rejects_non_media_content() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_base64("file_key", "aGVsbG8gd29ybGQ=", Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidBase64Media));
}

#[tokio::test]
async fn test_upload_file_uses_default_cdn() {
    let app = setup_uploader(cdn_config("default_cdn1"));
    let pdf = temp_file(&sample_pdf());

    let url = app
        .uploader
        .upload_file("file_key", pdf.path(), Visibility::Public)
        .await
        .unwrap();

    assert_eq!(url, "http://media.example.com/file_key.pdf");
    assert_eq!(app.storage.get("file_key.pdf"), Some(stored_pdf(Visibility::Public)));
}

#[tokio::test]
async fn test_upload_file_rejects_text_file() {
    let app = setup_uploader(cdn_config("default_cdn1"));
    let text = text_file();

    let err = app
        .uploader
        .upload_file("file_key", text.path(), Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidMediaFile));
    assert_eq!(
        err.to_string(),
        "The file could not be processed. It is not a valid media file."
    );
}

#[tokio::test]
async fn test_upload_file_rejects_raw_content() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_file("file_key", sample_pdf(), Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidMediaFile));
    assert!(app.storage.keys().is_empty());
}

#[tokio::test]
async fn test_upload_file_rejects_missing_file() {
    let app = setup_uploader(cdn_config("default_cdn1"));
    let dir = tempfile::tempdir().unwrap();

    let err = app
        .uploader
        .upload_file("file_key", dir.path().join("gone.pdf"), Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidMediaFile));
}

#[tokio::test]
async fn test_upload_media_dispatches_every_representation() {
    let pdf = temp_file(&sample_pdf());
    let values = [
        MediaValue::from(pdf.path()),
        MediaValue::from(sample_pdf_base64()),
        MediaValue::from(sample_pdf()),
    ];

    for value in values {
        let app = setup_uploader(cdn_config("default_cdn1"));

        let url = app
            .uploader
            .upload_media("file_key", value, Visibility::Public)
            .await
            .unwrap();

        assert_eq!(url, "http://media.example.com/file_key.pdf");
        assert_eq!(app.storage.get("file_key.pdf"), Some(stored_pdf(Visibility::Public)));
    }
}

#[tokio::test]
async fn test_upload_media_with_custom_cdn() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let url = app
        .uploader
        .upload_media(
            "file_key",
            sample_pdf_base64(),
            UploadOptions::public().with_cdn("http://customcdn.com"),
        )
        .await
        .unwrap();

    assert_eq!(url, "http://customcdn.com/file_key.pdf");
}

#[tokio::test]
async fn test_upload_without_registered_default_cdn_returns_raw_url() {
    let app = setup_uploader(cdn_config("doesnt_exist"));

    let url = app
        .uploader
        .upload_media("file_key", sample_pdf(), Visibility::Public)
        .await
        .unwrap();

    assert_eq!(url, "http://s3.com/file_key.pdf");
}

#[tokio::test]
async fn test_upload_without_any_cdn_returns_raw_url() {
    let app = setup_uploader(CdnConfig::new());

    let url = app
        .uploader
        .upload_stream("file_key", sample_pdf(), Visibility::Private)
        .await
        .unwrap();

    assert_eq!(url, "http://s3.com/file_key.pdf");
    assert_eq!(app.storage.get("file_key.pdf"), Some(stored_pdf(Visibility::Private)));
}

#[tokio::test]
async fn test_upload_media_rejects_garbage_text_as_stream() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_media("file_key", "garbage", Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidMediaFile));
}

#[tokio::test]
async fn test_backend_rejection_is_returned_unchanged() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_media("/abs", sample_pdf_base64(), Visibility::Public)
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::Storage(StorageError::InvalidKey(_))));
    assert!(!err.is_invalid_input());
    assert!(app.storage.keys().is_empty());
}

#[tokio::test]
async fn test_upload_with_scheme_less_cdn_override_is_rejected() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let err = app
        .uploader
        .upload_media(
            "file_key",
            sample_pdf_base64(),
            UploadOptions::public().with_cdn("customcdn.com"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, MediaError::InvalidUrl { .. }));
    assert!(app.storage.keys().is_empty());
}

#[tokio::test]
async fn test_generated_keys_flow_through_upload() {
    let app = setup_uploader(cdn_config("default_cdn1"));
    let key = app.uploader.generate_key("images/profile_pictures/");

    let url = app
        .uploader
        .upload_media(key.as_str(), sample_pdf_base64(), Visibility::Public)
        .await
        .unwrap();

    assert!(key.starts_with("images/profile_pictures/"));
    assert_eq!(url, format!("http://media.example.com/{}.pdf", key));
    assert!(app.storage.get(&format!("{}.pdf", key)).is_some());
}

#[test]
fn test_raw_url_with_default_and_custom_bucket() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    assert_eq!(
        app.uploader.raw_url("file_key.pdf", None).unwrap(),
        "http://s3.com/file_key.pdf"
    );
    assert_eq!(
        app.uploader
            .raw_url("file_key.pdf", Some("not_config_bucket"))
            .unwrap(),
        "http://s3.com/file_key.pdf"
    );

    assert_eq!(
        app.storage.resolved(),
        vec![
            (DEFAULT_BUCKET.to_string(), "file_key.pdf".to_string()),
            ("not_config_bucket".to_string(), "file_key.pdf".to_string()),
        ]
    );
}

#[test]
fn test_media_url_with_custom_bucket_keeps_default_cdn() {
    let app = setup_uploader(cdn_config("default_cdn1"));

    let url = app
        .uploader
        .media_url("file_key.pdf", &UrlOverrides::new().with_bucket("custom_bucket"))
        .unwrap();

    assert_eq!(url, "http://media.example.com/file_key.pdf");
    assert_eq!(
        app.storage.resolved(),
        vec![("custom_bucket".to_string(), "file_key.pdf".to_string())]
    );
}

//! Integration test for the process-wide default renderer
//!
//! Kept in its own test binary since it mutates global state.

use axum::http::StatusCode;
use minijinja::context;
use std::path::PathBuf;
use trellis::{RenderError, RenderOptions};

#[tokio::test]
async fn test_default_renderer_lifecycle() {
    // Before init every entry point reports the missing renderer
    assert!(matches!(
        trellis::html("base/hello", context! {}),
        Err(RenderError::NotInitialized)
    ));
    assert!(matches!(trellis::copy(), Err(RenderError::NotInitialized)));
    assert_eq!(
        trellis::write_html(StatusCode::OK, "base/hello", context! {}).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    // A failed init leaves nothing installed
    let broken = tempfile::tempdir().unwrap();
    std::fs::write(broken.path().join("broken.html.tmpl"), "{% if %}").unwrap();
    assert!(trellis::init(RenderOptions::new().with_directory(broken.path())).is_err());
    assert!(matches!(
        trellis::default_renderer(),
        Err(RenderError::NotInitialized)
    ));

    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    trellis::init(
        RenderOptions::new()
            .with_directory(&fixtures)
            .with_layout("base/layout"),
    )
    .unwrap();

    assert_eq!(
        trellis::html("base/hello", context! { name => "world" }).unwrap(),
        "head\n<div>Hello world</div>\nfoot"
    );
    assert_eq!(
        trellis::js("scripts/alert", context! { message => "hi" }).unwrap(),
        r#"alert("hi");"#
    );

    let response = trellis::write_js(StatusCode::ACCEPTED, "scripts/alert", context! { message => "hi" });
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], br#"alert("hi");"#);

    // Init again replaces the renderer
    trellis::init(RenderOptions::new().with_directory(&fixtures)).unwrap();
    assert_eq!(
        trellis::html("base/hello", context! { name => "again" }).unwrap(),
        "<div>Hello again</div>"
    );
}

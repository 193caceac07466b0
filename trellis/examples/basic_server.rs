//! Basic trellis server example
//!
//! Demonstrates:
//! - Configuration loading
//! - Observability initialization
//! - A `Renderer` shared as application state
//! - `TemplateCopy` as a per-request extractor
//!
//! Run from the `trellis` directory with: `cargo run --example basic_server`

use axum::{extract::State, http::StatusCode, response::Response, routing::get, Router};
use minijinja::context;
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use trellis::{observability, RenderOptions, Renderer, TemplateCopy};

#[derive(Clone)]
struct AppState {
    renderer: Renderer,
    visits: Arc<AtomicU64>,
}

impl axum::extract::FromRef<AppState> for Renderer {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}

#[derive(Serialize)]
struct Post {
    title: &'static str,
    author: &'static str,
}

const POSTS: &[Post] = &[
    Post {
        title: "Layouts without inheritance",
        author: "ada",
    },
    Post {
        title: "Partials everywhere",
        author: "grace",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize observability (logging, tracing)
    observability::init()?;

    let options = RenderOptions::load()?;
    let options = if options.layout.is_none() {
        options.with_layout("layouts/application")
    } else {
        options
    };

    let renderer = Renderer::new(options)?;
    tracing::info!(
        templates = renderer.template_names().len(),
        hot_reload = renderer.options().hot_reload,
        "Templates compiled"
    );

    let app = Router::new()
        .route("/", get(home))
        .route("/posts", get(posts))
        .route("/posts.js", get(posts_js))
        .with_state(AppState {
            renderer,
            visits: Arc::new(AtomicU64::new(0)),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server listening on http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn home(State(state): State<AppState>, mut templates: TemplateCopy) -> Response {
    let visits = state.visits.fetch_add(1, Ordering::Relaxed) + 1;
    templates.write_html(
        StatusCode::OK,
        "home",
        context! { title => "Home", active => "home", visits },
    )
}

async fn posts(mut templates: TemplateCopy) -> Response {
    templates.write_html(
        StatusCode::OK,
        "posts/index",
        context! { title => "Posts", active => "posts", posts => POSTS },
    )
}

async fn posts_js(mut templates: TemplateCopy) -> Response {
    templates.write_js(StatusCode::OK, "posts/index", context! { posts => POSTS })
}

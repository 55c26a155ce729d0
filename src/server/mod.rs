//! Portal HTTP server
//!
//! Renders the portal live. The content store is re-read from disk on every
//! request, so edits to the content directory show up on the next reload
//! without any cache invalidation.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content::search;
use crate::markdown::{extract_headings, MarkdownRenderer};
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::toc;
use crate::Portal;

/// Server state shared across handlers
struct ServerState {
    portal: Portal,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

/// Query parameters for the listing page
#[derive(Deserialize)]
struct ListingQuery {
    q: Option<String>,
}

/// Start the portal server
pub async fn start(portal: &Portal, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        portal: portal.clone(),
        templates: TemplateRenderer::new()?,
        markdown: MarkdownRenderer::with_options(
            &portal.config.highlight.theme,
            portal.config.highlight.enable,
        ),
    });

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/article/:slug", get(article_handler))
        .route("/search.json", get(search_index_handler))
        .route("/assets/style.css", get(stylesheet_handler))
        .nest_service("/static", ServeDir::new(&portal.static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Portal running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Listing page, optionally filtered by ?q=
async fn index_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<ListingQuery>,
) -> Response {
    let query = params.q.unwrap_or_default();

    let result = state.portal.store().index().and_then(|index| {
        let filtered = search::filter(&query, &index);
        state
            .templates
            .render_index(&state.portal.config, &filtered, &query)
    });

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

/// Article page with table of contents
async fn article_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let article = match state.portal.store().find(&slug) {
        Ok(Some(article)) => article,
        Ok(None) => return not_found(&state, &slug),
        Err(e) => return server_error(e),
    };

    let result = state.markdown.render(&article.body).and_then(|content| {
        let headings = extract_headings(&article.body);
        let entries = toc::entries(&headings);
        state
            .templates
            .render_article(&state.portal.config, &article, &content, &entries)
    });

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => server_error(e),
    }
}

/// Metadata index as JSON (bodies excluded)
async fn search_index_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.portal.store().index() {
        Ok(index) => Json(index).into_response(),
        Err(e) => server_error(e),
    }
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// Unknown routes render the not-found state
async fn fallback_handler(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    let slug = uri.path().trim_matches('/');
    not_found(&state, slug)
}

fn not_found(state: &ServerState, slug: &str) -> Response {
    match state.templates.render_not_found(&state.portal.config, slug) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => server_error(e),
    }
}

fn server_error(e: anyhow::Error) -> Response {
    tracing::error!("Request failed: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Internal error: {}", e),
    )
        .into_response()
}

/// Open the URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(target_os = "linux")]
    let cmd = "xdg-open";
    #[cfg(target_os = "windows")]
    let cmd = "explorer";

    std::process::Command::new(cmd).arg(url).spawn()?;
    Ok(())
}

//! Development server
//!
//! Blog pages are rendered on every request straight from the posts
//! directory, so edits show up on the next reload without regenerating.

use anyhow::{bail, Result};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::{Generator, POST_INDEX_FILE};
use crate::Site;

/// Server state
struct ServerState {
    generator: Generator,
}

/// Build the router for a site
pub fn router(site: &Site) -> Result<Router> {
    let blog = site.config.blog_segment();
    if blog.is_empty() {
        bail!("blog_dir must not be empty");
    }

    let state = Arc::new(ServerState {
        generator: Generator::new(site)?,
    });

    let blog = format!("/{}", blog);
    Ok(Router::new()
        .route("/", get(index_handler))
        .route(&blog, get(index_handler))
        .route(&format!("{}/", blog), get(index_handler))
        .route(&format!("{}/{}", blog, POST_INDEX_FILE), get(post_index_handler))
        .route(&format!("{}/:slug", blog), get(post_handler))
        .route(&format!("{}/:slug/", blog), get(post_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the development server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Posts are read from {:?} on every request.", site.posts_dir);
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

/// Post listing
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    render_page(state, |generator| {
        let posts = generator.repository().list_summaries();
        Ok((StatusCode::OK, generator.render_index(&posts)?))
    })
    .await
}

/// Single post, or the not-found page
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    render_page(state, move |generator| {
        match generator.repository().get_post(&slug) {
            Some(post) => Ok((StatusCode::OK, generator.render_post(&post)?)),
            None => Ok((StatusCode::NOT_FOUND, generator.render_not_found()?)),
        }
    })
    .await
}

/// Summaries as JSON
async fn post_index_handler(State(state): State<Arc<ServerState>>) -> Response {
    let result =
        tokio::task::spawn_blocking(move || state.generator.repository().list_summaries()).await;

    match result {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => {
            tracing::error!("Listing task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serve static assets, falling back to the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.generator.site().static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        Ok(_) => {
            render_page(state, |generator| {
                Ok((StatusCode::NOT_FOUND, generator.render_not_found()?))
            })
            .await
        }
        Err(e) => {
            tracing::error!("Static file error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Run a blocking render off the async runtime
async fn render_page<F>(state: Arc<ServerState>, render: F) -> Response
where
    F: FnOnce(&Generator) -> Result<(StatusCode, String)> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || render(&state.generator)).await;

    match result {
        Ok(Ok((status, html))) => (status, Html(html)).into_response(),
        Ok(Err(e)) => {
            tracing::error!("Render failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render failed").into_response()
        }
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("hello-world.mdx"),
            "---\ntitle: \"Hello World\"\ndate: \"2024-03-01\"\nexcerpt: \"first post\"\ntags: [\"intro\"]\n---\nHi there.\n",
        )
        .unwrap();
        (tmp, site)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_posts() {
        let (_tmp, site) = site();
        let (status, body) = get(router(&site).unwrap(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Hello World"));
    }

    #[tokio::test]
    async fn test_post_page() {
        let (_tmp, site) = site();
        let (status, body) = get(router(&site).unwrap(), "/blog/hello-world/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<p>Hi there.</p>"));
    }

    #[tokio::test]
    async fn test_missing_post_is_404_page() {
        let (_tmp, site) = site();
        let (status, body) = get(router(&site).unwrap(), "/blog/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post Not Found"));
    }

    #[tokio::test]
    async fn test_traversal_slug_is_404() {
        let (_tmp, site) = site();
        let (status, _) = get(router(&site).unwrap(), "/blog/..%2F_config").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_index_json() {
        let (_tmp, site) = site();
        let (status, body) = get(router(&site).unwrap(), "/blog/index.json").await;
        assert_eq!(status, StatusCode::OK);

        let posts: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(posts[0]["slug"], "hello-world");
        assert!(posts[0].get("body").is_none());
    }

    #[tokio::test]
    async fn test_post_index_not_shadowed_by_post() {
        let (_tmp, site) = site();
        fs::write(
            site.posts_dir.join("index.json.md"),
            "---\ntitle: Clash\ndate: \"2025-01-01\"\n---\nclash\n",
        )
        .unwrap();

        let (status, body) = get(router(&site).unwrap(), "/blog/index.json").await;
        assert_eq!(status, StatusCode::OK);
        let posts: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(posts.as_array().unwrap().len(), 1);
        assert_eq!(posts[0]["slug"], "hello-world");
    }

    #[tokio::test]
    async fn test_pages_reflect_new_posts_without_restart() {
        let (_tmp, site) = site();
        let app = router(&site).unwrap();

        fs::write(
            site.posts_dir.join("later.md"),
            "---\ntitle: Later\ndate: \"2025-01-01\"\n---\nlater\n",
        )
        .unwrap();

        let (status, body) = get(app, "/blog/later").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Later"));
    }

    #[tokio::test]
    async fn test_static_assets_and_unknown_paths() {
        let (_tmp, site) = site();
        fs::create_dir_all(&site.static_dir).unwrap();
        fs::write(site.static_dir.join("robots.txt"), "User-agent: *").unwrap();

        let (status, body) = get(router(&site).unwrap(), "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User-agent: *");

        let (status, body) = get(router(&site).unwrap(), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post Not Found"));
    }

    #[test]
    fn test_empty_blog_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut site = Site::new(tmp.path()).unwrap();
        site.config.blog_dir = "/".to_string();
        assert!(router(&site).is_err());
    }
}

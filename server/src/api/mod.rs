//! REST APIハンドラー
//!
//! 認証、プロフィール、ノートCRUD、静的フロントエンド配信

pub mod auth;
pub mod notes;
pub mod profile;

use crate::AppState;
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use include_dir::{include_dir, Dir, File};
use mime_guess::MimeGuess;
use tower_http::cors::{Any, CorsLayer};

static FRONTEND_ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/web/static");
const FRONTEND_INDEX: &str = "index.html";

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    // JWT認証が必要な保護されたルート
    let protected_routes = Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/api/notes",
            post(notes::create_note).get(notes::list_notes),
        )
        .route(
            "/api/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .layer(middleware::from_fn_with_state(
            state.jwt_secret.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        // 認証エンドポイント（認証不要）
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        // 保護されたルート
        .merge(protected_routes)
        // アップロード済みアバター画像
        .route("/uploads/*path", get(serve_upload))
        // 埋め込みフロントエンド
        .route("/", get(serve_index))
        .route("/*path", get(serve_asset))
        .layer(cors)
        .with_state(state)
}

async fn serve_index() -> Response {
    embedded_asset_response(FRONTEND_INDEX)
}

async fn serve_asset(AxumPath(request_path): AxumPath<String>) -> Response {
    match normalize_asset_path(&request_path) {
        Some(path) => embedded_asset_response(&path),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// アップロードディレクトリ内のファイルを配信する
async fn serve_upload(
    State(state): State<AppState>,
    AxumPath(request_path): AxumPath<String>,
) -> Response {
    let relative = match normalize_upload_path(&request_path) {
        Some(path) => path,
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let full_path = state.uploads_dir.join(&relative);
    match tokio::fs::read(&full_path).await {
        Ok(bytes) => {
            let mime = MimeGuess::from_path(&full_path)
                .first_or_octet_stream()
                .to_string();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime)
                .body(Body::from(bytes))
                .expect("failed to build upload response")
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

fn embedded_asset_response(path: &str) -> Response {
    match FRONTEND_ASSETS.get_file(path) {
        Some(file) => file_response(file),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn file_response(file: &File<'_>) -> Response {
    let mime = MimeGuess::from_path(file.path())
        .first_or_octet_stream()
        .to_string();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .body(Body::from(file.contents().to_vec()))
        .expect("failed to build embedded asset response")
}

fn normalize_asset_path(request_path: &str) -> Option<String> {
    let trimmed = request_path.trim_matches('/');
    if trimmed.is_empty() {
        return Some(FRONTEND_INDEX.to_string());
    }
    if trimmed.contains("..") || trimmed.contains('\\') {
        return None;
    }
    Some(trimmed.to_string())
}

fn normalize_upload_path(request_path: &str) -> Option<String> {
    let trimmed = request_path.trim_matches('/');
    if trimmed.is_empty() || trimmed.contains("..") || trimmed.contains('\\') {
        return None;
    }
    Some(trimmed.to_string())
}

//! Notes App Server Entry Point

use notes_server::{api, config::ServerConfig, db, jwt_secret, logging, AppState};
use tracing::info;

#[tokio::main]
async fn main() {
    logging::init().expect("failed to initialize logging");

    let config = ServerConfig::from_env().expect("Failed to load server configuration");
    run_server(config).await;
}

async fn run_server(config: ServerConfig) {
    info!("Notes App Server v{}", env!("CARGO_PKG_VERSION"));

    // データベース接続プールを作成してマイグレーションを実行
    let db_pool = db::migrations::initialize_database(&config.database_url)
        .await
        .expect("Failed to initialize database");
    info!("Database initialized successfully");

    // JWT秘密鍵を取得または生成（値自体は決してログに出さない）
    let jwt_secret = jwt_secret::get_or_create_jwt_secret().expect("Failed to load JWT secret");
    info!("Authentication system initialized");

    let uploads_dir = config.uploads_dir();
    std::fs::create_dir_all(&uploads_dir).expect("Failed to create uploads directory");
    info!("Uploads directory: {}", uploads_dir.display());

    let state = AppState {
        db_pool,
        jwt_secret,
        uploads_dir,
    };

    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Notes server listening on {}", bind_addr);

    axum::serve(listener, router).await.expect("Server error");
}

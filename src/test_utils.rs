#[cfg(test)]
pub mod test_utils {
    use crate::config::AppConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use crate::transfer::session::LoginResponse;
    use axum::http::{HeaderValue, StatusCode};
    use axum::Router;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use serde_json::{json, Value};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_PASSWORD: &str = "correct horse battery staple";

    /// Lowest cost bcrypt accepts
    pub const TEST_HASH_COST: u32 = 4;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Configuration for tests: cheap password hashing, short fixed secret
    pub fn test_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: "test-secret".to_string(),
            password_hash_cost: TEST_HASH_COST,
            ..AppConfig::default()
        }
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        AppState::new(db, &test_config())
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let state = setup_test_app_state().await;
        setup_test_app_with_state(state)
    }

    /// Create axum app over an existing state, so tests can inspect the database
    pub fn setup_test_app_with_state(state: AppState) -> Router {
        let _ = init_test_tracing();
        create_router(state)
    }

    pub async fn setup_test_server() -> TestServer {
        TestServer::new(setup_test_app().await).unwrap()
    }

    /// Value for an `Authorization` header carrying `token` as a bearer token
    pub fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }

    /// Register `email` with [`TEST_PASSWORD`] and return the created user
    pub async fn register_user(server: &TestServer, email: &str) -> Value {
        let response = server
            .post("/api/v1/register")
            .json(&json!({
                "email": email,
                "password": TEST_PASSWORD,
                "password2": TEST_PASSWORD,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn login(server: &TestServer, email: &str, password: &str) -> LoginResponse {
        let response = server
            .post("/api/v1/login")
            .json(&json!({ "email": email, "password": password }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Register and log in `email`, returning the token pair
    pub async fn register_and_login(server: &TestServer, email: &str) -> LoginResponse {
        register_user(server, email).await;
        login(server, email, TEST_PASSWORD).await
    }
}

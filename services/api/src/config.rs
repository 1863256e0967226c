/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8080). Env var: `API_PORT`.
    pub api_port: u16,
    /// HS256 signing secret for access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Access-token lifetime in hours (default 1). Env var: `TOKEN_EXPIRE_HOURS`.
    pub token_expire_hours: i64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            token_expire_hours: std::env::var("TOKEN_EXPIRE_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

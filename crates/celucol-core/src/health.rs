use axum::http::StatusCode;

/// `GET /healthz`: answers while the process can serve requests.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` for services that only talk to remote HTTP APIs.
///
/// A service with a database mounts its own probe that pings the pool.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

// 只记录这么多字节的错误响应体
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// 记录所有 5xx 响应的请求路径和响应体
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    // 响应体会被重新构建
    parts.headers.remove(header::CONTENT_LENGTH);

    match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => {
            error!(
                "Server error occurred - {} {} Status: {}, Body: {}",
                method,
                uri,
                parts.status,
                String::from_utf8_lossy(&bytes)
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            error!(
                "Server error occurred - {} {} Status: {}, body unreadable: {}",
                method, uri, parts.status, e
            );
            Response::from_parts(parts, Body::empty())
        }
    }
}

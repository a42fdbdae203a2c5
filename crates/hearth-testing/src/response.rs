use axum::body::to_bytes;
use axum::response::Response;

/// Collect a response body and parse it as JSON.
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

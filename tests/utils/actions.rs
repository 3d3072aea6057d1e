use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

/// Builds one submission entry in the client wire format
pub fn match_entry(name: &str, is_win: bool, stat_points: [i64; 3], skills: &[i64]) -> Value {
    json!({
        "player_name": name,
        "is_win": is_win,
        "stat_points": stat_points,
        "chosen_skills": skills,
    })
}

impl TestSetup {
    /// Send a request through the router and return status plus raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, body)
    }

    /// POST a batch of entries to /submit_game
    pub async fn submit(&self, entries: Vec<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/submit_game")
            .header("content-type", "application/json")
            .body(Body::from(Value::Array(entries).to_string()))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// GET a JSON endpoint
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Fetch the leaderboard, asserting success
    pub async fn leaderboard(&self) -> Vec<Value> {
        let (status, body) = self.get_json("/player_stats").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().cloned().unwrap()
    }

    /// Submit the lookup form and return the rendered page
    pub async fn lookup_page(&self, name: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/player_info")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!("player_name={}", name)))
            .unwrap();
        let (status, body) = self.send(request).await;
        (status, String::from_utf8(body).unwrap())
    }
}

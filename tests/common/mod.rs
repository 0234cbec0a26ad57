#![allow(dead_code)]

use chrono::TimeDelta;
use std::sync::Arc;
use ttl_shortener::prelude::{AppState, LinkRegistry};

pub const BASE_URL: &str = "http://localhost:8080";

pub fn create_test_state() -> AppState {
    AppState::new(
        Arc::new(LinkRegistry::default()),
        BASE_URL,
        TimeDelta::minutes(30),
    )
}

pub fn create_test_link(state: &AppState, code: &str, url: &str) {
    state
        .registry
        .create(url, Some(code), TimeDelta::minutes(30))
        .unwrap();
}

pub async fn create_expired_link(state: &AppState, code: &str, url: &str) {
    state
        .registry
        .create(url, Some(code), TimeDelta::milliseconds(1))
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
}

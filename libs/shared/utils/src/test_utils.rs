use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_kuma::KumaApi;
use shared_models::auth::User;

use crate::state::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub kuma_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            kuma_url: "http://localhost:3001".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_kuma_url(kuma_url: impl Into<String>) -> Self {
        Self {
            kuma_url: kuma_url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            kuma_url: self.kuma_url.clone(),
            kuma_timeout_secs: 5,
            jwt_secret: self.jwt_secret.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    /// Router state around any engine implementation (a mock or a real client).
    pub fn to_state(&self, kuma: Arc<dyn KumaApi>) -> AppState {
        AppState::new(self.to_arc(), kuma)
    }

    /// A ready-to-send `Authorization` header value for a default test user.
    pub fn bearer(&self) -> String {
        let token = JwtTestUtils::create_test_token(&TestUser::default(), &self.jwt_secret, Some(1));
        format!("Bearer {}", token)
    }
}

pub struct TestUser {
    pub id: String,
    pub username: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: "operator".to_string(),
            role: "admin".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(username: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role: role.to_string(),
        }
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: Some(self.username.clone()),
            role: Some(self.role.clone()),
            issued_at: Some(Utc::now()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now();
        let exp = now + Duration::hours(exp_hours.unwrap_or(24));

        let header = json!({
            "alg": "HS256",
            "typ": "JWT"
        });

        let payload = json!({
            "sub": user.id,
            "username": user.username,
            "role": user.role,
            "iat": now.timestamp(),
            "exp": exp.timestamp()
        });

        let header_encoded = general_purpose::URL_SAFE_NO_PAD.encode(header.to_string());
        let payload_encoded = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());

        let signing_input = format!("{}.{}", header_encoded, payload_encoded);

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();
        let signature_encoded = general_purpose::URL_SAFE_NO_PAD.encode(signature);

        format!("{}.{}", signing_input, signature_encoded)
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Canned engine payloads for tests.
pub struct MockKumaResponses;

impl MockKumaResponses {
    pub fn monitor(id: i64, monitor_type: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("monitor-{}", id),
            "type": monitor_type,
            "active": true,
            "interval": 60,
            "retryInterval": 60,
            "maxretries": 1,
            "url": "https://example.com",
            "hostname": "example.com",
            "port": 443,
            "tags": []
        })
    }

    pub fn heartbeat(monitor_id: i64, time: &str, status: u8) -> serde_json::Value {
        json!({
            "monitor_id": monitor_id,
            "status": status,
            "time": time,
            "msg": "",
            "ping": 42,
            "duration": 60
        })
    }

    pub fn cert(days_remaining: i64) -> serde_json::Value {
        json!({
            "valid": true,
            "certInfo": {
                "subject": { "CN": "example.com" },
                "issuer": { "CN": "R3" },
                "daysRemaining": days_remaining
            }
        })
    }

    pub fn maintenance(id: i64, strategy: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("maintenance-{}", id),
            "strategy": strategy,
            "active": true,
            "status": "scheduled"
        })
    }

    pub fn added(id_key: &str, id: i64) -> serde_json::Value {
        json!({ "msg": "Added Successfully.", id_key: id })
    }

    pub fn message(msg: &str) -> serde_json::Value {
        json!({ "msg": msg })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default();
        let app_config = config.to_app_config();

        assert_eq!(app_config.kuma_url, "http://localhost:3001");
        assert!(!app_config.jwt_secret.is_empty());
        assert!(app_config.is_configured());
    }

    #[test]
    fn test_user_creation() {
        let user = TestUser::new("ops", "admin");
        let user_model = user.to_user();
        assert_eq!(user_model.username, Some("ops".to_string()));
        assert_eq!(user_model.id, user.id);
    }

    #[test]
    fn test_jwt_token_creation() {
        let token = JwtTestUtils::create_test_token(&TestUser::default(), "test-secret", Some(1));
        assert_eq!(token.split('.').count(), 3);
    }
}

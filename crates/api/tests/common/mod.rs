#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{Duration as ChronoDuration, Utc};
use crudkit_auth::{Hs256JwtValidator, JwtClaims, JwtValidator, Permission};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

pub const SECRET: &str = "black-box-secret";

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Serve `app` (the same router the binary builds) on an ephemeral port.
    pub async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn validator() -> Arc<dyn JwtValidator> {
    Arc::new(Hs256JwtValidator::new(SECRET))
}

pub fn mint_jwt(permissions: &[&'static str]) -> String {
    mint_claims(Some(permissions.iter().map(|p| Permission::from_static(p)).collect()))
}

/// A signed token with no `permissions` claim at all.
pub fn mint_jwt_without_permissions() -> String {
    mint_claims(None)
}

fn mint_claims(permissions: Option<Vec<Permission>>) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: "black-box".to_string(),
        permissions,
        iat: now.timestamp(),
        exp: (now + ChronoDuration::minutes(10)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

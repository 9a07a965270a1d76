// Management API client (reqwest) and the provider traits the aggregator and pollers consume

use crate::config::CephConfig;
use crate::error::ApiError;
use crate::models::*;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::instrument;

/// Versioned media type the management API expects on every request.
pub const API_V1: &str = "application/vnd.ceph.api.v1.0+json";

/// Object gateway listings.
#[async_trait]
pub trait RgwApi: Send + Sync {
    async fn list_daemons(&self) -> Result<Vec<RgwDaemon>, ApiError>;
    async fn list_realms(&self) -> Result<RealmList, ApiError>;
    async fn list_zonegroups(&self) -> Result<ZonegroupList, ApiError>;
    async fn list_zones(&self) -> Result<ZoneList, ApiError>;
    async fn list_buckets(&self) -> Result<Vec<RgwBucket>, ApiError>;
    async fn list_users(&self) -> Result<Vec<RgwUser>, ApiError>;
}

#[async_trait]
pub trait HealthApi: Send + Sync {
    async fn get_cluster_capacity(&self) -> Result<ClusterCapacity, ApiError>;
}

/// Endpoints polled in the background by the workbench.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn get_summary(&self) -> Result<Summary, ApiError>;
    async fn get_multi_cluster_config(&self) -> Result<MultiClusterConfig, ApiError>;
    async fn check_token_status(&self) -> Result<TokenStatusMap, ApiError>;
}

pub struct CephClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl CephClient {
    pub fn new(config: &CephConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/auth. Stores the bearer token for subsequent requests.
    #[instrument(skip(self, password), fields(operation = "login"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let path = "/api/auth";
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(ACCEPT, HeaderValue::from_static(API_V1))
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|source| ApiError::Request {
                path: path.to_string(),
                source,
            })?;
        let auth: AuthResponse = decode(path, response).await?;
        *self.token.write().await = Some(auth.token.clone());
        tracing::info!(username = %auth.username, "logged in to management API");
        Ok(auth)
    }

    /// Use an already issued token instead of logging in.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let token = self
            .token
            .read()
            .await
            .clone()
            .ok_or(ApiError::Unauthenticated)?;
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT, HeaderValue::from_static(API_V1))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                path: path.to_string(),
                source,
            })?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            path: path.to_string(),
            status,
        });
    }
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

#[async_trait]
impl RgwApi for CephClient {
    #[instrument(skip(self), fields(operation = "list_daemons"))]
    async fn list_daemons(&self) -> Result<Vec<RgwDaemon>, ApiError> {
        self.get_json("/api/rgw/daemon").await
    }

    #[instrument(skip(self), fields(operation = "list_realms"))]
    async fn list_realms(&self) -> Result<RealmList, ApiError> {
        self.get_json("/api/rgw/realm").await
    }

    #[instrument(skip(self), fields(operation = "list_zonegroups"))]
    async fn list_zonegroups(&self) -> Result<ZonegroupList, ApiError> {
        self.get_json("/api/rgw/zonegroup").await
    }

    #[instrument(skip(self), fields(operation = "list_zones"))]
    async fn list_zones(&self) -> Result<ZoneList, ApiError> {
        self.get_json("/api/rgw/zone").await
    }

    #[instrument(skip(self), fields(operation = "list_buckets"))]
    async fn list_buckets(&self) -> Result<Vec<RgwBucket>, ApiError> {
        self.get_json("/api/rgw/bucket?stats=true").await
    }

    #[instrument(skip(self), fields(operation = "list_users"))]
    async fn list_users(&self) -> Result<Vec<RgwUser>, ApiError> {
        self.get_json("/api/rgw/user?detailed=true").await
    }
}

#[async_trait]
impl HealthApi for CephClient {
    #[instrument(skip(self), fields(operation = "get_cluster_capacity"))]
    async fn get_cluster_capacity(&self) -> Result<ClusterCapacity, ApiError> {
        self.get_json("/api/health/get_cluster_capacity").await
    }
}

#[async_trait]
impl ClusterApi for CephClient {
    async fn get_summary(&self) -> Result<Summary, ApiError> {
        self.get_json("/api/summary").await
    }

    async fn get_multi_cluster_config(&self) -> Result<MultiClusterConfig, ApiError> {
        self.get_json("/api/multi-cluster/get_config").await
    }

    async fn check_token_status(&self) -> Result<TokenStatusMap, ApiError> {
        self.get_json("/api/multi-cluster/check_token_status").await
    }
}

// Shared test helpers: fixtures, mock providers, fake management API
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Json, Router, routing::get, routing::post};
use reqwest::StatusCode;
use rgw_overview::ceph_api::{ClusterApi, HealthApi, RgwApi};
use rgw_overview::error::ApiError;
use rgw_overview::models::*;
use rgw_overview::services::PermissionSource;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn daemon() -> RgwDaemon {
    serde_json::from_value(json!({
        "id": "8000",
        "service_map_id": "4803",
        "version": "ceph version",
        "server_hostname": "ceph",
        "realm_name": "realm1",
        "zonegroup_name": "zg1-realm1",
        "zone_name": "zone1-zg1-realm1",
        "default": true,
        "port": 80
    }))
    .unwrap()
}

pub fn realm_list() -> RealmList {
    RealmList {
        default_info: "20f61d29-7e45-4418-8e19-b7e962e4860b".into(),
        realms: vec!["realm2".into(), "realm1".into()],
    }
}

pub fn zonegroup_list() -> ZonegroupList {
    ZonegroupList {
        default_info: "20f61d29-7e45-4418-8e19-b7e962e4860b".into(),
        zonegroups: vec!["zg-1".into(), "zg-2".into(), "zg-3".into()],
    }
}

pub fn zone_list() -> ZoneList {
    ZoneList {
        default_info: "20f61d29-7e45-4418-8e19-b7e962e4860b".into(),
        zones: vec!["zone4".into(), "zone5".into(), "zone6".into(), "zone7".into()],
    }
}

pub fn bucket_json(name: &str) -> serde_json::Value {
    json!({
        "bucket": name,
        "owner": "testid",
        "usage": {
            "rgw.main": { "size_actual": 4, "num_objects": 2 },
            "rgw.none": { "size_actual": 6, "num_objects": 6 }
        },
        "bucket_quota": { "max_size": 20, "max_objects": 10, "enabled": true }
    })
}

pub fn bucket_list() -> Vec<RgwBucket> {
    vec![
        serde_json::from_value(bucket_json("bucket")).unwrap(),
        serde_json::from_value(bucket_json("bucket2")).unwrap(),
    ]
}

pub fn user_json(id: &str) -> serde_json::Value {
    json!({
        "user_id": id,
        "stats": { "size_actual": 6, "num_objects": 6 },
        "user_quota": { "max_size": 20, "max_objects": 10, "enabled": true }
    })
}

pub fn user_list() -> Vec<RgwUser> {
    vec![
        serde_json::from_value(user_json("testid")).unwrap(),
        serde_json::from_value(user_json("testid2")).unwrap(),
    ]
}

pub fn capacity() -> ClusterCapacity {
    serde_json::from_value(json!({
        "total_objects": "290",
        "total_pool_bytes_used": 9338880
    }))
    .unwrap()
}

pub fn summary(health_status: &str) -> Summary {
    Summary {
        health_status: health_status.into(),
        mgr_id: "x".into(),
        have_mon_connection: true,
        ..Default::default()
    }
}

fn server_error(path: &str) -> ApiError {
    ApiError::Status {
        path: path.into(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serves the fixtures above; `failing` names one source ("daemons", "realms", ...,
/// "capacity") that answers with HTTP 500 instead.
#[derive(Default)]
pub struct MockRgw {
    pub failing: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl MockRgw {
    pub fn failing(source: &'static str) -> Self {
        Self {
            failing: Some(source),
            ..Default::default()
        }
    }

    fn answer<T>(&self, source: &'static str, value: impl FnOnce() -> T) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(source) {
            return Err(server_error(source));
        }
        Ok(value())
    }
}

#[async_trait]
impl RgwApi for MockRgw {
    async fn list_daemons(&self) -> Result<Vec<RgwDaemon>, ApiError> {
        self.answer("daemons", || vec![daemon()])
    }

    async fn list_realms(&self) -> Result<RealmList, ApiError> {
        self.answer("realms", realm_list)
    }

    async fn list_zonegroups(&self) -> Result<ZonegroupList, ApiError> {
        self.answer("zonegroups", zonegroup_list)
    }

    async fn list_zones(&self) -> Result<ZoneList, ApiError> {
        self.answer("zones", zone_list)
    }

    async fn list_buckets(&self) -> Result<Vec<RgwBucket>, ApiError> {
        self.answer("buckets", bucket_list)
    }

    async fn list_users(&self) -> Result<Vec<RgwUser>, ApiError> {
        self.answer("users", user_list)
    }
}

#[async_trait]
impl HealthApi for MockRgw {
    async fn get_cluster_capacity(&self) -> Result<ClusterCapacity, ApiError> {
        self.answer("capacity", capacity)
    }
}

/// Counts every poll request per endpoint.
#[derive(Default)]
pub struct MockCluster {
    pub summary_calls: AtomicUsize,
    pub config_calls: AtomicUsize,
    pub token_status_calls: AtomicUsize,
    pub health_status: std::sync::Mutex<String>,
}

impl MockCluster {
    pub fn new(health_status: &str) -> Self {
        Self {
            health_status: std::sync::Mutex::new(health_status.into()),
            ..Default::default()
        }
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.summary_calls.load(Ordering::SeqCst),
            self.config_calls.load(Ordering::SeqCst),
            self.token_status_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl ClusterApi for MockCluster {
    async fn get_summary(&self) -> Result<Summary, ApiError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        let status = self.health_status.lock().unwrap().clone();
        Ok(summary(&status))
    }

    async fn get_multi_cluster_config(&self) -> Result<MultiClusterConfig, ApiError> {
        self.config_calls.fetch_add(1, Ordering::SeqCst);
        Ok(MultiClusterConfig {
            current_url: "https://hub:8443".into(),
            current_user: "admin".into(),
            ..Default::default()
        })
    }

    async fn check_token_status(&self) -> Result<TokenStatusMap, ApiError> {
        self.token_status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(HashMap::new())
    }
}

pub struct StaticPermissions(pub Permissions);

impl StaticPermissions {
    pub fn config_read(read: bool) -> Self {
        Self(Permissions::default().with_scope(
            CONFIG_OPT_SCOPE,
            Permission {
                read,
                ..Default::default()
            },
        ))
    }
}

impl PermissionSource for StaticPermissions {
    fn get_permissions(&self) -> Permissions {
        self.0.clone()
    }
}

pub const TEST_TOKEN: &str = "test-token";

/// Starts an in-process fake of the management API on 127.0.0.1 and returns its base URL.
/// Data endpoints require `Authorization: Bearer test-token`.
pub async fn spawn_fake_api() -> String {
    use axum::http::HeaderMap;

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", TEST_TOKEN))
    }

    macro_rules! guarded {
        ($body:expr) => {
            get(|headers: HeaderMap| async move {
                if authorized(&headers) {
                    Ok(Json($body))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            })
        };
    }

    let app = Router::new()
        .route(
            "/api/auth",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["password"] == "secret" {
                    Ok(Json(json!({
                        "token": TEST_TOKEN,
                        "username": body["username"],
                        "permissions": {
                            "config-opt": ["read", "update"],
                            "rgw": ["read"]
                        },
                        "pwdUpdateRequired": false
                    })))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        )
        .route("/api/rgw/daemon", guarded!(json!([serde_json::to_value(daemon()).unwrap()])))
        .route("/api/rgw/realm", guarded!(json!(realm_list())))
        .route("/api/rgw/zonegroup", guarded!(json!(zonegroup_list())))
        .route("/api/rgw/zone", guarded!(json!(zone_list())))
        .route(
            "/api/rgw/bucket",
            guarded!(json!([bucket_json("bucket"), bucket_json("bucket2")])),
        )
        .route(
            "/api/rgw/user",
            guarded!(json!([user_json("testid"), user_json("testid2")])),
        )
        .route(
            "/api/health/get_cluster_capacity",
            // Numeric on the wire; the client keeps it as text.
            guarded!(json!({ "total_objects": 290, "total_pool_bytes_used": 9338880 })),
        )
        .route(
            "/api/summary",
            guarded!(json!({
                "health_status": "HEALTH_WARN",
                "mgr_id": "x",
                "mgr_host": "http://ceph:8443/",
                "have_mon_connection": true,
                "executing_tasks": [],
                "finished_tasks": [],
                "version": "ceph version 19"
            })),
        )
        .route(
            "/api/multi-cluster/get_config",
            guarded!(json!({
                "current_url": "https://ceph:8443",
                "current_user": "admin",
                "hub_url": "https://ceph:8443",
                "config": {
                    "fsid-1": [{ "name": "fsid-1", "url": "https://ceph:8443", "user": "admin", "cluster_alias": "local" }]
                }
            })),
        )
        .route(
            "/api/multi-cluster/check_token_status",
            guarded!(json!({ "remote": { "status": "valid", "time_left": 3600 } })),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

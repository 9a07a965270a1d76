// Model deserialization tests (API payload shapes, permissions, counters JSON)

use rgw_overview::models::*;
use serde_json::json;
use std::collections::HashMap;

#[test]
fn test_daemon_deserializes_api_shape() {
    let daemon: RgwDaemon = serde_json::from_value(json!({
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
    .unwrap();
    assert_eq!(daemon.id, "8000");
    assert_eq!(daemon.port, 80);
    assert!(daemon.default);
}

#[test]
fn test_daemon_tolerates_missing_placement() {
    let daemon: RgwDaemon = serde_json::from_value(json!({ "id": "rgw.a" })).unwrap();
    assert_eq!(daemon.realm_name, "");
    assert!(!daemon.default);
}

#[test]
fn test_realm_list_ignores_default_info_for_length() {
    let list: RealmList = serde_json::from_value(json!({
        "default_info": "20f61d29-7e45-4418-8e19-b7e962e4860b",
        "realms": ["realm2", "realm1"]
    }))
    .unwrap();
    assert_eq!(list.realms, vec!["realm2", "realm1"]);

    let empty: RealmList = serde_json::from_value(json!({ "default_info": "x" })).unwrap();
    assert!(empty.realms.is_empty());
}

#[test]
fn test_bucket_usage_per_storage_class() {
    let bucket: RgwBucket = serde_json::from_value(json!({
        "bucket": "bucket",
        "owner": "testid",
        "usage": {
            "rgw.main": { "size_actual": 4, "num_objects": 2 },
            "rgw.none": { "size_actual": 6, "num_objects": 6 }
        },
        "bucket_quota": { "max_size": 20, "max_objects": 10, "enabled": true }
    }))
    .unwrap();
    assert_eq!(bucket.usage["rgw.main"].num_objects, 2);
    assert_eq!(bucket.size_actual(), 10);
    assert_eq!(
        bucket.bucket_quota,
        Quota {
            max_size: 20,
            max_objects: 10,
            enabled: true
        }
    );
}

#[test]
fn test_unlimited_quota_is_negative() {
    let user: RgwUser = serde_json::from_value(json!({
        "user_id": "testid",
        "user_quota": { "max_size": -1, "max_objects": -1, "enabled": false }
    }))
    .unwrap();
    assert_eq!(user.user_quota.max_size, -1);
    assert_eq!(user.stats, UsageStats::default());
}

#[test]
fn test_capacity_total_objects_accepts_string_and_number() {
    let text: ClusterCapacity = serde_json::from_value(json!({
        "total_objects": "290",
        "total_pool_bytes_used": 9338880
    }))
    .unwrap();
    let number: ClusterCapacity = serde_json::from_value(json!({
        "total_objects": 290,
        "total_pool_bytes_used": 9338880
    }))
    .unwrap();
    assert_eq!(text.total_objects, "290");
    assert_eq!(number.total_objects, "290");
    assert_eq!(text.total_pool_bytes_used, number.total_pool_bytes_used);
}

#[test]
fn test_permissions_from_scopes() {
    let mut scopes = HashMap::new();
    scopes.insert(
        "config-opt".to_string(),
        vec!["read".to_string(), "update".to_string()],
    );
    scopes.insert("rgw".to_string(), vec!["read".to_string(), "bogus".to_string()]);
    let permissions = Permissions::from_scopes(&scopes);

    assert_eq!(
        permissions.config_opt(),
        Permission {
            read: true,
            create: false,
            update: true,
            delete: false
        }
    );
    assert!(permissions.scope("rgw").read);
    assert_eq!(permissions.scope("hosts"), Permission::default());
}

#[test]
fn test_empty_permissions_deny_config_read() {
    assert!(!Permissions::default().config_opt().read);
}

#[test]
fn test_summary_task_lookup_matches_name_and_metadata() {
    let summary: Summary = serde_json::from_value(json!({
        "health_status": "HEALTH_OK",
        "executing_tasks": [
            { "name": "rgw/bucket/delete", "metadata": { "bucket_names": ["a"] }, "begin_time": "t0", "progress": 50 }
        ],
        "finished_tasks": [
            { "name": "rgw/bucket/delete", "metadata": { "bucket_names": ["b"] }, "success": true }
        ]
    }))
    .unwrap();
    assert!(summary.is_executing("rgw/bucket/delete", &json!({ "bucket_names": ["a"] })));
    assert!(!summary.is_executing("rgw/bucket/delete", &json!({ "bucket_names": ["b"] })));
    let finished = summary
        .find_finished("rgw/bucket/delete", &json!({ "bucket_names": ["b"] }))
        .unwrap();
    assert!(finished.success);
}

#[test]
fn test_overview_counters_serialize_camel_case() {
    let counters = OverviewCounters {
        daemon_count: Some(1),
        object_count: Some("290".into()),
        total_pool_used_bytes: Some(9338880),
        ..Default::default()
    };
    let json = serde_json::to_value(&counters).unwrap();
    assert_eq!(json["daemonCount"], 1);
    assert_eq!(json["objectCount"], "290");
    assert_eq!(json["totalPoolUsedBytes"], 9338880);
    assert!(json["zoneCount"].is_null());
}

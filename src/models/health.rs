// Cluster capacity (health) snapshot

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterCapacity {
    /// Kept as text: the API has sent both numbers and strings here.
    #[serde(deserialize_with = "number_or_string")]
    pub total_objects: String,
    pub total_pool_bytes_used: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub total_avail_bytes: u64,
    #[serde(default)]
    pub total_used_raw_bytes: u64,
    #[serde(default)]
    pub average_object_size: f64,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

// Login request/response

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Permissions;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// POST /api/auth response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    /// Scope name -> operation names, e.g. {"config-opt": ["read", "update"]}.
    #[serde(default)]
    pub permissions: HashMap<String, Vec<String>>,
    #[serde(default, rename = "pwdUpdateRequired")]
    pub pwd_update_required: bool,
}

impl AuthResponse {
    pub fn permissions(&self) -> Permissions {
        Permissions::from_scopes(&self.permissions)
    }
}

// Logged-in identity and permission set

use crate::models::{AuthResponse, Permissions};
use std::sync::RwLock;

/// Synchronous read of the current permission set.
pub trait PermissionSource: Send + Sync {
    fn get_permissions(&self) -> Permissions;
}

#[derive(Default)]
pub struct AuthStorage {
    inner: RwLock<Session>,
}

#[derive(Default, Clone)]
struct Session {
    username: Option<String>,
    permissions: Permissions,
}

impl AuthStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_login(auth: &AuthResponse) -> Self {
        let storage = Self::new();
        storage.set(&auth.username, auth.permissions());
        storage
    }

    pub fn set(&self, username: &str, permissions: Permissions) {
        match self.inner.write() {
            Ok(mut session) => {
                session.username = Some(username.to_string());
                session.permissions = permissions;
            }
            Err(e) => tracing::warn!(error = %e, "auth storage lock poisoned"),
        }
    }

    pub fn username(&self) -> Option<String> {
        self.inner.read().ok().and_then(|s| s.username.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut session) = self.inner.write() {
            *session = Session::default();
        }
    }
}

impl PermissionSource for AuthStorage {
    fn get_permissions(&self) -> Permissions {
        self.inner
            .read()
            .map(|s| s.permissions.clone())
            .unwrap_or_default()
    }
}

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use warden_core::{AppError, FieldErrors, NonEmptyString, RecordId};

use crate::{PermissionCatalogEntry, PermissionKey};

/// Form field holding the role name.
pub const ROLE_NAME_FIELD: &str = "role_name";

const ROLE_NAME_REQUIRED: &str = "Role name is required";

/// Whether a role can currently be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleStatus {
    /// Role is in use.
    #[default]
    Active,
    /// Role is disabled.
    Inactive,
}

impl RoleStatus {
    /// Returns the canonical transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl Display for RoleStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RoleStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(AppError::Validation(format!("unknown role status '{value}'"))),
        }
    }
}

/// Grant per permission key. Absent keys are ungranted.
///
/// Keys are not checked against the registry: a key whose permission was
/// deleted stays in the mapping and simply grants nothing. Values are kept as
/// received; only JSON `true` grants, and entries that are never set are
/// written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<BTreeMap<String, Value>>")]
pub struct RolePermissions(BTreeMap<PermissionKey, Value>);

impl RolePermissions {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one key, leaving every other entry untouched.
    pub fn set(&mut self, key: impl Into<PermissionKey>, granted: bool) {
        self.0.insert(key.into(), Value::Bool(granted));
    }

    /// Returns whether the key is granted.
    #[must_use]
    pub fn is_granted(&self, key: &str) -> bool {
        self.0
            .get(&PermissionKey::from_raw(key))
            .is_some_and(grants)
    }

    /// Returns the stored value of a key as received or last set.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(&PermissionKey::from_raw(key))
    }

    /// Returns whether the mapping carries an entry for the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(&PermissionKey::from_raw(key))
    }

    /// Returns the granted keys in key order.
    pub fn granted_keys(&self) -> impl Iterator<Item = &PermissionKey> {
        self.0
            .iter()
            .filter(|(_, value)| grants(value))
            .map(|(key, _)| key)
    }

    /// Iterates every `(key, granted)` entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PermissionKey, bool)> {
        self.0.iter().map(|(key, value)| (key, grants(value)))
    }

    /// Returns the number of entries, granted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pairs each catalog entry with its grant in this mapping.
    #[must_use]
    pub fn against_catalog<'a>(
        &self,
        catalog: &'a [PermissionCatalogEntry],
    ) -> Vec<(&'a PermissionCatalogEntry, bool)> {
        catalog
            .iter()
            .map(|entry| (entry, self.is_granted(entry.permission_key.as_str())))
            .collect()
    }

    /// Returns the keys absent from a catalog snapshot.
    #[must_use]
    pub fn keys_outside(&self, catalog: &[PermissionCatalogEntry]) -> Vec<&PermissionKey> {
        self.0
            .keys()
            .filter(|key| !catalog.iter().any(|entry| &entry.permission_key == *key))
            .collect()
    }
}

impl From<Option<BTreeMap<String, Value>>> for RolePermissions {
    fn from(value: Option<BTreeMap<String, Value>>) -> Self {
        Self(
            value
                .unwrap_or_default()
                .into_iter()
                .map(|(key, value)| (PermissionKey::from_raw(key), value))
                .collect(),
        )
    }
}

impl<K: Into<PermissionKey>> FromIterator<(K, bool)> for RolePermissions {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, granted)| (key.into(), Value::Bool(granted)))
                .collect(),
        )
    }
}

fn grants(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

/// Validated role payload ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    role_name: NonEmptyString,
    status: RoleStatus,
    permissions: RolePermissions,
}

impl RoleDefinition {
    /// Returns the role name.
    #[must_use]
    pub fn role_name(&self) -> &NonEmptyString {
        &self.role_name
    }

    /// Returns the status.
    #[must_use]
    pub fn status(&self) -> RoleStatus {
        self.status
    }

    /// Returns the permission mapping.
    #[must_use]
    pub fn permissions(&self) -> &RolePermissions {
        &self.permissions
    }
}

/// Unvalidated role input as edited in a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    /// Raw role name.
    #[serde(default)]
    pub role_name: String,
    /// Selected status.
    #[serde(default)]
    pub status: RoleStatus,
    /// In-progress permission mapping.
    #[serde(default)]
    pub permissions: RolePermissions,
}

impl RoleDraft {
    /// Creates a draft with an empty mapping and `ACTIVE` status.
    #[must_use]
    pub fn new(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            ..Self::default()
        }
    }

    /// Creates a draft pre-filled from a stored role.
    #[must_use]
    pub fn from_role(role: &Role) -> Self {
        Self {
            role_name: role.role_name.clone(),
            status: role.status,
            permissions: role.permissions.clone(),
        }
    }

    /// Grants or revokes one key without affecting other entries.
    pub fn toggle(&mut self, key: impl Into<PermissionKey>, granted: bool) {
        self.permissions.set(key, granted);
    }

    /// Validates the draft, collecting all failures.
    pub fn validate(&self) -> Result<RoleDefinition, FieldErrors> {
        match NonEmptyString::new(self.role_name.clone()) {
            Ok(role_name) => Ok(RoleDefinition {
                role_name,
                status: self.status,
                permissions: self.permissions.clone(),
            }),
            Err(_) => {
                let mut errors = FieldErrors::new();
                errors.insert(ROLE_NAME_FIELD, ROLE_NAME_REQUIRED);
                Err(errors)
            }
        }
    }
}

/// Role stored by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Server identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Role name.
    pub role_name: String,
    /// Status.
    pub status: RoleStatus,
    /// Permission mapping.
    #[serde(default)]
    pub permissions: RolePermissions,
    /// Number of users holding the role, when reported.
    #[serde(default)]
    pub users_count: Option<u64>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

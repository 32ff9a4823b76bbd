use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_core::{AppError, AppResult, FieldErrors, NonEmptyString, RecordId};

/// Form field holding the screen name.
pub const SCREEN_NAME_FIELD: &str = "screen_name";
/// Form field holding the action.
pub const ACTION_FIELD: &str = "action";
/// Form field holding the description.
pub const DESCRIPTION_FIELD: &str = "description";

const SCREEN_NAME_REQUIRED: &str = "Screen name is required";
const SCREEN_NAME_SYNTAX: &str =
    "Screen name must start with a letter and contain only letters, numbers, and underscores";
const ACTION_REQUIRED: &str = "Action is required";
const DESCRIPTION_REQUIRED: &str = "Description is required";

/// Operation a permission grants on a screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionAction {
    /// Create new records.
    #[default]
    Create,
    /// Edit existing records.
    Edit,
    /// View records.
    View,
    /// Delete records.
    Delete,
}

impl PermissionAction {
    /// Returns the canonical transport value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Edit => "EDIT",
            Self::View => "VIEW",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the lowercase suffix used in permission keys.
    #[must_use]
    pub fn key_suffix(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::View => "view",
            Self::Delete => "delete",
        }
    }

    /// Returns all actions in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionAction] = &[
            PermissionAction::Create,
            PermissionAction::Edit,
            PermissionAction::View,
            PermissionAction::Delete,
        ];

        ALL
    }
}

impl Display for PermissionAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE" => Ok(Self::Create),
            "EDIT" => Ok(Self::Edit),
            "VIEW" => Ok(Self::View),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

fn screen_name_problem(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some(SCREEN_NAME_REQUIRED);
    }

    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|first| first.is_ascii_alphabetic());
    let rest_is_valid = chars.all(|next| next.is_ascii_alphanumeric() || next == '_');
    if starts_with_letter && rest_is_valid {
        None
    } else {
        Some(SCREEN_NAME_SYNTAX)
    }
}

/// Validated subsystem identifier a permission applies to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScreenName(String);

impl ScreenName {
    /// Creates a screen name matching `^[A-Za-z][A-Za-z0-9_]*$`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        match screen_name_problem(value.as_str()) {
            Some(problem) => Err(AppError::Validation(problem.to_owned())),
            None => Ok(Self(value)),
        }
    }

    /// Returns the screen name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ScreenName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScreenName> for String {
    fn from(value: ScreenName) -> Self {
        value.0
    }
}

/// Flat string identity of a permission, e.g. `ticket_create`.
///
/// Keys read back from roles or the catalog are kept verbatim; they are a
/// projection of `(screen_name, action)` and are never parsed back into it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionKey(String);

impl PermissionKey {
    /// Derives the key of a `(screen_name, action)` pair.
    #[must_use]
    pub fn derive(screen_name: &str, action: PermissionAction) -> Self {
        Self(format!("{screen_name}_{}", action.key_suffix()))
    }

    /// Wraps a key received from the API.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PermissionKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl From<&str> for PermissionKey {
    fn from(value: &str) -> Self {
        Self::from_raw(value)
    }
}

/// Validated permission ready to be submitted to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDefinition {
    screen_name: ScreenName,
    action: PermissionAction,
    description: NonEmptyString,
}

impl PermissionDefinition {
    /// Creates a permission definition with validated fields.
    pub fn new(
        screen_name: impl Into<String>,
        action: PermissionAction,
        description: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            screen_name: ScreenName::new(screen_name)?,
            action,
            description: NonEmptyString::new(description)?,
        })
    }

    /// Returns the screen name.
    #[must_use]
    pub fn screen_name(&self) -> &ScreenName {
        &self.screen_name
    }

    /// Returns the granted action.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &NonEmptyString {
        &self.description
    }

    /// Returns the derived permission key.
    #[must_use]
    pub fn key(&self) -> PermissionKey {
        PermissionKey::derive(self.screen_name.as_str(), self.action)
    }
}

/// Unvalidated permission input as typed into a form row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDraft {
    /// Raw screen name.
    #[serde(default)]
    pub screen_name: String,
    /// Selected action, `None` when unset.
    #[serde(default)]
    pub action: Option<PermissionAction>,
    /// Raw description.
    #[serde(default)]
    pub description: String,
}

impl Default for PermissionDraft {
    fn default() -> Self {
        Self {
            screen_name: String::new(),
            action: Some(PermissionAction::Create),
            description: String::new(),
        }
    }
}

impl PermissionDraft {
    /// Creates a draft from raw values.
    #[must_use]
    pub fn new(
        screen_name: impl Into<String>,
        action: Option<PermissionAction>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            screen_name: screen_name.into(),
            action,
            description: description.into(),
        }
    }

    /// Returns whether nothing was typed into the free-text fields.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.screen_name.trim().is_empty() && self.description.trim().is_empty()
    }

    /// Returns whether every required field carries a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.screen_name.trim().is_empty()
            && self.action.is_some()
            && !self.description.trim().is_empty()
    }

    /// Returns the key this draft would derive, when it can derive one.
    #[must_use]
    pub fn key_preview(&self) -> Option<PermissionKey> {
        let action = self.action?;
        if screen_name_problem(self.screen_name.as_str()).is_some() {
            return None;
        }

        Some(PermissionKey::derive(self.screen_name.as_str(), action))
    }

    /// Validates every field, collecting all failures.
    pub fn validate(&self) -> Result<PermissionDefinition, FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Some(problem) = screen_name_problem(self.screen_name.as_str()) {
            errors.insert(SCREEN_NAME_FIELD, problem);
        }
        if self.action.is_none() {
            errors.insert(ACTION_FIELD, ACTION_REQUIRED);
        }
        if self.description.trim().is_empty() {
            errors.insert(DESCRIPTION_FIELD, DESCRIPTION_REQUIRED);
        }

        let description = NonEmptyString::new(self.description.clone());
        match (self.action, description) {
            (Some(action), Ok(description)) if errors.is_empty() => Ok(PermissionDefinition {
                screen_name: ScreenName(self.screen_name.clone()),
                action,
                description,
            }),
            _ => Err(errors),
        }
    }
}

/// Validates only the description, as allowed when editing a permission.
pub fn validate_description(description: &str) -> Result<NonEmptyString, FieldErrors> {
    NonEmptyString::new(description).map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.insert(DESCRIPTION_FIELD, DESCRIPTION_REQUIRED);
        errors
    })
}

/// Permission stored in the remote registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Registry identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Screen the permission applies to.
    pub screen_name: String,
    /// Granted action.
    pub action: PermissionAction,
    /// Human explanation.
    pub description: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Permission {
    /// Returns the derived permission key.
    #[must_use]
    pub fn key(&self) -> PermissionKey {
        PermissionKey::derive(self.screen_name.as_str(), self.action)
    }
}

/// Flat catalog entry used when assigning permissions to roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCatalogEntry {
    /// Registry identifier.
    #[serde(rename = "s_no")]
    pub id: RecordId,
    /// Flat permission key.
    pub permission_key: PermissionKey,
    /// Human explanation.
    #[serde(default)]
    pub description: String,
}

/// Groups permissions by screen name, each group ordered by action.
#[must_use]
pub fn group_by_screen(permissions: &[Permission]) -> BTreeMap<&str, Vec<&Permission>> {
    let mut groups: BTreeMap<&str, Vec<&Permission>> = BTreeMap::new();
    for permission in permissions {
        groups
            .entry(permission.screen_name.as_str())
            .or_default()
            .push(permission);
    }

    for group in groups.values_mut() {
        group.sort_by_key(|permission| (permission.action, permission.id));
    }

    groups
}

use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::RecordId;

/// Administrator identity returned by passcode verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    #[serde(rename = "s_no")]
    user_id: RecordId,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    role_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    organization_id: Option<RecordId>,
}

impl AdminIdentity {
    /// Creates an identity from verification data.
    #[must_use]
    pub fn new(
        user_id: RecordId,
        name: impl Into<String>,
        role_name: impl Into<String>,
        organization_id: Option<RecordId>,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: None,
            phone: None,
            role_name: role_name.into(),
            organization_id,
        }
    }

    /// Attaches contact details.
    #[must_use]
    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    /// Returns the server-side user identifier.
    #[must_use]
    pub fn user_id(&self) -> RecordId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the email, if the API returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the phone number, if the API returned one.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the role name assigned by the API.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns the organization the user belongs to, if any.
    #[must_use]
    pub fn organization_id(&self) -> Option<RecordId> {
        self.organization_id
    }
}

/// Bearer token issued by passcode verification.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw bearer token.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token for request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}

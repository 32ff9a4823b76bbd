use async_trait::async_trait;

use warden_core::{AccessToken, AdminIdentity, AppResult};

/// Store key of the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Store key of the signed-in user id.
pub const USER_ID_KEY: &str = "user_id";
/// Store key of the signed-in user's organization id.
pub const ORGANIZATION_ID_KEY: &str = "organization_id";
/// Store key of the serialized identity used to restore a session.
pub const IDENTITY_KEY: &str = "auth_identity";

/// Successful passcode verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpVerification {
    /// Identity the passcode belongs to.
    pub identity: AdminIdentity,
    /// Bearer token issued for the identity.
    pub access_token: AccessToken,
}

/// Port for the remote one-time-passcode authentication endpoints.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Dispatches a passcode to a phone number.
    async fn send_otp(&self, phone: &str) -> AppResult<()>;

    /// Verifies a passcode and returns the identity with a bearer token.
    async fn verify_otp(&self, phone: &str, otp: &str) -> AppResult<OtpVerification>;
}

/// Durable key-value store for client session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

//! Passcode login state machine.
//!
//! `AwaitingPhone -> AwaitingCode -> Authenticated`. A verified identity
//! without the administrative role never reaches `Authenticated` and no
//! session is persisted for it.

use std::sync::Arc;

use tracing::{info, warn};
use warden_core::{AppError, AppResult};

use crate::{AdminSession, AuthGateway, OtpVerification, SessionService};


/// Role an identity must hold to sign in.
pub const DEFAULT_ADMIN_ROLE: &str = "SUPER_ADMIN";
/// Message shown when a verified identity lacks the administrative role.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Super Admin privileges required.";

const SEND_OTP_FAILED: &str = "Failed to send OTP";
const VERIFY_OTP_FAILED: &str = "Failed to verify OTP";

/// Current step of the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for a phone number.
    AwaitingPhone,
    /// Passcode dispatched; waiting for it to be entered.
    AwaitingCode {
        /// Phone number the passcode was sent to.
        phone: String,
    },
    /// Signed in.
    Authenticated(AdminSession),
}

/// Drives passcode login and logout against the auth gateway.
pub struct LoginFlow {
    gateway: Arc<dyn AuthGateway>,
    sessions: SessionService,
    admin_role: String,
    state: LoginState,
    error: Option<String>,
}

impl LoginFlow {
    /// Creates a flow waiting for a phone number.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        sessions: SessionService,
        admin_role: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            admin_role: admin_role.into(),
            state: LoginState::AwaitingPhone,
            error: None,
        }
    }

    /// Creates a flow already signed in with a restored session.
    #[must_use]
    pub fn resume(
        gateway: Arc<dyn AuthGateway>,
        sessions: SessionService,
        admin_role: impl Into<String>,
        session: AdminSession,
    ) -> Self {
        let mut flow = Self::new(gateway, sessions, admin_role);
        flow.state = LoginState::Authenticated(session);
        flow
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Returns the message of the last failed step, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the session once signed in.
    #[must_use]
    pub fn session(&self) -> Option<&AdminSession> {
        match &self.state {
            LoginState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Requests a passcode for a phone number.
    pub async fn submit_phone(&mut self, phone: &str) -> AppResult<()> {
        if self.state != LoginState::AwaitingPhone {
            return Err(AppError::Validation(
                "a phone number can only be submitted while awaiting one".to_owned(),
            ));
        }

        let phone = phone.trim();
        if phone.is_empty() {
            let message = "Phone number is required";
            self.error = Some(message.to_owned());
            return Err(AppError::Validation(message.to_owned()));
        }

        self.error = None;
        match self.gateway.send_otp(phone).await {
            Ok(()) => {
                info!("passcode dispatched");
                self.state = LoginState::AwaitingCode {
                    phone: phone.to_owned(),
                };
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "passcode dispatch failed");
                self.error = Some(error.server_message().unwrap_or(SEND_OTP_FAILED).to_owned());
                Err(error)
            }
        }
    }

    /// Verifies a passcode and signs in when the identity is an administrator.
    pub async fn submit_code(&mut self, code: &str) -> AppResult<&AdminSession> {
        let LoginState::AwaitingCode { phone } = &self.state else {
            return Err(AppError::Validation(
                "a passcode can only be submitted while awaiting one".to_owned(),
            ));
        };
        let phone = phone.clone();

        let code = code.trim();
        if code.is_empty() {
            let message = "Passcode is required";
            self.error = Some(message.to_owned());
            return Err(AppError::Validation(message.to_owned()));
        }

        self.error = None;
        let verification = match self.gateway.verify_otp(phone.as_str(), code).await {
            Ok(verification) => verification,
            Err(error) => {
                let error = match error {
                    AppError::Rejected(message) | AppError::Unauthorized(message) => {
                        AppError::Unauthorized(message)
                    }
                    other => other,
                };
                warn!(error = %error, "passcode verification failed");
                self.error = Some(
                    error
                        .server_message()
                        .unwrap_or(VERIFY_OTP_FAILED)
                        .to_owned(),
                );
                return Err(error);
            }
        };

        let OtpVerification {
            identity,
            access_token,
        } = verification;
        if identity.role_name() != self.admin_role {
            warn!(
                user_id = %identity.user_id(),
                role = %identity.role_name(),
                "verified identity lacks the administrative role"
            );
            self.error = Some(ACCESS_DENIED_MESSAGE.to_owned());
            return Err(AppError::Forbidden(ACCESS_DENIED_MESSAGE.to_owned()));
        }

        let session = self.sessions.establish(identity, access_token).await?;
        self.state = LoginState::Authenticated(session);
        match &self.state {
            LoginState::Authenticated(session) => Ok(session),
            _ => Err(AppError::Internal(
                "login state changed while signing in".to_owned(),
            )),
        }
    }

    /// Returns to phone entry, discarding the pending passcode and error.
    pub fn change_number(&mut self) -> AppResult<()> {
        if !matches!(self.state, LoginState::AwaitingCode { .. }) {
            return Err(AppError::Validation(
                "the phone number can only be changed while awaiting a passcode".to_owned(),
            ));
        }

        self.state = LoginState::AwaitingPhone;
        self.error = None;
        Ok(())
    }

    /// Clears the persisted session and returns to phone entry.
    pub async fn logout(&mut self) -> AppResult<()> {
        self.sessions.teardown().await?;
        self.state = LoginState::AwaitingPhone;
        self.error = None;
        Ok(())
    }
}

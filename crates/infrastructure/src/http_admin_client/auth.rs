use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use warden_application::{AuthGateway, OtpVerification};
use warden_core::{AccessToken, AdminIdentity, AppResult};

use super::HttpAdminClient;

#[derive(Serialize)]
struct SendOtpBody<'a> {
    phone: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpBody<'a> {
    phone: &'a str,
    otp: &'a str,
}

#[derive(Deserialize)]
struct VerifyOtpResponse {
    user: AdminIdentity,
    access_token: String,
}

#[async_trait]
impl AuthGateway for HttpAdminClient {
    async fn send_otp(&self, phone: &str) -> AppResult<()> {
        let request = self
            .request(Method::POST, self.endpoint("auth/send-otp")?, None)
            .json(&SendOtpBody { phone });

        self.send_ignoring_body(request).await
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> AppResult<OtpVerification> {
        let request = self
            .request(Method::POST, self.endpoint("auth/verify-otp")?, None)
            .json(&VerifyOtpBody { phone, otp });

        let response: VerifyOtpResponse = self.send_json(request).await?;
        Ok(OtpVerification {
            identity: response.user,
            access_token: AccessToken::new(response.access_token),
        })
    }
}

//! Identity service client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::ui::enterprise_sign_on::{PrevalidateSsoResult, SsoPrevalidator};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PrevalidateSsoResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(alias = "Message")]
    message: Option<String>,
}

#[derive(Clone)]
pub struct IdentityClient {
    identity_url: String,
    client: Client,
}

impl IdentityClient {
    pub fn new(identity_url: String) -> Self {
        Self {
            identity_url: identity_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn prevalidate_url(&self, org_identifier: &str) -> String {
        format!(
            "{}/sso/prevalidate?domainHint={}",
            self.identity_url,
            urlencoding::encode(org_identifier)
        )
    }
}

/// Turn a prevalidate response into the screen's result
pub fn parse_prevalidate_response(status: StatusCode, body: &str) -> PrevalidateSsoResult {
    if status.is_success() {
        return match serde_json::from_str::<PrevalidateSsoResponse>(body) {
            Ok(PrevalidateSsoResponse { token: Some(token) }) if !token.is_empty() => {
                PrevalidateSsoResult::Success { token }
            }
            _ => PrevalidateSsoResult::Failure { message: None },
        };
    }
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.is_empty());
    PrevalidateSsoResult::Failure { message }
}

#[async_trait]
impl SsoPrevalidator for IdentityClient {
    async fn prevalidate_sso(&self, org_identifier: &str) -> PrevalidateSsoResult {
        let url = self.prevalidate_url(org_identifier);
        let response = match self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "SSO prevalidate request failed");
                return PrevalidateSsoResult::Failure { message: None };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%status, error = %e, "Failed to read SSO prevalidate response");
                return PrevalidateSsoResult::Failure { message: None };
            }
        };
        tracing::debug!(%status, "SSO prevalidate response");
        parse_prevalidate_response(status, &body)
    }
}

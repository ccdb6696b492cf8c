use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::domains::members::types::{IncentiveBatch, IncentiveBatchOutcome};
use crate::kernel::BaseIncentiveEngine;

/// Incentive Engine Client
/// Applies referral payouts for one generation window via the external
/// incentive service's HTTP API
pub struct IncentiveClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct IncentiveRequest {
    upline_id: Uuid,
    role: String,
    user_id: Uuid,
    code: String,
    from_generation: i32,
    to_generation: i32,
}

#[derive(Debug, Deserialize)]
struct IncentiveResponse {
    success: bool,
    next_generation: Option<i32>,
    message: Option<String>,
}

impl IncentiveClient {
    pub fn new(base_url: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_token,
        }
    }
}

#[async_trait]
impl BaseIncentiveEngine for IncentiveClient {
    async fn apply_referral_incentives(
        &self,
        batch: &IncentiveBatch,
    ) -> Result<IncentiveBatchOutcome> {
        let request_body = IncentiveRequest {
            upline_id: batch.upline_id,
            role: batch.role.clone(),
            user_id: batch.member_id,
            code: batch.code.clone(),
            from_generation: batch.from_generation,
            to_generation: batch.to_generation,
        };

        let mut request = self
            .client
            .post(format!("{}/incentives/apply", self.base_url))
            .json(&request_body);

        if let Some(token) = &self.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        info!(
            "Applying referral incentives for generations {}-{}",
            batch.from_generation, batch.to_generation
        );

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            error!("Incentive engine returned {}: {}", status, body);
            anyhow::bail!("incentive engine API error {}: {}", status, body);
        }

        let incentive_response: IncentiveResponse = response.json().await?;

        if !incentive_response.success {
            let reason = incentive_response
                .message
                .unwrap_or_else(|| "no reason given".to_string());
            error!("Incentive batch rejected: {}", reason);
            anyhow::bail!("incentive batch rejected: {}", reason);
        }

        Ok(IncentiveBatchOutcome {
            next_generation: incentive_response.next_generation,
            message: incentive_response.message,
        })
    }
}

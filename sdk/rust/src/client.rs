use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub user_id: String,
    pub network: String,
    pub address: String,
}

/// Result of a claim. `message` is the text to relay to the chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimResponse {
    Sent { tx_hash: String, message: String },
    Cooldown { remaining_secs: u64, message: String },
    Failed { error: String, message: String },
}

impl ClaimResponse {
    pub fn message(&self) -> &str {
        match self {
            ClaimResponse::Sent { message, .. }
            | ClaimResponse::Cooldown { message, .. }
            | ClaimResponse::Failed { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub chain_id: u64,
    pub prompt: String,
}

pub struct FaucetClient {
    client: Client,
    base_url: String,
    bot_token: String,
}

impl FaucetClient {
    pub fn new(base_url: &str, bot_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.to_string(),
        }
    }

    /// Submit a claim. Cooldowns and dispensation failures come back as
    /// `Ok` with the matching variant; only transport and auth problems
    /// are errors.
    pub async fn claim(&self, req: &ClaimRequest) -> Result<ClaimResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/api/v1/claims", self.base_url))
            .bearer_auth(&self.bot_token)
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        match serde_json::from_str::<ClaimResponse>(&text) {
            Ok(claim) => Ok(claim),
            Err(_) => Err(format!("Faucet returned status {}: {}", status, text).into()),
        }
    }

    /// Networks the faucet serves.
    pub async fn networks(&self) -> Result<Vec<NetworkInfo>, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/api/v1/networks", self.base_url))
            .bearer_auth(&self.bot_token)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(format!("Faucet returned status {}", status).into());
        }
        Ok(resp.json().await?)
    }

    /// Liveness probe; `true` when the service answers `/health`.
    pub async fn health(&self) -> Result<bool, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// `GET /admin/status` with the operator key.
    pub async fn admin_status(&self, admin_key: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/admin/status", self.base_url))
            .bearer_auth(admin_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("Admin API returned status {}", status).into());
        }
        Ok(resp.json().await?)
    }
}

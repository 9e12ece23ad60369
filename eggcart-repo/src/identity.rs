//! GoTrue (Supabase Auth) admin identity adapter.

use std::time::Duration;

use eggcart_types::{EmailAddress, IdentityError, IdentityProvider, NewUser};

/// Admin-API client for the hosted identity provider.
///
/// Uses the service-role key; must never be exposed to clients. Missing
/// configuration surfaces at first use, not at startup.
pub struct GoTrueIdentity {
    http: reqwest::Client,
    base_url: Option<String>,
    service_key: Option<String>,
}

impl GoTrueIdentity {
    /// Builds the client from `SUPABASE_URL` and
    /// `SUPABASE_SERVICE_ROLE_KEY`.
    pub fn from_env() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            base_url: std::env::var("SUPABASE_URL")
                .ok()
                .map(|u| u.trim_end_matches('/').to_string()),
            service_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
        }
    }

    fn credentials(&self) -> Result<(&str, &str), IdentityError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| IdentityError::Config("SUPABASE_URL is not set".into()))?;
        let key = self
            .service_key
            .as_deref()
            .ok_or_else(|| IdentityError::Config("SUPABASE_SERVICE_ROLE_KEY is not set".into()))?;
        Ok((base, key))
    }
}

#[async_trait::async_trait]
impl IdentityProvider for GoTrueIdentity {
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<String>, IdentityError> {
        let (base, key) = self.credentials()?;

        let resp = self
            .http
            .get(format!("{}/auth/v1/admin/users", base))
            .query(&[("email", email.as_str())])
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(IdentityError::Provider(format!(
                "User lookup failed: HTTP {}",
                resp.status()
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        // The admin endpoint filters loosely; confirm the match against the
        // normalized address before trusting it.
        let user_id = body
            .get("users")
            .and_then(|u| u.as_array())
            .into_iter()
            .flatten()
            .find(|user| {
                user.get("email")
                    .and_then(|e| e.as_str())
                    .map(|e| e.eq_ignore_ascii_case(email.as_str()))
                    .unwrap_or(false)
            })
            .and_then(|user| user.get("id").and_then(|id| id.as_str()))
            .map(String::from);

        Ok(user_id)
    }

    async fn create_user(&self, user: NewUser) -> Result<String, IdentityError> {
        let (base, key) = self.credentials()?;

        let body = serde_json::json!({
            "email": user.email.as_str(),
            "password": user.password,
            // The OTP round-trip already proved mailbox ownership.
            "email_confirm": true,
            "user_metadata": { "full_name": user.full_name },
        });

        let resp = self
            .http
            .post(format!("{}/auth/v1/admin/users", base))
            .header("apikey", key)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        if !status.is_success() {
            let detail = body
                .get("msg")
                .or_else(|| body.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(IdentityError::Provider(detail));
        }

        body.get("id")
            .and_then(|id| id.as_str())
            .map(String::from)
            .ok_or_else(|| IdentityError::Provider("User creation returned no id".into()))
    }
}

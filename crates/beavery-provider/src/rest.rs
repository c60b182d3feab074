//! REST query layer client for the `users` table.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::auth::check;
use crate::error::ProviderError;

#[derive(Clone)]
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct NameRow {
    name: Option<String>,
}

impl RestClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn users_by_email_url(&self, email: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/rest/v1/users", self.base_url);
        let filter = format!("eq.{email}");
        Url::parse_with_params(&base, [("select", "name"), ("email", filter.as_str())]).map_err(
            |e| ProviderError::Api {
                status: 0,
                code: None,
                message: format!("invalid provider url: {e}"),
            },
        )
    }

    /// Stored name of the user with `email`, read with the caller's own
    /// token so row-level security applies.
    ///
    /// `Ok(None)` when no row exists or the row has no non-blank name.
    /// More than one matching row is an error.
    pub async fn find_user_name(
        &self,
        access_token: &str,
        email: &str,
    ) -> Result<Option<String>, ProviderError> {
        let resp = self
            .client
            .get(self.users_by_email_url(email)?)
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        let rows: Vec<NameRow> = check(resp).await?.json().await?;
        pick_single_name(rows)
    }
}

fn pick_single_name(rows: Vec<NameRow>) -> Result<Option<String>, ProviderError> {
    if rows.len() > 1 {
        return Err(ProviderError::Api {
            status: 406,
            code: Some("PGRST116".to_owned()),
            message: format!("expected at most one user row, got {}", rows.len()),
        });
    }
    Ok(rows
        .into_iter()
        .next()
        .and_then(|row| row.name)
        .filter(|name| !name.trim().is_empty()))
}

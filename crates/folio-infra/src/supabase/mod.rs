//! Supabase (PostgREST) storage backend.
//!
//! A thin reqwest client over `{url}/rest/v1/{table}`. The service role key
//! is sent as both the `apikey` header and the bearer token, and is only
//! exposed while building request headers.

pub mod conversation;
pub mod knowledge;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use folio_types::error::RepositoryError;

/// HTTP client bound to one Supabase project.
///
/// Does NOT derive Debug: it holds the service role key.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_key: SecretString,
}

impl SupabaseClient {
    pub fn new(
        url: &str,
        service_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            service_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.service_key.expose_secret();
        builder
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    /// `GET /rest/v1/{table}` with PostgREST query parameters.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, RepositoryError> {
        let response = self
            .authorized(self.http.get(self.table_url(table)))
            .query(params)
            .send()
            .await
            .map_err(|e| RepositoryError::Connection(format!("{table}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(table, status.as_u16(), &body));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| RepositoryError::Decode(format!("{table}: {e}")))
    }

    /// `POST /rest/v1/{table}` without echoing the inserted row back.
    pub(crate) async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), RepositoryError> {
        let response = self
            .authorized(self.http.post(self.table_url(table)))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| RepositoryError::Connection(format!("{table}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(table, status.as_u16(), &body));
        }

        Ok(())
    }
}

fn map_status(table: &str, status: u16, body: &str) -> RepositoryError {
    match status {
        401 | 403 => RepositoryError::Connection(format!("{table}: unauthorized (HTTP {status})")),
        404 => RepositoryError::Query(format!("{table}: relation not found")),
        _ => RepositoryError::Query(format!("{table}: HTTP {status}: {body}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(
            url,
            SecretString::from("service-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = client("https://abc.supabase.co/");
        assert_eq!(
            client.table_url("skills"),
            "https://abc.supabase.co/rest/v1/skills"
        );
    }

    #[test]
    fn test_map_status() {
        assert!(matches!(
            map_status("skills", 401, ""),
            RepositoryError::Connection(_)
        ));
        assert!(matches!(
            map_status("skills", 404, ""),
            RepositoryError::Query(_)
        ));
        let err = map_status("skills", 500, "boom");
        assert!(err.to_string().contains("HTTP 500: boom"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let client = client("http://127.0.0.1:9");
        let err = client
            .select::<serde_json::Value>("skills", &[("select", "*".to_string())])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Connection(_)));
    }
}

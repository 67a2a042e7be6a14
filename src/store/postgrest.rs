//! HTTP client for a hosted PostgREST endpoint (Supabase)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde_json::Value;

use super::{Filter, Table, TableStore};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Table store backed by the PostgREST API of a hosted project
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    key: String,
    schema: String,
}

impl PostgrestStore {
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            schema: config.schema.clone(),
        })
    }

    fn table_url(&self, table: Table, filters: &[Filter]) -> StoreResult<Url> {
        let endpoint = format!("{}/rest/v1/{}", self.base_url, table.name());
        Url::parse_with_params(&endpoint, query_params(filters)).map_err(|e| {
            StoreError::Rejected {
                status: 400,
                message: format!("Invalid store URL {}: {}", endpoint, e),
            }
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method.clone(), url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key);

        if method == Method::GET {
            builder.header("Accept-Profile", &self.schema)
        } else {
            builder
                .header("Content-Profile", &self.schema)
                .header("Prefer", "return=representation")
        }
    }

    async fn execute(
        &self,
        method: Method,
        table: Table,
        filters: &[Filter],
        body: Option<&Value>,
    ) -> StoreResult<Vec<Value>> {
        let url = self.table_url(table, filters)?;
        tracing::debug!(%method, %table, url = %url, "Store request");

        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        read_rows(request.send().await?).await
    }
}

#[async_trait]
impl TableStore for PostgrestStore {
    async fn insert(&self, table: Table, row: Value) -> StoreResult<u64> {
        let rows = self.execute(Method::POST, table, &[], Some(&row)).await?;
        Ok(rows.len() as u64)
    }

    async fn select(&self, table: Table, filters: Vec<Filter>) -> StoreResult<Vec<Value>> {
        self.execute(Method::GET, table, &filters, None).await
    }

    async fn update(&self, table: Table, patch: Value, filters: Vec<Filter>) -> StoreResult<u64> {
        let rows = self.execute(Method::PATCH, table, &filters, Some(&patch)).await?;
        Ok(rows.len() as u64)
    }

    async fn delete(&self, table: Table, filters: Vec<Filter>) -> StoreResult<u64> {
        let rows = self.execute(Method::DELETE, table, &filters, None).await?;
        Ok(rows.len() as u64)
    }
}

/// Encode filters as PostgREST query parameters
pub(crate) fn query_params(filters: &[Filter]) -> Vec<(&'static str, String)> {
    filters
        .iter()
        .map(|filter| {
            let expr = match filter {
                Filter::Eq(_, value) => format!("eq.{}", render_value(value)),
                Filter::ILike(_, keyword) => format!("ilike.*{}*", keyword),
                Filter::In(_, values) => {
                    let list: Vec<String> = values.iter().map(render_list_value).collect();
                    format!("in.({})", list.join(","))
                }
                Filter::IsNull(_) => "is.null".to_string(),
            };
            (filter.column(), expr)
        })
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_list_value(value: &Value) -> String {
    match value {
        // Quoted so commas and parentheses inside strings survive
        Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        other => other.to_string(),
    }
}

async fn read_rows(response: Response) -> StoreResult<Vec<Value>> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        return match serde_json::from_str::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        };
    }

    let message = error_message(&body);
    if status.is_client_error() {
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(StoreError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// PostgREST errors are `{"code", "message", "details", "hint"}` objects
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

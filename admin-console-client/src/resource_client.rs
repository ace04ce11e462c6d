//! reqwest-backed [`ResourceClient`]

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{classify_failure, ClientError, Operation, Result};
use crate::http_client::HttpUtils;
use crate::traits::ResourceClient;
use crate::types::{Record, UpdateMethod};
use crate::utils::log_sanitizer::truncate_for_log;

/// REST client for one resource collection.
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: reqwest::Client,
    resource: String,
    collection_url: String,
    update_method: UpdateMethod,
}

impl HttpResourceClient {
    /// Build a client with its own HTTP connection pool.
    pub fn new(config: &ClientConfig, resource: impl Into<String>) -> Result<Self> {
        let resource = resource.into();
        let client = config
            .build_http_client()
            .map_err(|e| ClientError::Transport {
                resource: resource.clone(),
                detail: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client, config, resource))
    }

    /// Build a client sharing an existing connection pool.
    pub fn with_client(
        client: reqwest::Client,
        config: &ClientConfig,
        resource: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        Self {
            collection_url: config.collection_url(&resource),
            client,
            resource,
            update_method: config.update_method,
        }
    }

    /// `{base}/{prefix}/{resource}`
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// `{base}/{prefix}/{resource}/{key}` with the key percent-encoded.
    pub fn item_url(&self, key: &str) -> String {
        format!("{}/{}", self.collection_url, urlencoding::encode(key))
    }

    fn serialize(&self, record: &Record) -> Result<String> {
        serde_json::to_string(record).map_err(|e| ClientError::Serialization {
            resource: self.resource.clone(),
            detail: e.to_string(),
        })
    }

    /// Send a request and fail on non-2xx, returning the success body.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        op: Operation,
        key: Option<&str>,
        method_name: &str,
        url: &str,
    ) -> Result<String> {
        let (status, body) =
            HttpUtils::execute_request(request, &self.resource, method_name, url).await?;

        if HttpUtils::is_success(status) {
            return Ok(body);
        }

        let err = classify_failure(&self.resource, op, key, status, &body);
        if err.is_expected() {
            log::warn!("[{}] {method_name} {url} failed: {err}", self.resource);
        } else {
            log::error!("[{}] {method_name} {url} failed: {err}", self.resource);
        }
        Err(err)
    }

    /// Interpret a create/update success body.
    ///
    /// Members of a returned object are laid over the submitted record, so
    /// server-assigned fields come back without losing submitted ones. An
    /// empty body or a non-object leaves the submitted record unchanged.
    fn merge_returned(&self, body: &str, submitted: &Record) -> Result<Record> {
        if body.trim().is_empty() {
            return Ok(submitted.clone());
        }
        match HttpUtils::parse_json::<Value>(body, &self.resource)? {
            Value::Object(map) => {
                let mut merged = submitted.clone();
                for (field, value) in map {
                    merged.set(field, value);
                }
                Ok(merged)
            }
            other => {
                log::debug!(
                    "[{}] Mutation response is not an object ({}), keeping submitted record",
                    self.resource,
                    json_kind(&other)
                );
                Ok(submitted.clone())
            }
        }
    }

    /// Coerce a list body into records.
    ///
    /// A JSON value that is not an array becomes an empty list; array members
    /// that are not objects are dropped. Both cases are logged.
    fn coerce_list(&self, body: &str) -> Result<Vec<Record>> {
        let value: Value = HttpUtils::parse_json(body, &self.resource)?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                log::warn!(
                    "[{}] List response is {}, not an array; treating as empty: {}",
                    self.resource,
                    json_kind(&other),
                    truncate_for_log(body)
                );
                return Ok(Vec::new());
            }
        };

        let total = items.len();
        let records: Vec<Record> = items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Record::from(map)),
                _ => None,
            })
            .collect();

        if records.len() != total {
            log::warn!(
                "[{}] Dropped {} non-object list entries",
                self.resource,
                total - records.len()
            );
        }
        Ok(records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn get_all(&self) -> Result<Vec<Record>> {
        let url = &self.collection_url;
        let request = self.client.get(url).header("Accept", "application/json");
        let body = self.send(request, Operation::GetAll, None, "GET", url).await?;
        let records = self.coerce_list(&body)?;
        log::debug!("[{}] Loaded {} records", self.resource, records.len());
        Ok(records)
    }

    async fn create(&self, record: &Record) -> Result<Record> {
        let url = &self.collection_url;
        let request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(self.serialize(record)?);
        let body = self.send(request, Operation::Create, None, "POST", url).await?;
        self.merge_returned(&body, record)
    }

    async fn update(&self, key: &str, record: &Record) -> Result<Record> {
        let url = self.item_url(key);
        let method = self.update_method.as_reqwest();
        let method_name = method.as_str().to_string();
        let request = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(self.serialize(record)?);
        let body = self
            .send(request, Operation::Update, Some(key), &method_name, &url)
            .await?;
        self.merge_returned(&body, record)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let url = self.item_url(key);
        let request = self.client.delete(&url);
        self.send(request, Operation::Delete, Some(key), "DELETE", &url)
            .await?;
        Ok(())
    }
}

//! 测试辅助模块
//!
//! 提供内存版 `ResourceClient` mock 和便捷的测试工厂方法。

use std::sync::Arc;

use admin_console_client::{ClientError, Operation, Record, ResourceClient, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use crate::services::ListController;
use crate::types::ResourceSchema;

/// A call received by [`MockResourceClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    Create(Record),
    Update { key: String, record: Record },
    Delete { key: String },
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetAll => Operation::GetAll,
            Self::Create(_) => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
        }
    }
}

// ===== MockResourceClient =====

/// In-memory resource collection that records every call.
pub struct MockResourceClient {
    resource: String,
    key_field: String,
    records: RwLock<Vec<Record>>,
    next_id: Mutex<u64>,
    calls: Mutex<Vec<Call>>,
    /// 为 Some 时，对应操作返回此错误
    failures: Mutex<Vec<(Operation, ClientError)>>,
}

impl MockResourceClient {
    pub fn new(resource: &str, key_field: &str) -> Self {
        Self {
            resource: resource.to_string(),
            key_field: key_field.to_string(),
            records: RwLock::new(Vec::new()),
            next_id: Mutex::new(1),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Seed the collection. Ids continue after the seeded count.
    pub fn with_records(self, records: Vec<Record>) -> Self {
        let next = records.len() as u64 + 1;
        Self {
            records: RwLock::new(records),
            next_id: Mutex::new(next),
            ..self
        }
    }

    /// Make every call to `op` fail with `error` until cleared.
    pub async fn fail_on(&self, op: Operation, error: ClientError) {
        let mut failures = self.failures.lock().await;
        failures.retain(|(o, _)| *o != op);
        failures.push((op, error));
    }

    pub async fn clear_failures(&self) {
        self.failures.lock().await.clear();
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, op: Operation) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.operation() == op)
            .count()
    }

    pub async fn stored(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    async fn record_call(&self, call: Call) -> Result<()> {
        let op = call.operation();
        self.calls.lock().await.push(call);
        let failures = self.failures.lock().await;
        match failures.iter().find(|(o, _)| *o == op) {
            Some((_, error)) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn not_found(&self, key: &str) -> ClientError {
        ClientError::NotFound {
            resource: self.resource.clone(),
            key: key.to_string(),
            message: None,
        }
    }

    fn position(&self, records: &[Record], key: &str) -> Option<usize> {
        records
            .iter()
            .position(|r| r.key_string(&self.key_field).as_deref() == Some(key))
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn get_all(&self) -> Result<Vec<Record>> {
        self.record_call(Call::GetAll).await?;
        Ok(self.records.read().await.clone())
    }

    async fn create(&self, record: &Record) -> Result<Record> {
        self.record_call(Call::Create(record.clone())).await?;
        let mut next_id = self.next_id.lock().await;
        let mut created = record.clone();
        created.set(self.key_field.as_str(), Value::from(*next_id));
        *next_id += 1;
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, key: &str, record: &Record) -> Result<Record> {
        self.record_call(Call::Update {
            key: key.to_string(),
            record: record.clone(),
        })
        .await?;
        let mut records = self.records.write().await;
        let idx = self.position(&records, key).ok_or_else(|| self.not_found(key))?;
        let stored = &mut records[idx];
        for (field, value) in record.as_map() {
            stored.set(field.as_str(), value.clone());
        }
        Ok(stored.clone())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.record_call(Call::Delete {
            key: key.to_string(),
        })
        .await?;
        let mut records = self.records.write().await;
        let idx = self.position(&records, key).ok_or_else(|| self.not_found(key))?;
        records.remove(idx);
        Ok(())
    }
}

// ===== 工厂方法 =====

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    serde_json::from_value(value).unwrap_or_default()
}

/// Controller over a seeded mock, plus the mock for assertions.
pub fn create_test_controller(
    schema: ResourceSchema,
    seed: Vec<Record>,
) -> (ListController, Arc<MockResourceClient>) {
    let client = Arc::new(
        MockResourceClient::new(&schema.resource, &schema.key_field).with_records(seed),
    );
    let controller = ListController::new(client.clone(), schema);
    (controller, client)
}

/// Server-side failure carrying a message.
pub fn server_error(resource: &str, message: &str) -> ClientError {
    ClientError::Server {
        resource: resource.to_string(),
        status: 500,
        message: message.to_string(),
    }
}

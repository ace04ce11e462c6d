use async_trait::async_trait;

use crate::error::Result;
use crate::types::Record;

/// CRUD client for one REST resource.
///
/// Every call is a fresh round trip: no retries, no caching. Idempotence of
/// `update`/`delete` on keys that no longer exist is up to the server.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Resource name (the last path segment of the collection URL).
    fn resource(&self) -> &str;

    /// 获取全部记录（保持服务端顺序）
    async fn get_all(&self) -> Result<Vec<Record>>;

    /// 创建记录，返回服务端合并了自动字段后的记录
    async fn create(&self, record: &Record) -> Result<Record>;

    /// 按主键更新记录
    async fn update(&self, key: &str, record: &Record) -> Result<Record>;

    /// 按主键删除记录
    async fn delete(&self, key: &str) -> Result<()>;
}

//! 变更操作

use admin_console_client::{ResourceClient, Result as ClientResult};

use crate::types::{Record, Submission};

/// One mutating call, ready to send.
///
/// Produced by [`ListController::begin_submit`](super::ListController::begin_submit)
/// after validation has passed.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Record),
    Update { key: String, record: Record },
    Delete { key: String },
}

impl Mutation {
    /// Workflow marker for this call.
    #[must_use]
    pub fn submission(&self) -> Submission {
        match self {
            Self::Create(_) => Submission::Create,
            Self::Update { key, .. } => Submission::Update { key: key.clone() },
            Self::Delete { key } => Submission::Delete { key: key.clone() },
        }
    }

    /// Send the call. The returned record is not kept: the collection is
    /// re-fetched after every successful mutation.
    pub async fn apply(&self, client: &dyn ResourceClient) -> ClientResult<()> {
        match self {
            Self::Create(record) => client.create(record).await.map(drop),
            Self::Update { key, record } => client.update(key, record).await.map(drop),
            Self::Delete { key } => client.delete(key).await,
        }
    }
}

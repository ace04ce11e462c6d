use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::HttpUtils;

/// The client operation a failure belongs to.
///
/// Classification of non-2xx responses depends on it: a 404 only means
/// "record not found" for keyed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// `GET /api/{resource}`
    GetAll,
    /// `POST /api/{resource}`
    Create,
    /// `PUT|PATCH /api/{resource}/{key}`
    Update,
    /// `DELETE /api/{resource}/{key}`
    Delete,
}

impl Operation {
    /// Whether the operation addresses a single record by key.
    pub fn is_keyed(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// Whether the operation changes server state.
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::GetAll)
    }
}

/// Unified error type for all resource client operations.
///
/// Each variant names the resource that produced it. All variants are
/// serializable for structured error reporting.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// The network was unreachable, or the server answered non-2xx without a
    /// structured message.
    #[error("[{resource}] Transport error: {detail}")]
    Transport {
        /// Resource the call addressed.
        resource: String,
        /// Error details.
        detail: String,
    },

    /// The server answered non-2xx with a structured message.
    #[error("[{resource}] Server error (HTTP {status}): {message}")]
    Server {
        /// Resource the call addressed.
        resource: String,
        /// HTTP status code.
        status: u16,
        /// Message taken verbatim from the response body.
        message: String,
    },

    /// The server refused a create/update/delete (4xx).
    #[error("[{resource}] Rejected (HTTP {status}): {message}")]
    Rejected {
        /// Resource the call addressed.
        resource: String,
        /// HTTP status code.
        status: u16,
        /// Server message, raw body, or status line.
        message: String,
    },

    /// A keyed update/delete addressed a key the server does not know.
    #[error("[{resource}] Record '{key}' not found")]
    NotFound {
        /// Resource the call addressed.
        resource: String,
        /// Key that was not found.
        key: String,
        /// Original server message, if any.
        message: Option<String>,
    },

    /// A successful response body was not valid JSON.
    #[error("[{resource}] Parse error: {detail}")]
    Parse {
        /// Resource the call addressed.
        resource: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    #[error("[{resource}] Serialization error: {detail}")]
    Serialization {
        /// Resource the call addressed.
        resource: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ClientError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::NotFound { .. })
    }

    /// Whether the failure belongs to the transport family (network, unstructured
    /// non-2xx, unreadable body).
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Parse { .. })
    }

    /// The single message shown to the user in the error banner.
    ///
    /// Structured server messages are returned verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } | Self::Rejected { message, .. } => message.clone(),
            Self::NotFound {
                message: Some(message),
                ..
            } => message.clone(),
            Self::NotFound { key, .. } => format!("Record '{key}' no longer exists"),
            Self::Transport { detail, .. } => format!("Unable to reach the server: {detail}"),
            Self::Parse { .. } => "The server returned an unreadable response".to_string(),
            Self::Serialization { detail, .. } => format!("Could not encode the request: {detail}"),
        }
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Map a non-2xx response to a [`ClientError`].
///
/// * `get_all`: structured message → `Server`, otherwise `Transport`.
/// * keyed operation with 404 → `NotFound`.
/// * mutation with any other 4xx → `Rejected`.
/// * otherwise: structured message → `Server`, else `Transport`.
pub fn classify_failure(
    resource: &str,
    op: Operation,
    key: Option<&str>,
    status: u16,
    body: &str,
) -> ClientError {
    let structured = HttpUtils::extract_message(body);

    if op.is_keyed() && status == 404 {
        return ClientError::NotFound {
            resource: resource.to_string(),
            key: key.unwrap_or_default().to_string(),
            message: structured,
        };
    }

    if op.is_mutation() && (400..500).contains(&status) {
        let message = structured.unwrap_or_else(|| {
            let raw = body.trim();
            if raw.is_empty() {
                format!("HTTP {status}")
            } else {
                raw.to_string()
            }
        });
        return ClientError::Rejected {
            resource: resource.to_string(),
            status,
            message,
        };
    }

    match structured {
        Some(message) => ClientError::Server {
            resource: resource.to_string(),
            status,
            message,
        },
        None => ClientError::Transport {
            resource: resource.to_string(),
            detail: format!("HTTP {status}"),
        },
    }
}

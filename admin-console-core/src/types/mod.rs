//! 类型定义模块

mod schema;
mod view_state;
mod workflow;

pub use schema::{FieldKind, FieldSpec, ResourceSchema};
pub use view_state::{PageView, SortConfig, SortDirection, ViewState, DEFAULT_PAGE_SIZE};
pub use workflow::{FormMode, Notice, Submission, Workflow};

// Re-export client 库的公共类型
pub use admin_console_client::{ClientError, Record, UpdateMethod};

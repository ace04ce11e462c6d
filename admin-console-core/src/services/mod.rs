//! 业务逻辑服务层

mod list_controller;
mod mutation;

pub use list_controller::{ControllerSettings, ListController, DEFAULT_NOTICE_TTL};
pub use mutation::Mutation;

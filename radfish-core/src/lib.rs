//! Radfish 通用硬件管理接口
//!
//! 定义所有厂商适配器共享的契约：
//!
//! - **错误分类** (`RadfishError`, `ErrorKind`): 厂商错误统一归类
//! - **数据模型** (`models`): 每种实体一个结构体，字段缺失即为 `None`
//! - **能力接口** (`traits`): 电源、硬件清单、存储、虚拟介质、启动、任务、管理
//!
//! # 示例
//!
//! ```ignore
//! use radfish_core::{BmcAdapter, PowerManagement, ShutdownMode};
//!
//! async fn shutdown(adapter: &dyn BmcAdapter) -> radfish_core::Result<()> {
//!     // 正常关机并等待电源状态变为 Off
//!     adapter.power_off(ShutdownMode::Graceful, true).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod traits;

pub use error::{ErrorKind, RadfishError, Result};
pub use models::*;
pub use traits::{
    BmcAdapter, BootManagement, Inventory, JobManagement, PowerManagement, RequestMethod,
    SessionManagement, StorageManagement, Utility, VirtualMediaManagement,
    DEFAULT_ACCOUNT_ROLE, DEFAULT_JOB_TIMEOUT,
};

//! Radfish Supermicro 适配器
//!
//! 把 Supermicro BMC 客户端适配到 `radfish_core` 的通用接口：
//!
//! - **厂商客户端接口** (`client`): 适配器依赖的 `SupermicroApi` 及可选能力
//! - **配置** (`config`): 连接参数与电源等待参数，支持 TOML 文件
//! - **错误分类** (`error`): 按错误信息把厂商错误映射为 `ErrorKind`
//! - **数据标准化** (`normalize`): 厂商 JSON 转换为标准化记录
//! - **电源收敛** (`power`): 一次性电源命令加有界轮询
//! - **适配器** (`adapter`): `SupermicroAdapter`，实现全部通用接口
//!
//! # 示例
//!
//! ```ignore
//! use radfish_core::{PowerManagement, ShutdownMode};
//! use radfish_supermicro::{AdapterConfig, SupermicroAdapter};
//!
//! let config = AdapterConfig::load_default()?;
//! let adapter = SupermicroAdapter::from_config(&config, |opts| MyClient::connect(opts))?;
//!
//! // 重启并等待电源状态先变为 Off 再变为 On
//! adapter.reboot(ShutdownMode::Graceful, true).await?;
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod power;

pub use adapter::{handles_vendor, SupermicroAdapter, VENDOR, VENDOR_ALIASES};
pub use client::{Capabilities, Capability, ClientError, ClientResult, SupermicroApi};
pub use config::{AdapterConfig, ClientOptions, PowerWaitConfig};
pub use error::{classify, classify_eject, classify_message};
pub use power::{ConvergenceOutcome, ConvergenceRequest, PollObserver, TracingObserver};

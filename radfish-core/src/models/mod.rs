//! Radfish 标准化数据模型
//!
//! 每种实体对应一个结构体，所有字段均为 `Option` 或 `Vec`：
//! 厂商数据中缺失的字段为 `None`，不会用占位值填充。

pub mod admin;
pub mod boot;
pub mod inventory;
pub mod media;
pub mod power;
pub mod storage;

pub use admin::{
    Account, BmcInfo, BmcNetwork, BmcNetworkSettings, Job, JobsSummary, License, SelEntry,
    ServiceInfo, Session,
};
pub use boot::{BootMode, BootOption, BootPersistence, BootSettings, BootTarget};
pub use inventory::{
    Cpu, Fan, MemoryModule, Nic, NicPort, Psu, SystemHealth, SystemInfo, TemperatureSensor,
};
pub use media::{VirtualMedia, VirtualMediaStatus};
pub use power::{PowerConsumption, PowerState, PowerTransition, ResetType, ShutdownMode};
pub use storage::{Drive, StorageController, StorageSummary, Volume};

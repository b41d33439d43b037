//! 存储相关类型

use serde::{Deserialize, Serialize};

/// 存储控制器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageController {
    pub id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    pub health: Option<String>,
    /// 控制器下的磁盘
    pub drives: Vec<Drive>,
}

/// 物理磁盘
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    /// HDD / SSD
    pub media_type: Option<String>,
    /// SATA / SAS / NVMe
    pub protocol: Option<String>,
    pub capacity_bytes: Option<u64>,
    pub health: Option<String>,
    pub failure_predicted: Option<bool>,
}

/// 逻辑卷
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub id: Option<String>,
    pub name: Option<String>,
    pub raid_type: Option<String>,
    pub capacity_bytes: Option<u64>,
    pub health: Option<String>,
    /// 组成该卷的磁盘 ID
    pub drives: Vec<String>,
}

/// 存储汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSummary {
    pub controller_count: Option<u32>,
    pub drive_count: Option<u32>,
    pub volume_count: Option<u32>,
    pub total_capacity_bytes: Option<u64>,
}

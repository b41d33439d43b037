//! 系统硬件清单

use serde::{Deserialize, Serialize};

use super::power::PowerState;

/// 系统信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// 服务标签（由 BMC UUID 末段或序列号得出）
    pub service_tag: Option<String>,
    pub manufacturer: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub serial_number: Option<String>,
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub bios_version: Option<String>,
    pub power_state: Option<PowerState>,
    pub health: Option<String>,
}

/// 处理器
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    pub socket: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub cores: Option<u32>,
    pub threads: Option<u32>,
    pub speed_mhz: Option<u32>,
    pub health: Option<String>,
}

/// 内存条
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryModule {
    pub name: Option<String>,
    pub slot: Option<String>,
    pub manufacturer: Option<String>,
    pub part_number: Option<String>,
    pub serial: Option<String>,
    pub memory_type: Option<String>,
    pub capacity_mb: Option<u64>,
    pub speed_mhz: Option<u32>,
    pub health: Option<String>,
}

/// 网卡
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nic {
    pub id: Option<String>,
    pub name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub mac: Option<String>,
    pub health: Option<String>,
    pub ports: Vec<NicPort>,
}

/// 网卡端口
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NicPort {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mac: Option<String>,
    pub link_status: Option<String>,
    pub speed_mbps: Option<u32>,
    pub ipv4_address: Option<String>,
}

/// 风扇
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fan {
    pub name: Option<String>,
    pub rpm: Option<u32>,
    pub state: Option<String>,
    pub health: Option<String>,
}

/// 温度传感器
///
/// Supermicro 适配器不提供温度读数，始终返回空列表
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSensor {
    pub name: Option<String>,
    pub reading_celsius: Option<f64>,
    pub upper_critical: Option<f64>,
    pub health: Option<String>,
}

/// 电源模块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Psu {
    pub name: Option<String>,
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware_version: Option<String>,
    pub capacity_watts: Option<f64>,
    pub output_watts: Option<f64>,
    pub input_voltage: Option<f64>,
    pub health: Option<String>,
}

/// 系统健康汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub overall: Option<String>,
    pub processors: Option<String>,
    pub memory: Option<String>,
    pub storage: Option<String>,
    pub fans: Option<String>,
    pub power_supplies: Option<String>,
}

//! 任务、日志、账户与 BMC 管理相关类型

use std::net::Ipv4Addr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{RadfishError, Result};

/// BMC 任务
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Option<String>,
    pub name: Option<String>,
    /// 任务状态，例如 Running / Completed / Exception
    pub state: Option<String>,
    pub health: Option<String>,
    pub percent_complete: Option<u8>,
    pub message: Option<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
}

/// 任务汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsSummary {
    pub total: Option<u32>,
    pub running: Option<u32>,
    pub completed: Option<u32>,
    pub failed: Option<u32>,
}

/// 系统事件日志条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelEntry {
    pub id: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub entry_type: Option<String>,
    pub sensor_type: Option<String>,
}

/// BMC 账户
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Option<String>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub enabled: Option<bool>,
    pub locked: Option<bool>,
}

/// BMC 会话
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
}

/// Redfish 服务根信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub redfish_version: Option<String>,
    pub uuid: Option<String>,
}

/// BMC 控制器信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmcInfo {
    pub firmware_version: Option<String>,
    pub model: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub hostname: Option<String>,
    pub health: Option<String>,
}

/// 许可证
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: Option<String>,
    pub name: Option<String>,
    pub license_type: Option<String>,
    pub expiration: Option<String>,
    pub status: Option<String>,
}

/// BMC 网络配置（读取结果）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmcNetwork {
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub gateway: Option<String>,
    pub mac_address: Option<String>,
    pub hostname: Option<String>,
    pub dhcp_enabled: Option<bool>,
    pub dns_servers: Vec<String>,
}

/// BMC 静态网络配置（写入参数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmcNetworkSettings {
    pub ip_address: String,
    pub subnet_mask: String,
    pub gateway: String,
    #[serde(default)]
    pub dns_servers: Vec<String>,
    pub hostname: Option<String>,
}

impl BmcNetworkSettings {
    pub fn new(
        ip_address: impl Into<String>,
        subnet_mask: impl Into<String>,
        gateway: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            subnet_mask: subnet_mask.into(),
            gateway: gateway.into(),
            dns_servers: Vec::new(),
            hostname: None,
        }
    }

    pub fn with_dns_servers(mut self, servers: Vec<String>) -> Self {
        self.dns_servers = servers;
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// 校验所有地址均为合法 IPv4 地址
    pub fn validate(&self) -> Result<()> {
        check_ipv4("ip_address", &self.ip_address)?;
        check_ipv4("subnet_mask", &self.subnet_mask)?;
        check_ipv4("gateway", &self.gateway)?;
        for dns in &self.dns_servers {
            check_ipv4("dns_servers", dns)?;
        }
        if let Some(hostname) = &self.hostname {
            if hostname.trim().is_empty() {
                return Err(RadfishError::InvalidArgument("hostname 不能为空".to_string()));
            }
        }
        Ok(())
    }
}

fn check_ipv4(field: &str, value: &str) -> Result<()> {
    value.trim().parse::<Ipv4Addr>().map(|_| ()).map_err(|_| {
        RadfishError::InvalidArgument(format!("{} 不是合法的 IPv4 地址: {}", field, value))
    })
}

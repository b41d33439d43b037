//! Supermicro 厂商客户端接口
//!
//! 底层 BMC 客户端（HTTP/Redfish 会话、重试、签名）由外部库提供，
//! 适配器只通过 [`SupermicroApi`] 与其交互。所有数据接口返回厂商原始
//! JSON 结构，由 `normalize` 模块转换为标准化记录。

use std::collections::HashSet;

use async_trait::async_trait;
use radfish_core::{BmcNetworkSettings, RequestMethod};
use serde_json::Value;
use thiserror::Error;

/// 厂商客户端错误
#[derive(Error, Debug)]
pub enum ClientError {
    /// 厂商客户端自身的错误，适配器会按错误信息重新分类
    #[error("{0}")]
    Vendor(String),

    /// 其它错误，适配器原样透传
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    pub fn vendor(message: impl Into<String>) -> Self {
        ClientError::Vendor(message.into())
    }
}

/// 厂商客户端结果类型
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// 可选能力
///
/// 并非所有版本的厂商客户端都提供这些接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// 查询许可证
    Licenses,
    /// 激活许可证
    ActivateLicense,
    /// 清除许可证
    ClearLicense,
    /// 检查虚拟介质许可证
    VirtualMediaLicense,
    /// 读取 BIOS 属性
    BiosAttributes,
    /// 修改 BIOS 属性
    SetBiosAttribute,
    /// 读取 BMC 网络协议配置
    ManagerNetworkProtocol,
}

/// 可选能力集合，在适配器构造时确定一次
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    supported: HashSet<Capability>,
}

impl Capabilities {
    /// 空集合（不支持任何可选能力）
    pub fn none() -> Self {
        Self::default()
    }

    /// 全部可选能力
    pub fn all() -> Self {
        [
            Capability::Licenses,
            Capability::ActivateLicense,
            Capability::ClearLicense,
            Capability::VirtualMediaLicense,
            Capability::BiosAttributes,
            Capability::SetBiosAttribute,
            Capability::ManagerNetworkProtocol,
        ]
        .into_iter()
        .collect()
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.supported.insert(capability);
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.supported.contains(&capability)
    }

    pub fn len(&self) -> usize {
        self.supported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supported.is_empty()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            supported: iter.into_iter().collect(),
        }
    }
}

fn unsupported(operation: &str) -> ClientError {
    ClientError::Other(anyhow::anyhow!("厂商客户端不支持 {}", operation))
}

/// Supermicro BMC 客户端
///
/// 一次性命令（开关机、挂载介质等）返回 `bool` 表示 BMC 是否接受；
/// 数据接口返回厂商原始 JSON。
#[async_trait]
pub trait SupermicroApi: Send + Sync {
    /// 客户端支持的可选能力
    fn capabilities(&self) -> Capabilities {
        Capabilities::none()
    }

    /// 调整客户端日志详细程度
    fn set_verbosity(&self, _level: u8) {}

    // ============================================
    // 会话
    // ============================================

    async fn login(&self) -> ClientResult<bool>;

    async fn logout(&self) -> ClientResult<bool>;

    async fn authenticated_request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> ClientResult<Value>;

    // ============================================
    // 电源
    // ============================================

    /// 当前电源状态字符串，例如 "On" / "Off"
    async fn power_status(&self) -> ClientResult<String>;

    async fn power_on(&self) -> ClientResult<bool>;

    async fn power_off(&self, force: bool) -> ClientResult<bool>;

    async fn power_restart(&self, force: bool) -> ClientResult<bool>;

    async fn power_cycle(&self) -> ClientResult<bool>;

    async fn reset_type_allowed(&self) -> ClientResult<Vec<String>>;

    // ============================================
    // 硬件清单
    // ============================================

    async fn system_info(&self) -> ClientResult<Value>;

    async fn cpus(&self) -> ClientResult<Value>;

    async fn memory(&self) -> ClientResult<Value>;

    async fn nics(&self) -> ClientResult<Value>;

    async fn fans(&self) -> ClientResult<Value>;

    async fn psus(&self) -> ClientResult<Value>;

    async fn power_consumption(&self) -> ClientResult<Value>;

    async fn system_health(&self) -> ClientResult<Value>;

    // ============================================
    // 存储
    // ============================================

    async fn storage_controllers(&self) -> ClientResult<Value>;

    async fn drives(&self, controller_id: &str) -> ClientResult<Value>;

    async fn volumes(&self, controller_id: &str) -> ClientResult<Value>;

    async fn storage_summary(&self) -> ClientResult<Value>;

    // ============================================
    // 虚拟介质
    // ============================================

    async fn virtual_media(&self) -> ClientResult<Value>;

    async fn insert_virtual_media(&self, url: &str, device: Option<&str>) -> ClientResult<bool>;

    async fn eject_virtual_media(&self, device: Option<&str>) -> ClientResult<bool>;

    async fn virtual_media_status(&self) -> ClientResult<Value>;

    async fn mount_iso_and_boot(&self, url: &str, device: Option<&str>) -> ClientResult<bool>;

    async fn unmount_all_media(&self) -> ClientResult<bool>;

    // ============================================
    // 启动配置
    // ============================================

    async fn boot_options(&self) -> ClientResult<Value>;

    async fn boot_devices(&self) -> ClientResult<Value>;

    /// 参数均为 Redfish 字符串，例如 ("Pxe", Some("Once"), Some("UEFI"))
    async fn set_boot_override(
        &self,
        target: &str,
        persistence: Option<&str>,
        mode: Option<&str>,
    ) -> ClientResult<bool>;

    async fn clear_boot_override(&self) -> ClientResult<bool>;

    async fn set_boot_order(&self, devices: &[String]) -> ClientResult<bool>;

    async fn configure_boot_settings(
        &self,
        persistence: Option<&str>,
        mode: Option<&str>,
    ) -> ClientResult<bool>;

    // ============================================
    // 任务
    // ============================================

    async fn jobs(&self) -> ClientResult<Value>;

    async fn job_status(&self, job_id: &str) -> ClientResult<Value>;

    async fn wait_for_job(&self, job_id: &str, timeout_secs: u64) -> ClientResult<Value>;

    async fn cancel_job(&self, job_id: &str) -> ClientResult<bool>;

    async fn clear_completed_jobs(&self) -> ClientResult<bool>;

    async fn jobs_summary(&self) -> ClientResult<Value>;

    // ============================================
    // 日志、账户与 BMC 管理
    // ============================================

    async fn sel_log(&self) -> ClientResult<Value>;

    async fn clear_sel_log(&self) -> ClientResult<bool>;

    async fn sel_summary(&self, limit: usize) -> ClientResult<Value>;

    async fn accounts(&self) -> ClientResult<Value>;

    async fn create_account(&self, username: &str, password: &str, role: &str)
        -> ClientResult<bool>;

    async fn delete_account(&self, username: &str) -> ClientResult<bool>;

    async fn update_account_password(&self, username: &str, new_password: &str)
        -> ClientResult<bool>;

    async fn sessions(&self) -> ClientResult<Value>;

    async fn service_info(&self) -> ClientResult<Value>;

    async fn get_firmware_version(&self) -> ClientResult<Option<String>>;

    async fn bmc_info(&self) -> ClientResult<Value>;

    async fn get_bmc_network(&self) -> ClientResult<Value>;

    async fn set_bmc_network(&self, settings: &BmcNetworkSettings) -> ClientResult<bool>;

    async fn set_bmc_dhcp(&self) -> ClientResult<bool>;

    // ============================================
    // 可选能力（需在 capabilities() 中声明）
    // ============================================

    async fn licenses(&self) -> ClientResult<Value> {
        Err(unsupported("licenses"))
    }

    async fn activate_license(&self, _license_key: &str) -> ClientResult<bool> {
        Err(unsupported("activate_license"))
    }

    async fn clear_license(&self, _license_id: &str) -> ClientResult<bool> {
        Err(unsupported("clear_license"))
    }

    async fn check_virtual_media_license(&self) -> ClientResult<bool> {
        Err(unsupported("check_virtual_media_license"))
    }

    async fn bios_attributes(&self) -> ClientResult<Value> {
        Err(unsupported("bios_attributes"))
    }

    async fn set_bios_attribute(&self, _name: &str, _value: Value) -> ClientResult<bool> {
        Err(unsupported("set_bios_attribute"))
    }

    async fn manager_network_protocol(&self) -> ClientResult<Value> {
        Err(unsupported("manager_network_protocol"))
    }
}

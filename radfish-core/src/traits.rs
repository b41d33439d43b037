//! Radfish 通用接口
//!
//! 所有厂商适配器都实现以下 trait，调用方只依赖这些接口。

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::*;

/// 创建账户时的默认角色
pub const DEFAULT_ACCOUNT_ROLE: &str = "Administrator";

/// 等待任务完成的默认超时
pub const DEFAULT_JOB_TIMEOUT: Duration = Duration::from_secs(600);

/// 原始请求的 HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMethod::Get => write!(f, "GET"),
            RequestMethod::Post => write!(f, "POST"),
            RequestMethod::Patch => write!(f, "PATCH"),
            RequestMethod::Put => write!(f, "PUT"),
            RequestMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// 会话管理
#[async_trait]
pub trait SessionManagement: Send + Sync {
    /// 登录 BMC
    async fn login(&self) -> Result<bool>;

    /// 注销
    async fn logout(&self) -> Result<bool>;

    /// 发送已认证的原始请求，返回原始 JSON
    async fn authenticated_request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value>;
}

/// 电源管理
#[async_trait]
pub trait PowerManagement: Send + Sync {
    /// 查询当前电源状态
    async fn power_status(&self) -> Result<PowerState>;

    /// 开机
    ///
    /// `wait` 为 true 时轮询直到状态变为 On 或达到最大尝试次数。
    /// 返回值始终是开机命令本身的结果。
    async fn power_on(&self, wait: bool) -> Result<bool>;

    /// 关机
    async fn power_off(&self, mode: ShutdownMode, wait: bool) -> Result<bool>;

    /// 重启
    async fn reboot(&self, mode: ShutdownMode, wait: bool) -> Result<bool>;

    /// 电源循环
    async fn power_cycle(&self, wait: bool) -> Result<bool>;

    /// BMC 支持的 ResetType 列表
    async fn reset_type_allowed(&self) -> Result<Vec<String>>;

    /// 按 Redfish ResetType 字符串执行电源操作
    async fn reset(&self, reset_type: &str, wait: bool) -> Result<bool>;
}

/// 硬件清单
#[async_trait]
pub trait Inventory: Send + Sync {
    async fn system_info(&self) -> Result<SystemInfo>;

    async fn cpus(&self) -> Result<Vec<Cpu>>;

    async fn memory(&self) -> Result<Vec<MemoryModule>>;

    async fn nics(&self) -> Result<Vec<Nic>>;

    async fn fans(&self) -> Result<Vec<Fan>>;

    /// 温度传感器，不支持的厂商返回空列表
    async fn temperatures(&self) -> Result<Vec<TemperatureSensor>>;

    async fn psus(&self) -> Result<Vec<Psu>>;

    async fn power_consumption(&self) -> Result<PowerConsumption>;
}

/// 存储管理
#[async_trait]
pub trait StorageManagement: Send + Sync {
    async fn storage_controllers(&self) -> Result<Vec<StorageController>>;

    /// 指定控制器下的磁盘，`controller_id` 缺失时返回参数错误
    async fn drives(&self, controller_id: Option<&str>) -> Result<Vec<Drive>>;

    /// 指定控制器下的逻辑卷，`controller_id` 缺失时返回参数错误
    async fn volumes(&self, controller_id: Option<&str>) -> Result<Vec<Volume>>;

    async fn storage_summary(&self) -> Result<StorageSummary>;
}

/// 虚拟介质管理
#[async_trait]
pub trait VirtualMediaManagement: Send + Sync {
    async fn virtual_media(&self) -> Result<Vec<VirtualMedia>>;

    async fn insert_virtual_media(&self, url: &str, device: Option<&str>) -> Result<bool>;

    async fn eject_virtual_media(&self, device: Option<&str>) -> Result<bool>;

    async fn virtual_media_status(&self) -> Result<VirtualMediaStatus>;

    /// 挂载 ISO 并设置从光驱启动
    async fn mount_iso_and_boot(&self, url: &str, device: Option<&str>) -> Result<bool>;

    async fn unmount_all_media(&self) -> Result<bool>;
}

/// 启动配置
#[async_trait]
pub trait BootManagement: Send + Sync {
    async fn boot_options(&self) -> Result<Vec<BootOption>>;

    /// 当前启动配置与可用启动设备
    async fn boot_devices(&self) -> Result<BootSettings>;

    async fn set_boot_override(
        &self,
        target: BootTarget,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool>;

    async fn clear_boot_override(&self) -> Result<bool>;

    async fn set_boot_order(&self, devices: &[String]) -> Result<bool>;

    /// 只修改持续性和启动模式，不改变启动目标
    async fn configure_boot_settings(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool>;

    async fn boot_to_pxe(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        self.set_boot_override(BootTarget::Pxe, persistence, mode).await
    }

    async fn boot_to_disk(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        self.set_boot_override(BootTarget::Hdd, persistence, mode).await
    }

    async fn boot_to_cd(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        self.set_boot_override(BootTarget::Cd, persistence, mode).await
    }

    async fn boot_to_usb(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        self.set_boot_override(BootTarget::Usb, persistence, mode).await
    }

    async fn boot_to_bios_setup(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        self.set_boot_override(BootTarget::BiosSetup, persistence, mode).await
    }
}

/// 任务管理
#[async_trait]
pub trait JobManagement: Send + Sync {
    async fn jobs(&self) -> Result<Vec<Job>>;

    async fn job_status(&self, job_id: &str) -> Result<Job>;

    async fn wait_for_job(&self, job_id: &str, timeout: Duration) -> Result<Job>;

    async fn cancel_job(&self, job_id: &str) -> Result<bool>;

    /// 清理已完成的任务
    async fn clear_jobs(&self) -> Result<bool>;

    async fn jobs_summary(&self) -> Result<JobsSummary>;
}

/// 日志、账户、许可证与 BMC 网络等管理功能
///
/// 许可证相关接口属于可选能力：厂商客户端不支持时返回 `Ok(None)`
#[async_trait]
pub trait Utility: Send + Sync {
    async fn sel_log(&self) -> Result<Vec<SelEntry>>;

    async fn clear_sel_log(&self) -> Result<bool>;

    /// 最近的 `limit` 条事件日志
    async fn sel_summary(&self, limit: usize) -> Result<Vec<SelEntry>>;

    async fn accounts(&self) -> Result<Vec<Account>>;

    async fn create_account(&self, username: &str, password: &str, role: &str) -> Result<bool>;

    async fn delete_account(&self, username: &str) -> Result<bool>;

    async fn update_account_password(&self, username: &str, new_password: &str) -> Result<bool>;

    async fn sessions(&self) -> Result<Vec<Session>>;

    async fn service_info(&self) -> Result<ServiceInfo>;

    async fn firmware_version(&self) -> Result<Option<String>>;

    async fn bmc_info(&self) -> Result<BmcInfo>;

    async fn system_health(&self) -> Result<SystemHealth>;

    async fn licenses(&self) -> Result<Option<Vec<License>>>;

    async fn activate_license(&self, license_key: &str) -> Result<Option<bool>>;

    async fn clear_license(&self, license_id: &str) -> Result<Option<bool>>;

    async fn check_virtual_media_license(&self) -> Result<Option<bool>>;

    async fn get_bmc_network(&self) -> Result<BmcNetwork>;

    async fn set_bmc_network(&self, settings: &BmcNetworkSettings) -> Result<bool>;

    async fn set_bmc_dhcp(&self) -> Result<bool>;
}

/// 完整的厂商适配器接口
pub trait BmcAdapter:
    SessionManagement
    + PowerManagement
    + Inventory
    + StorageManagement
    + VirtualMediaManagement
    + BootManagement
    + JobManagement
    + Utility
{
    /// 厂商名称
    fn vendor(&self) -> &'static str;
}

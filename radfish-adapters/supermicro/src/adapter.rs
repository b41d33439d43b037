//! Supermicro 适配器
//!
//! 把 [`SupermicroApi`] 包装为 Radfish 通用接口：
//! 参数在调用前校验，厂商错误经 `error` 模块分类，
//! 厂商数据经 `normalize` 模块转换，电源操作经 `power` 模块等待收敛。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use radfish_core::*;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{Capabilities, Capability, SupermicroApi};
use crate::config::{AdapterConfig, ClientOptions, PowerWaitConfig};
use crate::error::{classify, classify_eject};
use crate::normalize;
use crate::power::{converge, ConvergenceOutcome, ConvergenceRequest, PollObserver, TracingObserver};

/// 厂商名称
pub const VENDOR: &str = "supermicro";

/// 可由本适配器处理的厂商名称
pub const VENDOR_ALIASES: &[&str] = &["supermicro", "smc"];

/// 判断厂商名称是否由本适配器处理（忽略大小写）
pub fn handles_vendor(name: &str) -> bool {
    let name = name.trim();
    VENDOR_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(name))
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RadfishError::InvalidArgument(format!("{} 不能为空", field)));
    }
    Ok(trimmed)
}

fn require_controller(controller_id: Option<&str>) -> Result<&str> {
    match controller_id {
        Some(id) => require(id, "controller_id"),
        None => Err(RadfishError::InvalidArgument(
            "必须指定 controller_id".to_string(),
        )),
    }
}

/// Supermicro BMC 适配器
pub struct SupermicroAdapter<C: SupermicroApi> {
    client: C,
    capabilities: Capabilities,
    power: PowerWaitConfig,
    observer: Arc<dyn PollObserver>,
}

impl<C: SupermicroApi> SupermicroAdapter<C> {
    /// 使用默认电源等待配置创建适配器
    ///
    /// 厂商客户端的可选能力在此时确定，之后不再探测
    pub fn new(client: C) -> Self {
        let capabilities = client.capabilities();
        debug!("Supermicro 客户端可选能力: {} 项", capabilities.len());

        Self {
            client,
            capabilities,
            power: PowerWaitConfig::default(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// 从配置创建适配器
    ///
    /// `factory` 根据连接参数构造厂商客户端
    pub fn from_config<F>(config: &AdapterConfig, factory: F) -> Result<Self>
    where
        F: FnOnce(ClientOptions) -> anyhow::Result<C>,
    {
        config.validate()?;
        info!("创建 Supermicro 适配器: {}", config.base_url());

        let client = factory(config.client_options())?;
        Ok(Self::new(client).with_power_config(config.power.clone()))
    }

    pub fn with_power_config(mut self, power: PowerWaitConfig) -> Self {
        self.power = power;
        self
    }

    /// 替换轮询观察者
    pub fn with_observer(mut self, observer: Arc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn power_config(&self) -> &PowerWaitConfig {
        &self.power
    }

    /// 调整厂商客户端日志详细程度
    pub fn set_verbosity(&self, level: u8) {
        self.client.set_verbosity(level);
    }

    fn supports(&self, capability: Capability) -> bool {
        let supported = self.capabilities.contains(capability);
        if !supported {
            debug!("厂商客户端不支持 {:?}", capability);
        }
        supported
    }

    /// 执行电源操作并返回完整的收敛结果
    pub async fn power_action(
        &self,
        transition: PowerTransition,
        forceful: bool,
        wait: bool,
    ) -> Result<ConvergenceOutcome> {
        let request = ConvergenceRequest::new(transition, forceful, wait, &self.power);
        converge(&self.client, &request, self.observer.as_ref()).await
    }

    // ============================================
    // Supermicro 专有功能
    // ============================================

    /// BIOS 属性，不支持时返回 `None`
    pub async fn bios_attributes(&self) -> Result<Option<Value>> {
        if !self.supports(Capability::BiosAttributes) {
            return Ok(None);
        }
        let attributes = self.client.bios_attributes().await.map_err(classify)?;
        Ok(Some(attributes))
    }

    /// 修改单个 BIOS 属性，不支持时返回 `None`
    pub async fn set_bios_attribute(&self, name: &str, value: Value) -> Result<Option<bool>> {
        let name = require(name, "BIOS 属性名")?;
        if !self.supports(Capability::SetBiosAttribute) {
            return Ok(None);
        }

        info!("设置 BIOS 属性: {} = {}", name, value);
        let ok = self
            .client
            .set_bios_attribute(name, value)
            .await
            .map_err(classify)?;
        Ok(Some(ok))
    }

    /// BMC 网络协议配置，不支持时返回 `None`
    pub async fn manager_network_protocol(&self) -> Result<Option<Value>> {
        if !self.supports(Capability::ManagerNetworkProtocol) {
            return Ok(None);
        }
        let protocol = self
            .client
            .manager_network_protocol()
            .await
            .map_err(classify)?;
        Ok(Some(protocol))
    }
}

#[async_trait]
impl<C: SupermicroApi> SessionManagement for SupermicroAdapter<C> {
    async fn login(&self) -> Result<bool> {
        info!("登录 Supermicro BMC");
        self.client.login().await.map_err(classify)
    }

    async fn logout(&self) -> Result<bool> {
        info!("注销 Supermicro BMC 会话");
        self.client.logout().await.map_err(classify)
    }

    async fn authenticated_request(
        &self,
        method: RequestMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value> {
        let path = require(path, "请求路径")?;
        debug!("原始请求: {} {}", method, path);
        self.client
            .authenticated_request(method, path, body)
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl<C: SupermicroApi> PowerManagement for SupermicroAdapter<C> {
    async fn power_status(&self) -> Result<PowerState> {
        let raw = self.client.power_status().await.map_err(classify)?;
        Ok(PowerState::from_vendor(&raw))
    }

    async fn power_on(&self, wait: bool) -> Result<bool> {
        let outcome = self.power_action(PowerTransition::On, false, wait).await?;
        Ok(outcome.accepted)
    }

    async fn power_off(&self, mode: ShutdownMode, wait: bool) -> Result<bool> {
        let outcome = self
            .power_action(PowerTransition::Off, mode.is_forceful(), wait)
            .await?;
        Ok(outcome.accepted)
    }

    async fn reboot(&self, mode: ShutdownMode, wait: bool) -> Result<bool> {
        let outcome = self
            .power_action(PowerTransition::Restart, mode.is_forceful(), wait)
            .await?;
        Ok(outcome.accepted)
    }

    async fn power_cycle(&self, wait: bool) -> Result<bool> {
        let outcome = self
            .power_action(PowerTransition::Cycle, false, wait)
            .await?;
        Ok(outcome.accepted)
    }

    async fn reset_type_allowed(&self) -> Result<Vec<String>> {
        self.client.reset_type_allowed().await.map_err(classify)
    }

    async fn reset(&self, reset_type: &str, wait: bool) -> Result<bool> {
        let reset_type: ResetType = reset_type.parse()?;
        let (transition, forceful) = reset_type.to_transition()?;
        info!("ResetType {} -> {}", reset_type, transition);

        let outcome = self.power_action(transition, forceful, wait).await?;
        Ok(outcome.accepted)
    }
}

#[async_trait]
impl<C: SupermicroApi> Inventory for SupermicroAdapter<C> {
    async fn system_info(&self) -> Result<SystemInfo> {
        let raw = self.client.system_info().await.map_err(classify)?;
        Ok(normalize::system_info(&raw))
    }

    async fn cpus(&self) -> Result<Vec<Cpu>> {
        let raw = self.client.cpus().await.map_err(classify)?;
        Ok(normalize::cpus(&raw))
    }

    async fn memory(&self) -> Result<Vec<MemoryModule>> {
        let raw = self.client.memory().await.map_err(classify)?;
        Ok(normalize::memory(&raw))
    }

    async fn nics(&self) -> Result<Vec<Nic>> {
        let raw = self.client.nics().await.map_err(classify)?;
        Ok(normalize::nics(&raw))
    }

    async fn fans(&self) -> Result<Vec<Fan>> {
        let raw = self.client.fans().await.map_err(classify)?;
        Ok(normalize::fans(&raw))
    }

    async fn temperatures(&self) -> Result<Vec<TemperatureSensor>> {
        debug!("Supermicro 客户端不提供温度传感器数据");
        Ok(Vec::new())
    }

    async fn psus(&self) -> Result<Vec<Psu>> {
        let raw = self.client.psus().await.map_err(classify)?;
        Ok(normalize::psus(&raw))
    }

    async fn power_consumption(&self) -> Result<PowerConsumption> {
        let raw = self.client.power_consumption().await.map_err(classify)?;
        Ok(normalize::power_consumption(&raw))
    }
}

#[async_trait]
impl<C: SupermicroApi> StorageManagement for SupermicroAdapter<C> {
    async fn storage_controllers(&self) -> Result<Vec<StorageController>> {
        let raw = self.client.storage_controllers().await.map_err(classify)?;
        Ok(normalize::storage_controllers(&raw))
    }

    async fn drives(&self, controller_id: Option<&str>) -> Result<Vec<Drive>> {
        let controller_id = require_controller(controller_id)?;
        let raw = self.client.drives(controller_id).await.map_err(classify)?;
        Ok(normalize::drives(&raw))
    }

    async fn volumes(&self, controller_id: Option<&str>) -> Result<Vec<Volume>> {
        let controller_id = require_controller(controller_id)?;
        let raw = self.client.volumes(controller_id).await.map_err(classify)?;
        Ok(normalize::volumes(&raw))
    }

    async fn storage_summary(&self) -> Result<StorageSummary> {
        let raw = self.client.storage_summary().await.map_err(classify)?;
        Ok(normalize::storage_summary(&raw))
    }
}

#[async_trait]
impl<C: SupermicroApi> VirtualMediaManagement for SupermicroAdapter<C> {
    async fn virtual_media(&self) -> Result<Vec<VirtualMedia>> {
        let raw = self.client.virtual_media().await.map_err(classify)?;
        Ok(normalize::virtual_media(&raw))
    }

    async fn insert_virtual_media(&self, url: &str, device: Option<&str>) -> Result<bool> {
        let url = require(url, "镜像 URL")?;
        info!("插入虚拟介质: {} (设备: {:?})", url, device);
        self.client
            .insert_virtual_media(url, device)
            .await
            .map_err(classify)
    }

    async fn eject_virtual_media(&self, device: Option<&str>) -> Result<bool> {
        info!("弹出虚拟介质 (设备: {:?})", device);
        self.client
            .eject_virtual_media(device)
            .await
            .map_err(classify_eject)
    }

    async fn virtual_media_status(&self) -> Result<VirtualMediaStatus> {
        let raw = self.client.virtual_media_status().await.map_err(classify)?;
        Ok(normalize::virtual_media_status(&raw))
    }

    async fn mount_iso_and_boot(&self, url: &str, device: Option<&str>) -> Result<bool> {
        let url = require(url, "镜像 URL")?;
        info!("挂载 ISO 并设置光驱启动: {}", url);
        self.client
            .mount_iso_and_boot(url, device)
            .await
            .map_err(classify)
    }

    async fn unmount_all_media(&self) -> Result<bool> {
        info!("卸载全部虚拟介质");
        self.client.unmount_all_media().await.map_err(classify)
    }
}

#[async_trait]
impl<C: SupermicroApi> BootManagement for SupermicroAdapter<C> {
    async fn boot_options(&self) -> Result<Vec<BootOption>> {
        let raw = self.client.boot_options().await.map_err(classify)?;
        Ok(normalize::boot_options(&raw))
    }

    async fn boot_devices(&self) -> Result<BootSettings> {
        let raw = self.client.boot_devices().await.map_err(classify)?;
        Ok(normalize::boot_settings(&raw))
    }

    async fn set_boot_override(
        &self,
        target: BootTarget,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        info!(
            "设置启动覆盖: {} (持续性: {:?}, 模式: {:?})",
            target, persistence, mode
        );
        self.client
            .set_boot_override(
                target.as_redfish(),
                persistence.map(|p| p.as_redfish()),
                mode.map(|m| m.as_redfish()),
            )
            .await
            .map_err(classify)
    }

    async fn clear_boot_override(&self) -> Result<bool> {
        info!("清除启动覆盖");
        self.client.clear_boot_override().await.map_err(classify)
    }

    async fn set_boot_order(&self, devices: &[String]) -> Result<bool> {
        if devices.is_empty() {
            return Err(RadfishError::InvalidArgument(
                "启动顺序不能为空".to_string(),
            ));
        }
        info!("设置启动顺序: {:?}", devices);
        self.client.set_boot_order(devices).await.map_err(classify)
    }

    async fn configure_boot_settings(
        &self,
        persistence: Option<BootPersistence>,
        mode: Option<BootMode>,
    ) -> Result<bool> {
        info!("配置启动参数 (持续性: {:?}, 模式: {:?})", persistence, mode);
        self.client
            .configure_boot_settings(
                persistence.map(|p| p.as_redfish()),
                mode.map(|m| m.as_redfish()),
            )
            .await
            .map_err(classify)
    }
}

#[async_trait]
impl<C: SupermicroApi> JobManagement for SupermicroAdapter<C> {
    async fn jobs(&self) -> Result<Vec<Job>> {
        let raw = self.client.jobs().await.map_err(classify)?;
        Ok(normalize::jobs(&raw))
    }

    async fn job_status(&self, job_id: &str) -> Result<Job> {
        let job_id = require(job_id, "job_id")?;
        let raw = self.client.job_status(job_id).await.map_err(classify)?;
        Ok(normalize::job(&raw))
    }

    async fn wait_for_job(&self, job_id: &str, timeout: Duration) -> Result<Job> {
        let job_id = require(job_id, "job_id")?;
        info!("等待任务 {} 完成 (超时 {}s)", job_id, timeout.as_secs());
        let raw = self
            .client
            .wait_for_job(job_id, timeout.as_secs())
            .await
            .map_err(classify)?;
        Ok(normalize::job(&raw))
    }

    async fn cancel_job(&self, job_id: &str) -> Result<bool> {
        let job_id = require(job_id, "job_id")?;
        info!("取消任务: {}", job_id);
        self.client.cancel_job(job_id).await.map_err(classify)
    }

    async fn clear_jobs(&self) -> Result<bool> {
        info!("清理已完成的任务");
        self.client.clear_completed_jobs().await.map_err(classify)
    }

    async fn jobs_summary(&self) -> Result<JobsSummary> {
        let raw = self.client.jobs_summary().await.map_err(classify)?;
        Ok(normalize::jobs_summary(&raw))
    }
}

#[async_trait]
impl<C: SupermicroApi> Utility for SupermicroAdapter<C> {
    async fn sel_log(&self) -> Result<Vec<SelEntry>> {
        let raw = self.client.sel_log().await.map_err(classify)?;
        Ok(normalize::sel_entries(&raw))
    }

    async fn clear_sel_log(&self) -> Result<bool> {
        info!("清除系统事件日志");
        self.client.clear_sel_log().await.map_err(classify)
    }

    async fn sel_summary(&self, limit: usize) -> Result<Vec<SelEntry>> {
        let raw = self.client.sel_summary(limit).await.map_err(classify)?;
        let mut entries = normalize::sel_entries(&raw);
        entries.truncate(limit);
        Ok(entries)
    }

    async fn accounts(&self) -> Result<Vec<Account>> {
        let raw = self.client.accounts().await.map_err(classify)?;
        Ok(normalize::accounts(&raw))
    }

    async fn create_account(&self, username: &str, password: &str, role: &str) -> Result<bool> {
        let username = require(username, "username")?;
        let role = match role.trim() {
            "" => DEFAULT_ACCOUNT_ROLE,
            role => role,
        };
        info!("创建账户: {} (角色: {})", username, role);
        self.client
            .create_account(username, password, role)
            .await
            .map_err(classify)
    }

    async fn delete_account(&self, username: &str) -> Result<bool> {
        let username = require(username, "username")?;
        info!("删除账户: {}", username);
        self.client.delete_account(username).await.map_err(classify)
    }

    async fn update_account_password(&self, username: &str, new_password: &str) -> Result<bool> {
        let username = require(username, "username")?;
        info!("修改账户密码: {}", username);
        self.client
            .update_account_password(username, new_password)
            .await
            .map_err(classify)
    }

    async fn sessions(&self) -> Result<Vec<Session>> {
        let raw = self.client.sessions().await.map_err(classify)?;
        Ok(normalize::sessions(&raw))
    }

    async fn service_info(&self) -> Result<ServiceInfo> {
        let raw = self.client.service_info().await.map_err(classify)?;
        Ok(normalize::service_info(&raw))
    }

    async fn firmware_version(&self) -> Result<Option<String>> {
        let version = self.client.get_firmware_version().await.map_err(classify)?;
        Ok(version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    async fn bmc_info(&self) -> Result<BmcInfo> {
        let raw = self.client.bmc_info().await.map_err(classify)?;
        Ok(normalize::bmc_info(&raw))
    }

    async fn system_health(&self) -> Result<SystemHealth> {
        let raw = self.client.system_health().await.map_err(classify)?;
        Ok(normalize::system_health(&raw))
    }

    async fn licenses(&self) -> Result<Option<Vec<License>>> {
        if !self.supports(Capability::Licenses) {
            return Ok(None);
        }
        let raw = self.client.licenses().await.map_err(classify)?;
        Ok(Some(normalize::licenses(&raw)))
    }

    async fn activate_license(&self, license_key: &str) -> Result<Option<bool>> {
        let license_key = require(license_key, "license_key")?;
        if !self.supports(Capability::ActivateLicense) {
            return Ok(None);
        }
        info!("激活许可证");
        let ok = self
            .client
            .activate_license(license_key)
            .await
            .map_err(classify)?;
        Ok(Some(ok))
    }

    async fn clear_license(&self, license_id: &str) -> Result<Option<bool>> {
        let license_id = require(license_id, "license_id")?;
        if !self.supports(Capability::ClearLicense) {
            return Ok(None);
        }
        info!("清除许可证: {}", license_id);
        let ok = self
            .client
            .clear_license(license_id)
            .await
            .map_err(classify)?;
        Ok(Some(ok))
    }

    async fn check_virtual_media_license(&self) -> Result<Option<bool>> {
        if !self.supports(Capability::VirtualMediaLicense) {
            return Ok(None);
        }
        let ok = self
            .client
            .check_virtual_media_license()
            .await
            .map_err(classify)?;
        Ok(Some(ok))
    }

    async fn get_bmc_network(&self) -> Result<BmcNetwork> {
        let raw = self.client.get_bmc_network().await.map_err(classify)?;
        Ok(normalize::bmc_network(&raw))
    }

    async fn set_bmc_network(&self, settings: &BmcNetworkSettings) -> Result<bool> {
        settings.validate()?;
        info!(
            "设置 BMC 静态网络: {}/{} 网关 {}",
            settings.ip_address, settings.subnet_mask, settings.gateway
        );
        self.client.set_bmc_network(settings).await.map_err(classify)
    }

    async fn set_bmc_dhcp(&self) -> Result<bool> {
        info!("设置 BMC 网络为 DHCP");
        self.client.set_bmc_dhcp().await.map_err(classify)
    }
}

impl<C: SupermicroApi> BmcAdapter for SupermicroAdapter<C> {
    fn vendor(&self) -> &'static str {
        VENDOR
    }
}

//! 测试用 Supermicro 客户端
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use radfish_core::{BmcNetworkSettings, PowerState, PowerTransition, RequestMethod};
use radfish_supermicro::{
    Capabilities, ClientError, ClientResult, PollObserver, SupermicroApi,
};
use serde_json::{json, Value};

/// 初始化测试日志（重复调用无副作用）
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 预设的失败
#[derive(Debug, Clone)]
pub enum Failure {
    /// 厂商客户端错误，会被分类
    Vendor(String),
    /// 其它错误，原样透传
    Other(String),
}

impl Failure {
    fn to_error(&self) -> ClientError {
        match self {
            Failure::Vendor(msg) => ClientError::vendor(msg.clone()),
            Failure::Other(msg) => ClientError::Other(anyhow::anyhow!(msg.clone())),
        }
    }
}

/// 可编排的 Supermicro 客户端
pub struct MockClient {
    capabilities: Capabilities,
    status_script: Mutex<VecDeque<Result<String, String>>>,
    fallback_status: String,
    responses: HashMap<&'static str, Value>,
    results: HashMap<&'static str, bool>,
    failures: HashMap<&'static str, Failure>,
    calls: Mutex<Vec<String>>,
    verbosity: Mutex<Option<u8>>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::none(),
            status_script: Mutex::new(VecDeque::new()),
            fallback_status: "Unknown".to_string(),
            responses: HashMap::new(),
            results: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            verbosity: Mutex::new(None),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// 依次返回的电源状态，`Err` 表示该次读取失败
    pub fn with_status_script(self, script: &[Result<&str, &str>]) -> Self {
        {
            let mut queue = self.status_script.lock().unwrap();
            for item in script {
                queue.push_back(item.map(str::to_string).map_err(str::to_string));
            }
        }
        self
    }

    /// 脚本耗尽后返回的电源状态
    pub fn with_fallback_status(mut self, status: &str) -> Self {
        self.fallback_status = status.to_string();
        self
    }

    pub fn with_response(mut self, method: &'static str, value: Value) -> Self {
        self.responses.insert(method, value);
        self
    }

    /// 一次性命令的返回值，默认 true
    pub fn with_result(mut self, method: &'static str, result: bool) -> Self {
        self.results.insert(method, result);
        self
    }

    pub fn with_vendor_error(mut self, method: &'static str, message: &str) -> Self {
        self.failures
            .insert(method, Failure::Vendor(message.to_string()));
        self
    }

    pub fn with_other_error(mut self, method: &'static str, message: &str) -> Self {
        self.failures
            .insert(method, Failure::Other(message.to_string()));
        self
    }

    /// 调用记录，格式为 `方法名` 或 `方法名:参数`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        let prefix = format!("{}:", method);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == method || c.starts_with(&prefix))
            .count()
    }

    pub fn verbosity(&self) -> Option<u8> {
        *self.verbosity.lock().unwrap()
    }

    fn record(&self, method: &'static str, detail: Option<String>) -> ClientResult<()> {
        let entry = match detail {
            Some(detail) => format!("{}:{}", method, detail),
            None => method.to_string(),
        };
        self.calls.lock().unwrap().push(entry);

        match self.failures.get(method) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn value(&self, method: &'static str) -> ClientResult<Value> {
        self.record(method, None)?;
        Ok(self.responses.get(method).cloned().unwrap_or_else(|| json!({})))
    }

    fn value_with(&self, method: &'static str, detail: String) -> ClientResult<Value> {
        self.record(method, Some(detail))?;
        Ok(self.responses.get(method).cloned().unwrap_or_else(|| json!({})))
    }

    fn flag(&self, method: &'static str, detail: Option<String>) -> ClientResult<bool> {
        self.record(method, detail)?;
        Ok(self.results.get(method).copied().unwrap_or(true))
    }
}

#[async_trait]
impl SupermicroApi for MockClient {
    fn capabilities(&self) -> Capabilities {
        self.capabilities.clone()
    }

    fn set_verbosity(&self, level: u8) {
        *self.verbosity.lock().unwrap() = Some(level);
    }

    async fn login(&self) -> ClientResult<bool> {
        self.flag("login", None)
    }

    async fn logout(&self) -> ClientResult<bool> {
        self.flag("logout", None)
    }

    async fn authenticated_request(
        &self,
        method: RequestMethod,
        path: &str,
        _body: Option<Value>,
    ) -> ClientResult<Value> {
        self.value_with("authenticated_request", format!("{} {}", method, path))
    }

    async fn power_status(&self) -> ClientResult<String> {
        self.record("power_status", None)?;
        let next = self.status_script.lock().unwrap().pop_front();
        match next {
            Some(Ok(state)) => Ok(state),
            Some(Err(msg)) => Err(ClientError::vendor(msg)),
            None => Ok(self.fallback_status.clone()),
        }
    }

    async fn power_on(&self) -> ClientResult<bool> {
        self.flag("power_on", None)
    }

    async fn power_off(&self, force: bool) -> ClientResult<bool> {
        self.flag("power_off", Some(format!("force={}", force)))
    }

    async fn power_restart(&self, force: bool) -> ClientResult<bool> {
        self.flag("power_restart", Some(format!("force={}", force)))
    }

    async fn power_cycle(&self) -> ClientResult<bool> {
        self.flag("power_cycle", None)
    }

    async fn reset_type_allowed(&self) -> ClientResult<Vec<String>> {
        self.record("reset_type_allowed", None)?;
        Ok(vec![
            "On".to_string(),
            "ForceOff".to_string(),
            "GracefulRestart".to_string(),
        ])
    }

    async fn system_info(&self) -> ClientResult<Value> {
        self.value("system_info")
    }

    async fn cpus(&self) -> ClientResult<Value> {
        self.value("cpus")
    }

    async fn memory(&self) -> ClientResult<Value> {
        self.value("memory")
    }

    async fn nics(&self) -> ClientResult<Value> {
        self.value("nics")
    }

    async fn fans(&self) -> ClientResult<Value> {
        self.value("fans")
    }

    async fn psus(&self) -> ClientResult<Value> {
        self.value("psus")
    }

    async fn power_consumption(&self) -> ClientResult<Value> {
        self.value("power_consumption")
    }

    async fn system_health(&self) -> ClientResult<Value> {
        self.value("system_health")
    }

    async fn storage_controllers(&self) -> ClientResult<Value> {
        self.value("storage_controllers")
    }

    async fn drives(&self, controller_id: &str) -> ClientResult<Value> {
        self.value_with("drives", controller_id.to_string())
    }

    async fn volumes(&self, controller_id: &str) -> ClientResult<Value> {
        self.value_with("volumes", controller_id.to_string())
    }

    async fn storage_summary(&self) -> ClientResult<Value> {
        self.value("storage_summary")
    }

    async fn virtual_media(&self) -> ClientResult<Value> {
        self.value("virtual_media")
    }

    async fn insert_virtual_media(&self, url: &str, device: Option<&str>) -> ClientResult<bool> {
        self.flag("insert_virtual_media", Some(format!("{} {:?}", url, device)))
    }

    async fn eject_virtual_media(&self, device: Option<&str>) -> ClientResult<bool> {
        self.flag("eject_virtual_media", Some(format!("{:?}", device)))
    }

    async fn virtual_media_status(&self) -> ClientResult<Value> {
        self.value("virtual_media_status")
    }

    async fn mount_iso_and_boot(&self, url: &str, _device: Option<&str>) -> ClientResult<bool> {
        self.flag("mount_iso_and_boot", Some(url.to_string()))
    }

    async fn unmount_all_media(&self) -> ClientResult<bool> {
        self.flag("unmount_all_media", None)
    }

    async fn boot_options(&self) -> ClientResult<Value> {
        self.value("boot_options")
    }

    async fn boot_devices(&self) -> ClientResult<Value> {
        self.value("boot_devices")
    }

    async fn set_boot_override(
        &self,
        target: &str,
        persistence: Option<&str>,
        mode: Option<&str>,
    ) -> ClientResult<bool> {
        self.flag(
            "set_boot_override",
            Some(format!("{} {:?} {:?}", target, persistence, mode)),
        )
    }

    async fn clear_boot_override(&self) -> ClientResult<bool> {
        self.flag("clear_boot_override", None)
    }

    async fn set_boot_order(&self, devices: &[String]) -> ClientResult<bool> {
        self.flag("set_boot_order", Some(devices.join(",")))
    }

    async fn configure_boot_settings(
        &self,
        persistence: Option<&str>,
        mode: Option<&str>,
    ) -> ClientResult<bool> {
        self.flag(
            "configure_boot_settings",
            Some(format!("{:?} {:?}", persistence, mode)),
        )
    }

    async fn jobs(&self) -> ClientResult<Value> {
        self.value("jobs")
    }

    async fn job_status(&self, job_id: &str) -> ClientResult<Value> {
        self.value_with("job_status", job_id.to_string())
    }

    async fn wait_for_job(&self, job_id: &str, timeout_secs: u64) -> ClientResult<Value> {
        self.value_with("wait_for_job", format!("{} {}", job_id, timeout_secs))
    }

    async fn cancel_job(&self, job_id: &str) -> ClientResult<bool> {
        self.flag("cancel_job", Some(job_id.to_string()))
    }

    async fn clear_completed_jobs(&self) -> ClientResult<bool> {
        self.flag("clear_completed_jobs", None)
    }

    async fn jobs_summary(&self) -> ClientResult<Value> {
        self.value("jobs_summary")
    }

    async fn sel_log(&self) -> ClientResult<Value> {
        self.value("sel_log")
    }

    async fn clear_sel_log(&self) -> ClientResult<bool> {
        self.flag("clear_sel_log", None)
    }

    async fn sel_summary(&self, limit: usize) -> ClientResult<Value> {
        self.value_with("sel_summary", limit.to_string())
    }

    async fn accounts(&self) -> ClientResult<Value> {
        self.value("accounts")
    }

    async fn create_account(
        &self,
        username: &str,
        _password: &str,
        role: &str,
    ) -> ClientResult<bool> {
        self.flag("create_account", Some(format!("{} {}", username, role)))
    }

    async fn delete_account(&self, username: &str) -> ClientResult<bool> {
        self.flag("delete_account", Some(username.to_string()))
    }

    async fn update_account_password(
        &self,
        username: &str,
        _new_password: &str,
    ) -> ClientResult<bool> {
        self.flag("update_account_password", Some(username.to_string()))
    }

    async fn sessions(&self) -> ClientResult<Value> {
        self.value("sessions")
    }

    async fn service_info(&self) -> ClientResult<Value> {
        self.value("service_info")
    }

    async fn get_firmware_version(&self) -> ClientResult<Option<String>> {
        self.record("get_firmware_version", None)?;
        Ok(self
            .responses
            .get("get_firmware_version")
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    async fn bmc_info(&self) -> ClientResult<Value> {
        self.value("bmc_info")
    }

    async fn get_bmc_network(&self) -> ClientResult<Value> {
        self.value("get_bmc_network")
    }

    async fn set_bmc_network(&self, settings: &BmcNetworkSettings) -> ClientResult<bool> {
        self.flag("set_bmc_network", Some(settings.ip_address.clone()))
    }

    async fn set_bmc_dhcp(&self) -> ClientResult<bool> {
        self.flag("set_bmc_dhcp", None)
    }

    async fn licenses(&self) -> ClientResult<Value> {
        self.value("licenses")
    }

    async fn activate_license(&self, license_key: &str) -> ClientResult<bool> {
        self.flag("activate_license", Some(license_key.to_string()))
    }

    async fn clear_license(&self, license_id: &str) -> ClientResult<bool> {
        self.flag("clear_license", Some(license_id.to_string()))
    }

    async fn check_virtual_media_license(&self) -> ClientResult<bool> {
        self.flag("check_virtual_media_license", None)
    }

    async fn bios_attributes(&self) -> ClientResult<Value> {
        self.value("bios_attributes")
    }

    async fn set_bios_attribute(&self, name: &str, value: Value) -> ClientResult<bool> {
        self.flag("set_bios_attribute", Some(format!("{}={}", name, value)))
    }

    async fn manager_network_protocol(&self) -> ClientResult<Value> {
        self.value("manager_network_protocol")
    }
}

/// 记录轮询过程的观察者
#[derive(Default)]
pub struct RecordingObserver {
    pub polls: Mutex<Vec<(PowerTransition, u32, PowerState)>>,
    pub errors: Mutex<Vec<(u32, String)>>,
}

impl PollObserver for RecordingObserver {
    fn on_poll(&self, transition: PowerTransition, attempt: u32, state: PowerState) {
        self.polls.lock().unwrap().push((transition, attempt, state));
    }

    fn on_poll_error(&self, _transition: PowerTransition, attempt: u32, error: &ClientError) {
        self.errors.lock().unwrap().push((attempt, error.to_string()));
    }
}

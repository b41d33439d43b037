//! 适配器配置
//!
//! **数据存储方式**: TOML 文件 (~/.config/radfish/supermicro.toml)
//!
//! ```toml
//! host = "10.0.0.20"
//! username = "ADMIN"
//! password = "secret"
//! verify_ssl = false
//!
//! [power]
//! max_attempts = 30
//! poll_interval = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use radfish_core::{RadfishError, Result};
use serde::{Deserialize, Serialize};

/// 适配器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// BMC 地址
    pub host: String,

    /// 用户名
    pub username: String,

    /// 密码
    pub password: String,

    /// 端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 是否使用 HTTPS
    #[serde(default = "default_use_ssl")]
    pub use_ssl: bool,

    /// 是否验证 SSL 证书（BMC 多为自签名证书）
    #[serde(default)]
    pub verify_ssl: bool,

    /// 直连模式（跳过会话认证，使用 Basic Auth）
    #[serde(default)]
    pub direct_mode: bool,

    /// 厂商客户端连接重试次数
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// 重试间隔（秒）
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    /// 自定义 Host 请求头（经代理访问 BMC 时使用）
    #[serde(default)]
    pub host_header: Option<String>,

    /// 电源操作等待配置
    #[serde(default)]
    pub power: PowerWaitConfig,
}

/// 电源操作等待配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerWaitConfig {
    /// 开机/关机的最大轮询次数，重启和电源循环使用两倍
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 轮询间隔（秒）
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for PowerWaitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl PowerWaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }
}

/// 传给厂商客户端工厂的连接参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub host: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub use_ssl: bool,
    pub verify_ssl: bool,
    pub direct_mode: bool,
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub host_header: Option<String>,
}

impl AdapterConfig {
    /// 使用默认参数创建配置
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            port: default_port(),
            use_ssl: default_use_ssl(),
            verify_ssl: false,
            direct_mode: false,
            retry_count: default_retry_count(),
            retry_delay: default_retry_delay(),
            host_header: None,
            power: PowerWaitConfig::default(),
        }
    }

    /// 获取默认配置文件路径
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("radfish").join("supermicro.toml"))
    }

    /// 从 TOML 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        Self::from_toml_str(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    /// 从默认路径加载配置
    pub fn load_default() -> anyhow::Result<Self> {
        Self::load(Self::config_path()?)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("TOML 格式错误")?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(RadfishError::InvalidArgument("host 不能为空".to_string()));
        }
        if self.username.trim().is_empty() {
            return Err(RadfishError::InvalidArgument("username 不能为空".to_string()));
        }
        if self.port == 0 {
            return Err(RadfishError::InvalidArgument("port 不能为 0".to_string()));
        }
        if self.power.poll_interval == 0 {
            return Err(RadfishError::InvalidArgument(
                "power.poll_interval 不能为 0".to_string(),
            ));
        }
        Ok(())
    }

    /// BMC 基础 URL
    pub fn base_url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        let default_port = if self.use_ssl { 443 } else { 80 };
        if self.port == default_port {
            format!("{}://{}", scheme, self.host)
        } else {
            format!("{}://{}:{}", scheme, self.host, self.port)
        }
    }

    /// 厂商客户端连接参数
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            port: self.port,
            use_ssl: self.use_ssl,
            verify_ssl: self.verify_ssl,
            direct_mode: self.direct_mode,
            retry_count: self.retry_count,
            retry_delay: Duration::from_secs(self.retry_delay),
            host_header: self.host_header.clone(),
        }
    }
}

// 默认值函数
fn default_port() -> u16 {
    443
}

fn default_use_ssl() -> bool {
    true
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_max_attempts() -> u32 {
    30
}

fn default_poll_interval() -> u64 {
    2
}

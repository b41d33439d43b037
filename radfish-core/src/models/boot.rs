//! 启动配置相关类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RadfishError;

/// 启动目标设备
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootTarget {
    /// 网络启动（PXE）
    Pxe,
    /// 本地硬盘
    Hdd,
    /// 光驱（含虚拟光驱）
    Cd,
    /// USB 设备
    Usb,
    /// 进入 BIOS 设置
    BiosSetup,
    /// UEFI Shell
    UefiShell,
    /// 不覆盖
    None,
}

impl BootTarget {
    /// Redfish `BootSourceOverrideTarget` 取值
    pub fn as_redfish(&self) -> &'static str {
        match self {
            BootTarget::Pxe => "Pxe",
            BootTarget::Hdd => "Hdd",
            BootTarget::Cd => "Cd",
            BootTarget::Usb => "Usb",
            BootTarget::BiosSetup => "BiosSetup",
            BootTarget::UefiShell => "UefiShell",
            BootTarget::None => "None",
        }
    }
}

impl fmt::Display for BootTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_redfish())
    }
}

impl FromStr for BootTarget {
    type Err = RadfishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pxe" | "network" => Ok(BootTarget::Pxe),
            "hdd" | "disk" => Ok(BootTarget::Hdd),
            "cd" | "cdrom" | "dvd" => Ok(BootTarget::Cd),
            "usb" => Ok(BootTarget::Usb),
            "biossetup" | "bios" => Ok(BootTarget::BiosSetup),
            "uefishell" => Ok(BootTarget::UefiShell),
            "none" => Ok(BootTarget::None),
            _ => Err(RadfishError::InvalidArgument(format!("未知的启动目标: {}", s))),
        }
    }
}

/// 启动覆盖持续性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootPersistence {
    /// 仅下次启动
    Once,
    /// 持续生效
    Continuous,
    /// 禁用覆盖
    Disabled,
}

impl BootPersistence {
    /// Redfish `BootSourceOverrideEnabled` 取值
    pub fn as_redfish(&self) -> &'static str {
        match self {
            BootPersistence::Once => "Once",
            BootPersistence::Continuous => "Continuous",
            BootPersistence::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for BootPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_redfish())
    }
}

/// 启动模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BootMode {
    Uefi,
    Legacy,
}

impl BootMode {
    /// Redfish `BootSourceOverrideMode` 取值
    pub fn as_redfish(&self) -> &'static str {
        match self {
            BootMode::Uefi => "UEFI",
            BootMode::Legacy => "Legacy",
        }
    }
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_redfish())
    }
}

/// 启动项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootOption {
    pub id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    /// BootOptionReference，例如 `Boot0003`
    pub reference: Option<String>,
    pub enabled: Option<bool>,
    pub device_path: Option<String>,
}

/// 当前启动配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootSettings {
    pub target: Option<String>,
    pub persistence: Option<String>,
    pub mode: Option<String>,
    pub allowed_targets: Vec<String>,
    pub boot_order: Vec<String>,
}

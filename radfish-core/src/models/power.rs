//! 电源相关类型

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RadfishError;

/// 电源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerState {
    /// 已开机
    On,
    /// 已关机
    Off,
    /// 未知（包括 PoweringOn/PoweringOff 等过渡状态）
    Unknown,
}

impl PowerState {
    /// 解析厂商返回的电源状态字符串（忽略大小写）
    pub fn from_vendor(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "on" => PowerState::On,
            "off" => PowerState::Off,
            _ => PowerState::Unknown,
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::On => write!(f, "On"),
            PowerState::Off => write!(f, "Off"),
            PowerState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// 电源状态转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerTransition {
    /// 开机
    On,
    /// 关机
    Off,
    /// 重启
    Restart,
    /// 电源循环（断电后再上电）
    Cycle,
}

impl PowerTransition {
    /// 转换完成后期望的最终电源状态
    pub fn target_state(&self) -> PowerState {
        match self {
            PowerTransition::Off => PowerState::Off,
            PowerTransition::On | PowerTransition::Restart | PowerTransition::Cycle => {
                PowerState::On
            }
        }
    }

    /// 是否需要先观察到关机再观察到开机
    pub fn requires_down_edge(&self) -> bool {
        matches!(self, PowerTransition::Restart | PowerTransition::Cycle)
    }
}

impl fmt::Display for PowerTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerTransition::On => write!(f, "power_on"),
            PowerTransition::Off => write!(f, "power_off"),
            PowerTransition::Restart => write!(f, "restart"),
            PowerTransition::Cycle => write!(f, "power_cycle"),
        }
    }
}

/// 关机/重启方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShutdownMode {
    /// 正常关机（ACPI）
    #[default]
    Graceful,
    /// 强制关机
    Force,
}

impl ShutdownMode {
    pub fn is_forceful(&self) -> bool {
        matches!(self, ShutdownMode::Force)
    }
}

/// Redfish 标准 ResetType
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResetType {
    On,
    ForceOn,
    ForceOff,
    GracefulShutdown,
    GracefulRestart,
    ForceRestart,
    PowerCycle,
    Nmi,
    PushPowerButton,
}

impl ResetType {
    /// Redfish 字符串表示
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetType::On => "On",
            ResetType::ForceOn => "ForceOn",
            ResetType::ForceOff => "ForceOff",
            ResetType::GracefulShutdown => "GracefulShutdown",
            ResetType::GracefulRestart => "GracefulRestart",
            ResetType::ForceRestart => "ForceRestart",
            ResetType::PowerCycle => "PowerCycle",
            ResetType::Nmi => "Nmi",
            ResetType::PushPowerButton => "PushPowerButton",
        }
    }

    /// 转换为电源状态转换和是否强制
    ///
    /// `Nmi` 和 `PushPowerButton` 没有对应的厂商命令，返回参数错误
    pub fn to_transition(&self) -> Result<(PowerTransition, bool), RadfishError> {
        match self {
            ResetType::On | ResetType::ForceOn => Ok((PowerTransition::On, false)),
            ResetType::GracefulShutdown => Ok((PowerTransition::Off, false)),
            ResetType::ForceOff => Ok((PowerTransition::Off, true)),
            ResetType::GracefulRestart => Ok((PowerTransition::Restart, false)),
            ResetType::ForceRestart => Ok((PowerTransition::Restart, true)),
            ResetType::PowerCycle => Ok((PowerTransition::Cycle, false)),
            ResetType::Nmi | ResetType::PushPowerButton => Err(RadfishError::InvalidArgument(
                format!("不支持的 ResetType: {}", self.as_str()),
            )),
        }
    }
}

impl fmt::Display for ResetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResetType {
    type Err = RadfishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "On" => Ok(ResetType::On),
            "ForceOn" => Ok(ResetType::ForceOn),
            "ForceOff" => Ok(ResetType::ForceOff),
            "GracefulShutdown" => Ok(ResetType::GracefulShutdown),
            "GracefulRestart" => Ok(ResetType::GracefulRestart),
            "ForceRestart" => Ok(ResetType::ForceRestart),
            "PowerCycle" => Ok(ResetType::PowerCycle),
            "Nmi" => Ok(ResetType::Nmi),
            "PushPowerButton" => Ok(ResetType::PushPowerButton),
            other => Err(RadfishError::InvalidArgument(format!(
                "未知的 ResetType: {}",
                other
            ))),
        }
    }
}

/// 功耗读数（瓦）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerConsumption {
    pub consumed_watts: Option<f64>,
    pub average_watts: Option<f64>,
    pub min_watts: Option<f64>,
    pub max_watts: Option<f64>,
    pub capacity_watts: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state_from_vendor() {
        assert_eq!(PowerState::from_vendor("On"), PowerState::On);
        assert_eq!(PowerState::from_vendor("off"), PowerState::Off);
        assert_eq!(PowerState::from_vendor(" OFF "), PowerState::Off);
        assert_eq!(PowerState::from_vendor("PoweringOn"), PowerState::Unknown);
        assert_eq!(PowerState::from_vendor(""), PowerState::Unknown);
    }

    #[test]
    fn test_transition_targets() {
        assert_eq!(PowerTransition::On.target_state(), PowerState::On);
        assert_eq!(PowerTransition::Off.target_state(), PowerState::Off);
        assert!(PowerTransition::Restart.requires_down_edge());
        assert!(PowerTransition::Cycle.requires_down_edge());
        assert!(!PowerTransition::Off.requires_down_edge());
    }

    #[test]
    fn test_reset_type_translation() {
        let rt: ResetType = "ForceOff".parse().unwrap();
        assert_eq!(rt.to_transition().unwrap(), (PowerTransition::Off, true));

        let rt: ResetType = "GracefulRestart".parse().unwrap();
        assert_eq!(rt.to_transition().unwrap(), (PowerTransition::Restart, false));

        let rt: ResetType = "PowerCycle".parse().unwrap();
        assert_eq!(rt.to_transition().unwrap(), (PowerTransition::Cycle, false));
    }

    #[test]
    fn test_reset_type_unsupported() {
        let rt: ResetType = "Nmi".parse().unwrap();
        assert!(matches!(rt.to_transition(), Err(RadfishError::InvalidArgument(_))));
        assert!("Reboot".parse::<ResetType>().is_err());
    }
}

//! 厂商数据标准化
//!
//! 把 Supermicro 客户端返回的松散 JSON 转换为 `radfish_core` 的记录类型。
//!
//! 规则：
//! - 每个字段按别名依次查找，同时接受厂商的 snake_case 键和 Redfish 的
//!   PascalCase 键，支持 `Status.Health`、`IPv4Addresses.0.Address` 这样的路径
//! - `null`、空字符串和类型不符的值一律视为缺失（`None`），不做默认填充
//! - 列表保持厂商返回的顺序，嵌套列表（网卡端口、控制器磁盘）递归转换
//! - 列表数据可以是 JSON 数组，也可以是带 `Members` 的 Redfish 集合

use chrono::{DateTime, FixedOffset};
use radfish_core::*;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// 标准化后的厂商名称
pub const SUPERMICRO: &str = "Supermicro";

const HEALTH_KEYS: &[&str] = &["health", "Health", "Status.Health"];
const SERIAL_KEYS: &[&str] = &["serial", "serial_number", "SerialNumber"];

// ============================================
// 字段读取
// ============================================

/// 按路径解析 JSON 值
///
/// 先按完整键查找（键名本身可能包含 `.`），找不到再按第一个 `.` 拆分向下查找
fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => {
            if let Some(v) = map.get(path) {
                return Some(v);
            }
            let (head, rest) = path.split_once('.')?;
            resolve(map.get(head)?, rest)
        }
        Value::Array(items) => {
            let (head, rest) = match path.split_once('.') {
                Some((head, rest)) => (head, Some(rest)),
                None => (path, None),
            };
            let item = items.get(head.parse::<usize>().ok()?)?;
            match rest {
                Some(rest) => resolve(item, rest),
                None => Some(item),
            }
        }
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_datetime(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim()).ok(),
        _ => None,
    }
}

/// 单条厂商记录的字段访问器
struct Fields<'a> {
    value: &'a Value,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        resolve(self.value, key).filter(|v| !v.is_null())
    }

    fn first<T>(&self, keys: &[&str], convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
        keys.iter().find_map(|key| self.get(key).and_then(&convert))
    }

    fn string(&self, keys: &[&str]) -> Option<String> {
        self.first(keys, as_string)
    }

    fn u64(&self, keys: &[&str]) -> Option<u64> {
        self.first(keys, as_u64)
    }

    fn u32(&self, keys: &[&str]) -> Option<u32> {
        self.first(keys, |v| as_u64(v).and_then(|n| u32::try_from(n).ok()))
    }

    fn f64(&self, keys: &[&str]) -> Option<f64> {
        self.first(keys, as_f64)
    }

    fn bool(&self, keys: &[&str]) -> Option<bool> {
        self.first(keys, as_bool)
    }

    fn datetime(&self, keys: &[&str]) -> Option<DateTime<FixedOffset>> {
        self.first(keys, as_datetime)
    }

    fn health(&self) -> Option<String> {
        self.string(HEALTH_KEYS)
    }

    /// 字符串数组，数字元素转换为字符串，其它元素被跳过
    fn strings(&self, keys: &[&str]) -> Vec<String> {
        self.first(keys, |v| match v {
            Value::Array(items) => Some(items.iter().filter_map(as_string).collect::<Vec<_>>()),
            _ => None,
        })
        .unwrap_or_default()
    }

    /// 嵌套记录列表
    fn records(&self, keys: &[&str]) -> Vec<&'a Value> {
        keys.iter()
            .find_map(|key| self.get(key).filter(|v| v.is_array() || v.is_object()))
            .map(records)
            .unwrap_or_default()
    }

    /// 数组长度
    fn len_of(&self, keys: &[&str]) -> Option<u32> {
        self.first(keys, |v| {
            v.as_array().and_then(|items| u32::try_from(items.len()).ok())
        })
    }
}

/// 取出列表中的记录
///
/// 接受 JSON 数组或带 `Members`/`members` 数组的集合对象，非对象元素被跳过
fn records(value: &Value) -> Vec<&Value> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("Members").or_else(|| map.get("members")) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items.iter().filter(|item| item.is_object()).collect()
}

fn list<T>(value: &Value, convert: impl Fn(&Fields) -> T) -> Vec<T> {
    let items: Vec<T> = records(value)
        .into_iter()
        .map(|item| convert(&Fields::new(item)))
        .collect();
    debug!("标准化列表: {} 条记录", items.len());
    items
}

// ============================================
// 派生规则
// ============================================

/// 厂商名称标准化
///
/// "Super Micro"、"SUPERMICRO"、"Super  Micro Computer, Inc." 等统一为 "Supermicro"，
/// 其它厂商名称原样保留
pub fn normalize_manufacturer(raw: &str) -> String {
    let trimmed = raw.trim();
    let matched = Regex::new(r"(?i)^super\s*micro(\s*computer.*)?$")
        .map(|re| re.is_match(trimmed))
        .unwrap_or(false);

    if matched {
        SUPERMICRO.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 从 BMC UUID 提取服务标签
///
/// UUID 形如 `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` 时取最后一段，
/// 否则退回到序列号
pub fn derive_service_tag(manager_uuid: Option<&str>, serial: Option<&str>) -> Option<String> {
    let from_uuid = manager_uuid.and_then(|uuid| {
        let re = Regex::new(
            r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-([0-9A-Fa-f]{12})$",
        )
        .ok()?;
        let caps = re.captures(uuid.trim())?;
        caps.get(1).map(|m| m.as_str().to_string())
    });

    from_uuid.or_else(|| serial.map(str::to_string))
}

// ============================================
// 硬件清单
// ============================================

pub fn system_info(value: &Value) -> SystemInfo {
    let f = Fields::new(value);
    let serial = f.string(SERIAL_KEYS);
    let manager_uuid = f.string(&["manager_uuid", "ManagerUUID", "bmc_uuid", "Manager.UUID"]);
    let manufacturer = f
        .string(&["manufacturer", "Manufacturer"])
        .map(|m| normalize_manufacturer(&m));

    SystemInfo {
        service_tag: derive_service_tag(manager_uuid.as_deref(), serial.as_deref()),
        make: manufacturer.clone(),
        manufacturer,
        model: f.string(&["model", "Model"]),
        serial_number: serial.clone(),
        serial,
        name: f.string(&["name", "Name"]),
        uuid: f.string(&["uuid", "UUID"]),
        bios_version: f.string(&["bios_version", "BiosVersion"]),
        power_state: f
            .string(&["power_state", "PowerState"])
            .map(|s| PowerState::from_vendor(&s)),
        health: f.health(),
    }
}

pub fn cpus(value: &Value) -> Vec<Cpu> {
    list(value, |f| Cpu {
        socket: f.string(&["socket", "Socket", "id", "Id"]),
        manufacturer: f.string(&["manufacturer", "Manufacturer"]),
        model: f.string(&["model", "Model"]),
        cores: f.u32(&["cores", "TotalCores"]),
        threads: f.u32(&["threads", "TotalThreads"]),
        speed_mhz: f.u32(&["speed_mhz", "MaxSpeedMHz", "OperatingSpeedMHz"]),
        health: f.health(),
    })
}

pub fn memory(value: &Value) -> Vec<MemoryModule> {
    list(value, |f| MemoryModule {
        name: f.string(&["name", "Name"]),
        slot: f.string(&["slot", "DeviceLocator"]),
        manufacturer: f.string(&["manufacturer", "Manufacturer"]),
        part_number: f.string(&["part_number", "PartNumber"]),
        serial: f.string(SERIAL_KEYS),
        memory_type: f.string(&["memory_type", "type", "MemoryDeviceType"]),
        capacity_mb: f
            .u64(&["capacity_mb", "CapacityMiB"])
            .or_else(|| f.u64(&["capacity_gb"]).and_then(|gb| gb.checked_mul(1024))),
        speed_mhz: f.u32(&["speed_mhz", "OperatingSpeedMhz", "OperatingSpeedMHz"]),
        health: f.health(),
    })
}

fn nic_port(f: &Fields) -> NicPort {
    NicPort {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        mac: f.string(&["mac", "mac_address", "MACAddress"]),
        link_status: f.string(&["link_status", "LinkStatus"]),
        speed_mbps: f.u32(&["speed_mbps", "current_speed_mbps", "CurrentLinkSpeedMbps", "SpeedMbps"]),
        ipv4_address: f.string(&["ipv4_address", "IPv4Addresses.0.Address"]),
    }
}

pub fn nics(value: &Value) -> Vec<Nic> {
    list(value, |f| Nic {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        manufacturer: f.string(&["manufacturer", "Manufacturer"]),
        model: f.string(&["model", "Model"]),
        serial: f.string(SERIAL_KEYS),
        mac: f.string(&["mac", "mac_address", "MACAddress", "PermanentMACAddress"]),
        health: f.health(),
        ports: f
            .records(&["ports", "Ports"])
            .into_iter()
            .map(|port| nic_port(&Fields::new(port)))
            .collect(),
    })
}

pub fn fans(value: &Value) -> Vec<Fan> {
    list(value, |f| Fan {
        name: f.string(&["name", "Name", "FanName"]),
        rpm: f.u32(&["rpm", "speed_rpm", "Reading"]),
        state: f.string(&["state", "Status.State"]),
        health: f.health(),
    })
}

pub fn psus(value: &Value) -> Vec<Psu> {
    list(value, |f| Psu {
        name: f.string(&["name", "Name"]),
        model: f.string(&["model", "Model"]),
        serial: f.string(SERIAL_KEYS),
        firmware_version: f.string(&["firmware_version", "FirmwareVersion"]),
        capacity_watts: f.f64(&["capacity_watts", "PowerCapacityWatts"]),
        output_watts: f.f64(&["output_watts", "LastPowerOutputWatts", "PowerOutputWatts"]),
        input_voltage: f.f64(&["input_voltage", "LineInputVoltage"]),
        health: f.health(),
    })
}

pub fn power_consumption(value: &Value) -> PowerConsumption {
    let f = Fields::new(value);
    PowerConsumption {
        consumed_watts: f.f64(&[
            "consumed_watts",
            "PowerConsumedWatts",
            "PowerControl.0.PowerConsumedWatts",
        ]),
        average_watts: f.f64(&[
            "average_watts",
            "PowerMetrics.AverageConsumedWatts",
            "PowerControl.0.PowerMetrics.AverageConsumedWatts",
        ]),
        min_watts: f.f64(&[
            "min_watts",
            "PowerMetrics.MinConsumedWatts",
            "PowerControl.0.PowerMetrics.MinConsumedWatts",
        ]),
        max_watts: f.f64(&[
            "max_watts",
            "PowerMetrics.MaxConsumedWatts",
            "PowerControl.0.PowerMetrics.MaxConsumedWatts",
        ]),
        capacity_watts: f.f64(&[
            "capacity_watts",
            "PowerCapacityWatts",
            "PowerControl.0.PowerCapacityWatts",
        ]),
    }
}

pub fn system_health(value: &Value) -> SystemHealth {
    let f = Fields::new(value);
    SystemHealth {
        overall: f.string(&["overall", "health", "Status.HealthRollup", "Status.Health"]),
        processors: f.string(&["processors", "cpus", "ProcessorSummary.Status.HealthRollup"]),
        memory: f.string(&["memory", "MemorySummary.Status.HealthRollup"]),
        storage: f.string(&["storage"]),
        fans: f.string(&["fans"]),
        power_supplies: f.string(&["power_supplies", "psus"]),
    }
}

// ============================================
// 存储
// ============================================

fn drive(f: &Fields) -> Drive {
    Drive {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        manufacturer: f.string(&["manufacturer", "Manufacturer"]),
        model: f.string(&["model", "Model"]),
        serial: f.string(SERIAL_KEYS),
        media_type: f.string(&["media_type", "MediaType"]),
        protocol: f.string(&["protocol", "Protocol"]),
        capacity_bytes: f.u64(&["capacity_bytes", "CapacityBytes"]),
        health: f.health(),
        failure_predicted: f.bool(&["failure_predicted", "FailurePredicted"]),
    }
}

pub fn storage_controllers(value: &Value) -> Vec<StorageController> {
    list(value, |f| StorageController {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        manufacturer: f.string(&["manufacturer", "Manufacturer"]),
        model: f.string(&["model", "Model"]),
        firmware_version: f.string(&["firmware_version", "FirmwareVersion"]),
        health: f.health(),
        drives: f
            .records(&["drives", "Drives"])
            .into_iter()
            .map(|d| drive(&Fields::new(d)))
            .collect(),
    })
}

pub fn drives(value: &Value) -> Vec<Drive> {
    list(value, drive)
}

/// 卷成员磁盘的 ID，接受字符串或 `{"@odata.id": ".../Drives/0"}` 形式的引用
fn member_drive_id(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => as_string(value),
        Value::Object(_) => {
            let f = Fields::new(value);
            f.string(&["id", "Id"]).or_else(|| {
                f.string(&["@odata.id"])
                    .and_then(|path| path.rsplit('/').next().map(str::to_string))
                    .filter(|id| !id.is_empty())
            })
        }
        _ => None,
    }
}

pub fn volumes(value: &Value) -> Vec<Volume> {
    list(value, |f| Volume {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        raid_type: f.string(&["raid_type", "RAIDType", "VolumeType"]),
        capacity_bytes: f.u64(&["capacity_bytes", "CapacityBytes"]),
        health: f.health(),
        drives: ["drives", "Links.Drives"]
            .iter()
            .find_map(|key| f.get(key).and_then(Value::as_array))
            .map(|items| items.iter().filter_map(member_drive_id).collect::<Vec<_>>())
            .unwrap_or_default(),
    })
}

pub fn storage_summary(value: &Value) -> StorageSummary {
    let f = Fields::new(value);
    StorageSummary {
        controller_count: f
            .u32(&["controller_count"])
            .or_else(|| f.len_of(&["controllers"])),
        drive_count: f.u32(&["drive_count"]).or_else(|| f.len_of(&["drives"])),
        volume_count: f.u32(&["volume_count"]).or_else(|| f.len_of(&["volumes"])),
        total_capacity_bytes: f.u64(&["total_capacity_bytes", "total_capacity"]),
    }
}

// ============================================
// 虚拟介质与启动
// ============================================

pub fn virtual_media(value: &Value) -> Vec<VirtualMedia> {
    list(value, |f| VirtualMedia {
        id: f.string(&["id", "Id", "device"]),
        name: f.string(&["name", "Name"]),
        inserted: f.bool(&["inserted", "Inserted"]),
        image: f.string(&["image", "Image"]),
        media_types: f.strings(&["media_types", "MediaTypes"]),
        connected_via: f.string(&["connected_via", "ConnectedVia"]),
        write_protected: f.bool(&["write_protected", "WriteProtected"]),
    })
}

pub fn virtual_media_status(value: &Value) -> VirtualMediaStatus {
    let f = Fields::new(value);
    VirtualMediaStatus {
        inserted: f.bool(&["inserted", "Inserted"]),
        image: f.string(&["image", "Image"]),
        device: f.string(&["device", "id", "Id"]),
        connected_via: f.string(&["connected_via", "ConnectedVia"]),
    }
}

pub fn boot_options(value: &Value) -> Vec<BootOption> {
    list(value, |f| BootOption {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        display_name: f.string(&["display_name", "DisplayName"]),
        reference: f.string(&["reference", "boot_option_reference", "BootOptionReference"]),
        enabled: f.bool(&["enabled", "BootOptionEnabled"]),
        device_path: f.string(&["device_path", "UefiDevicePath"]),
    })
}

pub fn boot_settings(value: &Value) -> BootSettings {
    let f = Fields::new(value);
    BootSettings {
        target: f.string(&[
            "target",
            "BootSourceOverrideTarget",
            "Boot.BootSourceOverrideTarget",
        ]),
        persistence: f.string(&[
            "persistence",
            "BootSourceOverrideEnabled",
            "Boot.BootSourceOverrideEnabled",
        ]),
        mode: f.string(&["mode", "BootSourceOverrideMode", "Boot.BootSourceOverrideMode"]),
        allowed_targets: f.strings(&[
            "allowed_targets",
            "BootSourceOverrideTarget@Redfish.AllowableValues",
            "Boot.BootSourceOverrideTarget@Redfish.AllowableValues",
        ]),
        boot_order: f.strings(&["boot_order", "BootOrder", "Boot.BootOrder"]),
    }
}

// ============================================
// 任务与日志
// ============================================

fn job_record(f: &Fields) -> Job {
    Job {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        state: f.string(&["state", "JobState", "TaskState"]),
        health: f.string(&["health", "TaskStatus", "Status.Health"]),
        percent_complete: f
            .u64(&["percent_complete", "PercentComplete"])
            .filter(|p| *p <= 100)
            .map(|p| p as u8),
        message: f.string(&["message", "Message", "Messages.0.Message"]),
        start_time: f.datetime(&["start_time", "StartTime"]),
        end_time: f.datetime(&["end_time", "EndTime"]),
    }
}

pub fn jobs(value: &Value) -> Vec<Job> {
    list(value, job_record)
}

pub fn job(value: &Value) -> Job {
    job_record(&Fields::new(value))
}

pub fn jobs_summary(value: &Value) -> JobsSummary {
    let f = Fields::new(value);
    JobsSummary {
        total: f.u32(&["total", "count"]),
        running: f.u32(&["running"]),
        completed: f.u32(&["completed"]),
        failed: f.u32(&["failed"]),
    }
}

pub fn sel_entries(value: &Value) -> Vec<SelEntry> {
    list(value, |f| SelEntry {
        id: f.string(&["id", "Id"]),
        created: f.datetime(&["created", "Created", "timestamp"]),
        severity: f.string(&["severity", "Severity"]),
        message: f.string(&["message", "Message"]),
        entry_type: f.string(&["entry_type", "EntryType"]),
        sensor_type: f.string(&["sensor_type", "SensorType"]),
    })
}

// ============================================
// 账户与 BMC
// ============================================

pub fn accounts(value: &Value) -> Vec<Account> {
    list(value, |f| Account {
        id: f.string(&["id", "Id"]),
        username: f.string(&["username", "UserName"]),
        role: f.string(&["role", "RoleId"]),
        enabled: f.bool(&["enabled", "Enabled"]),
        locked: f.bool(&["locked", "Locked"]),
    })
}

pub fn sessions(value: &Value) -> Vec<Session> {
    list(value, |f| Session {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        username: f.string(&["username", "UserName"]),
    })
}

pub fn service_info(value: &Value) -> ServiceInfo {
    let f = Fields::new(value);
    ServiceInfo {
        vendor: f
            .string(&["vendor", "Vendor"])
            .map(|v| normalize_manufacturer(&v)),
        product: f.string(&["product", "Product"]),
        redfish_version: f.string(&["redfish_version", "RedfishVersion"]),
        uuid: f.string(&["uuid", "UUID"]),
    }
}

pub fn bmc_info(value: &Value) -> BmcInfo {
    let f = Fields::new(value);
    BmcInfo {
        firmware_version: f.string(&["firmware_version", "FirmwareVersion"]),
        model: f.string(&["model", "Model"]),
        mac_address: f.string(&["mac_address", "mac", "MACAddress"]),
        ip_address: f.string(&["ip_address", "ip", "IPv4Addresses.0.Address"]),
        hostname: f.string(&["hostname", "HostName"]),
        health: f.health(),
    }
}

pub fn licenses(value: &Value) -> Vec<License> {
    list(value, |f| License {
        id: f.string(&["id", "Id"]),
        name: f.string(&["name", "Name"]),
        license_type: f.string(&["license_type", "type", "LicenseType"]),
        expiration: f.string(&["expiration", "ExpirationDate"]),
        status: f.string(&["status", "Status.State"]),
    })
}

pub fn bmc_network(value: &Value) -> BmcNetwork {
    let f = Fields::new(value);
    let dhcp_enabled = f.bool(&["dhcp_enabled", "DHCPv4.DHCPEnabled"]).or_else(|| {
        f.string(&["IPv4Addresses.0.AddressOrigin"])
            .and_then(|origin| match origin.as_str() {
                "DHCP" => Some(true),
                "Static" => Some(false),
                _ => None,
            })
    });

    BmcNetwork {
        ip_address: f.string(&["ip_address", "ipv4_address", "IPv4Addresses.0.Address"]),
        subnet_mask: f.string(&["subnet_mask", "IPv4Addresses.0.SubnetMask"]),
        gateway: f.string(&["gateway", "IPv4Addresses.0.Gateway"]),
        mac_address: f.string(&["mac_address", "MACAddress"]),
        hostname: f.string(&["hostname", "HostName"]),
        dhcp_enabled,
        dns_servers: f.strings(&["dns_servers", "NameServers", "StaticNameServers"]),
    }
}

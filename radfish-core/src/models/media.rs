//! 虚拟介质

use serde::{Deserialize, Serialize};

/// 虚拟介质设备
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMedia {
    pub id: Option<String>,
    pub name: Option<String>,
    pub inserted: Option<bool>,
    pub image: Option<String>,
    pub media_types: Vec<String>,
    pub connected_via: Option<String>,
    pub write_protected: Option<bool>,
}

/// 虚拟介质挂载状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualMediaStatus {
    pub inserted: Option<bool>,
    pub image: Option<String>,
    pub device: Option<String>,
    pub connected_via: Option<String>,
}

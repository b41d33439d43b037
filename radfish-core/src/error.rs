//! Radfish 错误定义
//!
//! 所有厂商适配器共享的错误分类。厂商客户端的错误在适配器内被重新归类为
//! 以下几种类型之一，无法归类的错误原样透传（`Unclassified`）。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// BMC 无法连接目标资源，或操作未能建立连接
    Connection,
    /// 缺少所需的许可证
    License,
    /// 资源忙（如虚拟介质已插入）
    Busy,
    /// 资源不存在
    NotFound,
    /// 操作超时
    Timeout,
    /// 参数无效（在发起任何请求之前检出）
    InvalidArgument,
    /// 其它操作失败
    Operation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Connection => "connection",
            ErrorKind::License => "license",
            ErrorKind::Busy => "busy",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Operation => "operation",
        };
        f.write_str(name)
    }
}

/// Radfish 错误类型
#[derive(Error, Debug)]
pub enum RadfishError {
    #[error("连接错误: {0}")]
    Connection(String),

    #[error("许可证错误: {0}")]
    License(String),

    #[error("资源忙: {0}")]
    Busy(String),

    #[error("资源不存在: {0}")]
    NotFound(String),

    #[error("超时错误: {0}")]
    Timeout(String),

    #[error("参数无效: {0}")]
    InvalidArgument(String),

    #[error("操作失败: {0}")]
    Operation(String),

    /// 未经分类的底层错误，原样透传
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl RadfishError {
    /// 根据错误类型构造错误
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Connection => RadfishError::Connection(message),
            ErrorKind::License => RadfishError::License(message),
            ErrorKind::Busy => RadfishError::Busy(message),
            ErrorKind::NotFound => RadfishError::NotFound(message),
            ErrorKind::Timeout => RadfishError::Timeout(message),
            ErrorKind::InvalidArgument => RadfishError::InvalidArgument(message),
            ErrorKind::Operation => RadfishError::Operation(message),
        }
    }

    /// 错误类型，未分类错误返回 `None`
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            RadfishError::Connection(_) => Some(ErrorKind::Connection),
            RadfishError::License(_) => Some(ErrorKind::License),
            RadfishError::Busy(_) => Some(ErrorKind::Busy),
            RadfishError::NotFound(_) => Some(ErrorKind::NotFound),
            RadfishError::Timeout(_) => Some(ErrorKind::Timeout),
            RadfishError::InvalidArgument(_) => Some(ErrorKind::InvalidArgument),
            RadfishError::Operation(_) => Some(ErrorKind::Operation),
            RadfishError::Unclassified(_) => None,
        }
    }

    /// 原始错误信息（不含分类前缀）
    pub fn message(&self) -> String {
        match self {
            RadfishError::Connection(m)
            | RadfishError::License(m)
            | RadfishError::Busy(m)
            | RadfishError::NotFound(m)
            | RadfishError::Timeout(m)
            | RadfishError::InvalidArgument(m)
            | RadfishError::Operation(m) => m.clone(),
            RadfishError::Unclassified(e) => e.to_string(),
        }
    }
}

/// Radfish 结果类型
pub type Result<T> = std::result::Result<T, RadfishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RadfishError::Connection("connection refused".to_string());
        assert_eq!(err.to_string(), "连接错误: connection refused");

        let err = RadfishError::InvalidArgument("controller_id".to_string());
        assert_eq!(err.to_string(), "参数无效: controller_id");
    }

    #[test]
    fn test_from_kind_keeps_message() {
        for kind in [
            ErrorKind::Connection,
            ErrorKind::License,
            ErrorKind::Busy,
            ErrorKind::NotFound,
            ErrorKind::Timeout,
            ErrorKind::InvalidArgument,
            ErrorKind::Operation,
        ] {
            let err = RadfishError::from_kind(kind, "raw text");
            assert_eq!(err.kind(), Some(kind));
            assert_eq!(err.message(), "raw text");
        }
    }

    #[test]
    fn test_unclassified_is_transparent() {
        let err: RadfishError = anyhow::anyhow!("socket closed").into();
        assert_eq!(err.kind(), None);
        assert_eq!(err.to_string(), "socket closed");
    }
}

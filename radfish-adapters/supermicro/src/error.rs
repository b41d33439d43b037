//! 厂商错误分类
//!
//! 按错误信息中的子串（区分大小写）把厂商客户端错误映射为 [`ErrorKind`]。
//! 匹配依赖上游错误文案，文案变化会让分类静默退化为 `Operation`，
//! 因此映射表集中定义在此处并由测试覆盖。

use radfish_core::{ErrorKind, RadfishError};
use tracing::debug;

use crate::client::ClientError;

/// 许可证错误的匹配子串，包括 Supermicro 许可证 SKU
pub const LICENSE_PATTERNS: &[&str] = &[
    "license",
    "SFT-OOB-LIC",
    "SFT-DCMS-SINGLE",
    "SFT-DCMS-SVC-KEY",
];

/// 通用分类表，按顺序匹配，首个命中生效
pub const CLASSIFICATION_TABLE: &[(&[&str], ErrorKind)] = &[
    (&["connection refused", "port number"], ErrorKind::Connection),
    (&["NotConnected", "not connected"], ErrorKind::Connection),
    (LICENSE_PATTERNS, ErrorKind::License),
    (&["already inserted", "busy"], ErrorKind::Busy),
    (&["not found", "No suitable"], ErrorKind::NotFound),
    (&["timeout"], ErrorKind::Timeout),
];

/// 弹出虚拟介质的分类表
pub const EJECT_CLASSIFICATION_TABLE: &[(&[&str], ErrorKind)] =
    &[(&["not found", "No suitable"], ErrorKind::NotFound)];

/// 弹出虚拟介质失败时附加的前缀
pub const EJECT_ERROR_PREFIX: &str = "弹出虚拟介质失败: ";

fn match_table(table: &[(&[&str], ErrorKind)], message: &str) -> Option<ErrorKind> {
    table
        .iter()
        .find(|(patterns, _)| patterns.iter().any(|p| message.contains(p)))
        .map(|(_, kind)| *kind)
}

/// 按通用分类表对错误信息分类
pub fn classify_message(message: &str) -> ErrorKind {
    match_table(CLASSIFICATION_TABLE, message).unwrap_or(ErrorKind::Operation)
}

/// 把厂商客户端错误转换为 Radfish 错误
///
/// 只有 [`ClientError::Vendor`] 会被分类，其它错误原样透传
pub fn classify(err: ClientError) -> RadfishError {
    match err {
        ClientError::Vendor(message) => {
            let kind = classify_message(&message);
            debug!("厂商错误分类: {} -> {}", message, kind);
            RadfishError::from_kind(kind, message)
        }
        ClientError::Other(e) => RadfishError::Unclassified(e),
    }
}

/// 弹出虚拟介质专用分类
///
/// 只区分资源不存在，其它厂商错误统一为带前缀的操作失败
pub fn classify_eject(err: ClientError) -> RadfishError {
    match err {
        ClientError::Vendor(message) => match match_table(EJECT_CLASSIFICATION_TABLE, &message) {
            Some(kind) => RadfishError::from_kind(kind, message),
            None => RadfishError::Operation(format!("{}{}", EJECT_ERROR_PREFIX, message)),
        },
        ClientError::Other(e) => RadfishError::Unclassified(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_connection() {
        assert_eq!(
            classify_message("connection refused: port number invalid"),
            ErrorKind::Connection
        );
        assert_eq!(classify_message("invalid port number"), ErrorKind::Connection);
        assert_eq!(classify_message("NotConnected"), ErrorKind::Connection);
        assert_eq!(classify_message("media not connected"), ErrorKind::Connection);
    }

    #[test]
    fn test_classify_license() {
        assert_eq!(classify_message("SFT-OOB-LIC required"), ErrorKind::License);
        assert_eq!(classify_message("a valid license is needed"), ErrorKind::License);
        for pattern in LICENSE_PATTERNS {
            let message = format!("activation requires {}", pattern);
            assert_eq!(classify_message(&message), ErrorKind::License);
        }
        assert_eq!(classify_message("needs a key"), ErrorKind::Operation);
    }

    #[test]
    fn test_classify_busy_not_found_timeout() {
        assert_eq!(classify_message("device already inserted"), ErrorKind::Busy);
        assert_eq!(classify_message("BMC is busy"), ErrorKind::Busy);
        assert_eq!(classify_message("job JID_1 not found"), ErrorKind::NotFound);
        assert_eq!(classify_message("No suitable device"), ErrorKind::NotFound);
        assert_eq!(classify_message("read timeout"), ErrorKind::Timeout);
    }

    #[test]
    fn test_classify_priority() {
        // 连接错误优先于 not found
        assert_eq!(
            classify_message("connection refused: host not found"),
            ErrorKind::Connection
        );
        // 许可证优先于 busy
        assert_eq!(classify_message("license server busy"), ErrorKind::License);
        // busy 优先于 timeout
        assert_eq!(classify_message("busy, timeout waiting"), ErrorKind::Busy);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify_message("Connection Refused"), ErrorKind::Operation);
        assert_eq!(classify_message("TIMEOUT"), ErrorKind::Operation);
        assert_eq!(classify_message("License expired"), ErrorKind::Operation);
    }

    #[test]
    fn test_classify_generic_keeps_message() {
        let err = classify(ClientError::vendor("unexpected HTTP 500"));
        assert_eq!(err.kind(), Some(ErrorKind::Operation));
        assert_eq!(err.message(), "unexpected HTTP 500");
    }

    #[test]
    fn test_classify_deterministic() {
        let msg = "device already inserted";
        let first = classify(ClientError::vendor(msg)).kind();
        let second = classify(ClientError::vendor(msg)).kind();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify_other_passes_through() {
        let err = classify(ClientError::Other(anyhow::anyhow!("connection refused")));
        assert_eq!(err.kind(), None);
        assert!(matches!(err, RadfishError::Unclassified(_)));
    }

    #[test]
    fn test_classify_eject() {
        let err = classify_eject(ClientError::vendor("No suitable virtual media"));
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
        assert_eq!(err.message(), "No suitable virtual media");

        let err = classify_eject(ClientError::vendor("device already inserted"));
        assert_eq!(err.kind(), Some(ErrorKind::Operation));
        assert_eq!(err.message(), "弹出虚拟介质失败: device already inserted");

        let err = classify_eject(ClientError::Other(anyhow::anyhow!("io")));
        assert_eq!(err.kind(), None);
    }
}

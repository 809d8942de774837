use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Notification Level ====================

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// 通知分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    System,
    Kitchen,
    Business,
}

// ==================== Resources ====================

/// Resource names carried by [`SyncPayload::resource`]
pub mod resource {
    pub const DINING_TABLE: &str = "dining_table";
    pub const ORDER: &str = "order";
    pub const PAYMENT: &str = "payment";
    pub const MENU_ITEM: &str = "menu_item";
}

// ==================== Payloads ====================

/// 通知载荷 (服务端 -> 客户端)
///
/// Shown to staff as a transient toast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
    pub category: NotificationCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// 同步信号载荷 (服务端 -> 所有客户端)
///
/// Broadcast whenever a resource changes. Clients treat it as a hint to
/// re-fetch; `data` is informational only.
///
/// # 示例
/// - `resource`: "dining_table"
/// - `version`: 42
/// - `action`: "updated"
/// - `id`: "7"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub resource: String,
    pub version: u64,
    /// "created", "updated", "deleted"
    pub action: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// ==================== Convenience Constructors ====================

impl NotificationPayload {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Info,
            category: NotificationCategory::System,
            data: None,
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Warning,
            category: NotificationCategory::System,
            data: None,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NotificationLevel::Error,
            category: NotificationCategory::System,
            data: None,
        }
    }
}

impl SyncPayload {
    pub fn new(
        resource: impl Into<String>,
        version: u64,
        action: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            version,
            action: action.into(),
            id: id.into(),
            data: None,
        }
    }
}

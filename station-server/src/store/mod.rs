//! 实体存储模块
//!
//! 四个平面 JSON 集合文件 (users / departments / tasks / notifications)，
//! 每次操作整读整写。跨集合没有事务：任务写入和随后的通知写入是两次
//! 独立的存储操作。
//!
//! - [`JsonStore`] - 文件存储实现
//! - [`Collection`] - 集合枚举
//! - [`StoreError`] - 存储错误

pub mod json;
pub mod seed;

pub use json::{Collection, JsonStore};

use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt data in {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {collection}: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

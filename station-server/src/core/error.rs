use thiserror::Error;

use crate::store::StoreError;

/// 服务器启动与运行期错误 (非请求级)
///
/// 请求处理器使用 [`crate::utils::AppError`]。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("存储错误: {0}")]
    Store(#[from] StoreError),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务器级 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

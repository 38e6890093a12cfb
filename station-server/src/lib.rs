//! Station Server - 校园新媒体工作站管理系统后端
//!
//! # 架构概述
//!
//! 本模块是工作站后端的主入口，提供以下核心功能：
//!
//! - **实体存储** (`store`): 基于 JSON 文件的整读整写存储
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **任务生命周期** (`tasks`): 任务创建、状态流转、角色可见性
//! - **通知扇出** (`notify`): 任务事件衍生的通知记录
//! - **统计** (`stats`): 完成率 / 逾期率快照
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! station-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── store/         # JSON 文件实体存储与种子数据
//! ├── auth/          # JWT 认证、密码哈希
//! ├── users.rs       # 用户目录 (登录、查询、成员搜索)
//! ├── tasks/         # 任务生命周期引擎
//! ├── notify/        # 通知扇出
//! ├── stats/         # 统计聚合
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod notify;
pub mod stats;
pub mod store;
pub mod tasks;
pub mod users;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use notify::NotificationFanout;
pub use stats::StatsAggregator;
pub use store::{Collection, JsonStore, StoreError};
pub use tasks::TaskLifecycle;
pub use users::UserDirectory;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 认证与权限相关事件走统一 target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __        __  _
  / ___// /_____ _/ /_(_)___  ____
  \__ \/ __/ __ `/ __/ / __ \/ __ \
 ___/ / /_/ /_/ / /_/ / /_/ / / / /
/____/\__/\__,_/\__/_/\____/_/ /_/
    "#
    );
}

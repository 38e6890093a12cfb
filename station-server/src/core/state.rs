use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::store::{JsonStore, seed};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<JsonStore> | JSON 文件实体存储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// 任务引擎、通知扇出等按请求构造 (参见各 handler)，
/// 只共享底层存储。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// JSON 文件实体存储
    pub store: Arc<JsonStore>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, store: Arc<JsonStore>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            store,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据目录 (确保目录存在)
    /// 2. 种子数据 (缺失的集合文件写入初始数据)
    /// 3. JWT 服务
    pub async fn initialize(config: &Config) -> crate::core::Result<Self> {
        let store = Arc::new(JsonStore::new(PathBuf::from(&config.data_dir)));
        store.ensure_data_dir()?;
        seed::ensure_seed_data(&store).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), store, jwt_service))
    }

    /// 获取存储实例
    pub fn get_store(&self) -> Arc<JsonStore> {
        self.store.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

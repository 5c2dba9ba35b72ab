use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, GradingConfig};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 常用环境变量到配置项的映射，优先级高于 `PORTAL_*`
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("app.environment", "APP_ENV"),
    ("app.log_level", "RUST_LOG"),
    ("server.host", "SERVER_HOST"),
    ("server.port", "SERVER_PORT"),
    ("server.unix_socket_path", "UNIX_SOCKET"),
    ("server.workers", "CPU_COUNT"),
    ("jwt.secret", "JWT_SECRET"),
    ("database.url", "DATABASE_URL"),
    ("cache.redis.url", "REDIS_URL"),
    ("cache.redis.key_prefix", "REDIS_KEY_PREFIX"),
    ("cache.default_ttl", "REDIS_TTL"),
    ("upload.dir", "UPLOAD_DIR"),
    ("grading.max_import_rows", "MAX_IMPORT_ROWS"),
];

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("PORTAL")
                    .separator("_")
                    .try_parsing(true),
            );

        for (key, var) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers).max(1);
        }

        app_config.validate()?;

        Ok(app_config)
    }

    /// 校验配置中的业务约束
    fn validate(&self) -> Result<(), ConfigError> {
        self.grading.validate()?;
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.upload.max_size == 0 {
            return Err(ConfigError::Message("upload.max_size must be positive".into()));
        }
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

impl GradingConfig {
    /// 分项满分均为正数且合计 100
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parts = [self.coursework_max, self.midterm_max, self.final_max];
        if parts.iter().any(|max| !max.is_finite() || *max <= 0.0) {
            return Err(ConfigError::Message(
                "grading component maxima must be positive".into(),
            ));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 100.0).abs() > 1e-6 {
            return Err(ConfigError::Message(format!(
                "grading component maxima must add up to 100, got {sum}"
            )));
        }
        if self.max_import_rows == 0 {
            return Err(ConfigError::Message(
                "grading.max_import_rows must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grading_validation() {
        let mut grading = GradingConfig::default();
        assert!(grading.validate().is_ok());

        grading.final_max = 50.0;
        assert!(grading.validate().is_err());

        grading = GradingConfig {
            coursework_max: -10.0,
            midterm_max: 70.0,
            final_max: 40.0,
            ..GradingConfig::default()
        };
        assert!(grading.validate().is_err());
    }
}

//! 测试配置模块
//!
//! 统一管理测试用的配置和日志目录，避免在项目路径中出现过多文件
//! 此模块仅在测试时编译

use std::path::{Path, PathBuf};

use super::Config;

/// 单元测试使用的配置，日志写入给定目录
pub fn test_config(log_dir: &Path) -> Config {
    let mut config = Config::default();
    config.log.level = "debug".to_string();
    config.log.dir = log_dir.to_string_lossy().into_owned();
    config.log.file = "cityroute-test".to_string();
    config.log.max_files = 1;
    config
}

/// 测试日志目录
pub fn test_log_dir(root: &Path) -> PathBuf {
    root.join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_creation() {
        let config = test_config(Path::new("data/tests/logs"));
        assert_eq!(config.log.level, "debug");
        assert!(config.log.dir.ends_with("logs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_dir_path() {
        let path = test_log_dir(Path::new("data/tests"));
        assert!(path.ends_with("data/tests/logs"));
    }
}

// 日志工具模块
//
// 封装 flexi_logger 的初始化和关闭操作，确保异步日志正确 flush

use crate::config::Config;
use crate::core::error::{RouteError, RouteResult};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::sync::Mutex;

/// 全局日志句柄，用于程序退出时 flush
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// 初始化日志系统
///
/// 引擎本身只通过 `log` 宏输出，调用方可以选择使用此函数启动文件日志，
/// 也可以安装自己的 `log` 实现
///
/// # Arguments
/// * `config` - 引擎配置，包含日志相关参数
///
/// # Returns
/// * `Ok(())` - 初始化成功
/// * `Err(RouteError::Internal)` - 日志系统已初始化或启动失败
pub fn init(config: &Config) -> RouteResult<()> {
    let mut guard = LOGGER_HANDLE
        .lock()
        .map_err(|e| RouteError::Internal(format!("日志句柄锁被污染: {}", e)))?;
    if guard.is_some() {
        return Err(RouteError::Internal("日志系统已初始化".to_string()));
    }

    let handle = Logger::try_with_str(&config.log.level)?
        .log_to_file(
            FileSpec::default()
                .basename(&config.log.file)
                .directory(&config.log.dir),
        )
        .rotate(
            Criterion::Size(config.log.max_file_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.log.max_files),
        )
        .write_mode(WriteMode::Async)
        .append()
        .start()?;

    // 保存句柄供后续 flush 使用
    *guard = Some(handle);

    log::info!("日志系统初始化完成: {}/{}", config.log.dir, config.log.file);
    Ok(())
}

/// 刷新并关闭日志系统
///
/// 在程序退出前调用，确保所有异步日志都已写入文件
pub fn shutdown() {
    if let Ok(mut guard) = LOGGER_HANDLE.lock() {
        if let Some(handle) = guard.take() {
            handle.flush();
            // handle 在这里被 drop，会等待异步线程完成
        }
    }
}

/// 检查日志系统是否已初始化
pub fn is_initialized() -> bool {
    LOGGER_HANDLE
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}

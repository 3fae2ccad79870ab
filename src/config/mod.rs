use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{RouteError, RouteResult};

#[cfg(test)]
pub mod test_config;

/// 引擎配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub traffic: TrafficConfig,
    pub solver: SolverConfig,
}

/// 日志配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "cityroute".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files: 5,
        }
    }
}

/// 交通场景与重算策略配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    /// 自上次全量重算以来变化边占比达到该值时触发全量重算
    pub full_recompute_threshold: f64,
    pub rush_hour_factor: f64,
    pub night_factor: f64,
    /// 随机场景修改的边数占比
    pub random_fraction: f64,
    /// 封路场景封锁的边数占比
    pub road_block_fraction: f64,
    /// 周期性随机场景修改的边数占比
    pub periodic_fraction: f64,
    pub random: RandomTrafficConfig,
    pub night: NightModeConfig,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            full_recompute_threshold: 0.35,
            rush_hour_factor: 1.8,
            night_factor: 0.7,
            random_fraction: 0.25,
            road_block_fraction: 0.2,
            periodic_fraction: 0.1,
            random: RandomTrafficConfig::default(),
            night: NightModeConfig::default(),
        }
    }
}

/// 随机交通扰动参数
///
/// 以 `relief_probability` 的概率减少权重（拥堵缓解），否则增加权重（拥堵加剧），
/// 结果截断到 `[clamp_min, clamp_max]`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RandomTrafficConfig {
    pub relief_probability: f64,
    pub relief_min: f64,
    pub relief_max: f64,
    pub congestion_min: f64,
    pub congestion_max: f64,
    pub clamp_min: f64,
    pub clamp_max: f64,
}

impl Default for RandomTrafficConfig {
    fn default() -> Self {
        Self {
            relief_probability: 0.3,
            relief_min: 1.0,
            relief_max: 4.0,
            congestion_min: 1.0,
            congestion_max: 7.0,
            clamp_min: -10.0,
            clamp_max: 25.0,
        }
    }
}

/// 夜间模式参数，权重乘以系数后加上 `[0, jitter_max)` 的随机抖动
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct NightModeConfig {
    pub jitter_max: f64,
    pub clamp_min: f64,
    pub clamp_max: f64,
}

impl Default for NightModeConfig {
    fn default() -> Self {
        Self {
            jitter_max: 2.0,
            clamp_min: 0.0,
            clamp_max: 25.0,
        }
    }
}

/// 精确求解器的规模上限
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub exact_scheduling_max_jobs: usize,
    pub exact_tsp_max_nodes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            exact_scheduling_max_jobs: 12,
            exact_tsp_max_nodes: 10,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> RouteResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> RouteResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> RouteResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> RouteResult<()> {
        let traffic = &self.traffic;
        if !(traffic.full_recompute_threshold > 0.0 && traffic.full_recompute_threshold <= 1.0) {
            return Err(RouteError::Config(format!(
                "full_recompute_threshold 必须位于 (0, 1]: {}",
                traffic.full_recompute_threshold
            )));
        }

        for (name, value) in [
            ("random_fraction", traffic.random_fraction),
            ("road_block_fraction", traffic.road_block_fraction),
            ("periodic_fraction", traffic.periodic_fraction),
            ("random.relief_probability", traffic.random.relief_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RouteError::Config(format!("{} 必须位于 [0, 1]: {}", name, value)));
            }
        }

        for (name, factor) in [
            ("rush_hour_factor", traffic.rush_hour_factor),
            ("night_factor", traffic.night_factor),
        ] {
            if !factor.is_finite() || factor < 0.0 {
                return Err(RouteError::Config(format!("{} 必须为非负有限数: {}", name, factor)));
            }
        }

        let random = &traffic.random;
        for (name, low, high) in [
            ("random.relief", random.relief_min, random.relief_max),
            ("random.congestion", random.congestion_min, random.congestion_max),
            ("random.clamp", random.clamp_min, random.clamp_max),
            ("night.clamp", traffic.night.clamp_min, traffic.night.clamp_max),
        ] {
            if !(low <= high) {
                return Err(RouteError::Config(format!(
                    "{} 区间非法: [{}, {}]",
                    name, low, high
                )));
            }
        }

        if traffic.night.jitter_max < 0.0 {
            return Err(RouteError::Config("night.jitter_max 不能为负".to_string()));
        }

        if self.solver.exact_scheduling_max_jobs == 0 || self.solver.exact_tsp_max_nodes == 0 {
            return Err(RouteError::Config("精确求解器规模上限不能为0".to_string()));
        }

        Ok(())
    }
}

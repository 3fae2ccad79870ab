//! 交通场景
//!
//! 每个场景对未封锁的边做一次批量权重修改，并返回修改记录 `EdgeChange`

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{NightModeConfig, RandomTrafficConfig, TrafficConfig};
use crate::core::error::{RouteError, RouteResult};
use crate::graph::{EdgeId, NodeId, RoadGraph, BLOCKED_THRESHOLD};

/// 一条边的权重变化
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeChange {
    pub edge: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub old_weight: f64,
    pub new_weight: f64,
}

/// 场景种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    Random,
    RushHour,
    NightMode,
    RoadBlock,
    PeriodicRandom,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::Random,
        ScenarioKind::RushHour,
        ScenarioKind::NightMode,
        ScenarioKind::RoadBlock,
        ScenarioKind::PeriodicRandom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Random => "random",
            ScenarioKind::RushHour => "rush-hour",
            ScenarioKind::NightMode => "night-mode",
            ScenarioKind::RoadBlock => "road-block",
            ScenarioKind::PeriodicRandom => "periodic-random",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| RouteError::InvalidRequest(format!("未知的交通场景: {}", s)))
    }
}

/// 带参数的交通场景
#[derive(Debug, Clone, PartialEq)]
pub enum TrafficScenario {
    /// 随机选取 `count` 条边做有界随机扰动
    Random {
        count: usize,
        params: RandomTrafficConfig,
    },
    /// 所有未封锁的边乘以 `factor`
    RushHour { factor: f64 },
    /// 所有未封锁的边乘以 `factor` 再加随机抖动
    NightMode {
        factor: f64,
        params: NightModeConfig,
    },
    /// 随机封锁 `count` 条边
    RoadBlock { count: usize },
    /// 小规模的随机扰动，规则与 `Random` 相同
    PeriodicRandom {
        count: usize,
        params: RandomTrafficConfig,
    },
}

/// 按比例计算受影响的边数，至少为 1
fn fraction_of(edge_count: usize, fraction: f64) -> usize {
    ((edge_count as f64 * fraction).floor() as usize).max(1)
}

impl TrafficScenario {
    /// 根据配置构造场景，边数按当前图的边数计算
    pub fn from_config(kind: ScenarioKind, config: &TrafficConfig, edge_count: usize) -> Self {
        match kind {
            ScenarioKind::Random => TrafficScenario::Random {
                count: fraction_of(edge_count, config.random_fraction),
                params: config.random.clone(),
            },
            ScenarioKind::RushHour => TrafficScenario::RushHour {
                factor: config.rush_hour_factor,
            },
            ScenarioKind::NightMode => TrafficScenario::NightMode {
                factor: config.night_factor,
                params: config.night.clone(),
            },
            ScenarioKind::RoadBlock => TrafficScenario::RoadBlock {
                count: fraction_of(edge_count, config.road_block_fraction),
            },
            ScenarioKind::PeriodicRandom => TrafficScenario::PeriodicRandom {
                count: fraction_of(edge_count, config.periodic_fraction),
                params: config.random.clone(),
            },
        }
    }

    pub fn kind(&self) -> ScenarioKind {
        match self {
            TrafficScenario::Random { .. } => ScenarioKind::Random,
            TrafficScenario::RushHour { .. } => ScenarioKind::RushHour,
            TrafficScenario::NightMode { .. } => ScenarioKind::NightMode,
            TrafficScenario::RoadBlock { .. } => ScenarioKind::RoadBlock,
            TrafficScenario::PeriodicRandom { .. } => ScenarioKind::PeriodicRandom,
        }
    }

    /// 把场景应用到图上，返回所有被修改的边
    ///
    /// 只会选取未封锁的边；图中没有可修改的边时返回空列表
    pub fn apply<R: Rng>(
        &self,
        graph: &mut RoadGraph,
        rng: &mut R,
    ) -> RouteResult<Vec<EdgeChange>> {
        let mut open = graph.open_edge_ids();
        if open.is_empty() {
            return Ok(Vec::new());
        }

        let mut updates: Vec<(EdgeId, f64)> = Vec::new();
        match self {
            TrafficScenario::Random { count, params }
            | TrafficScenario::PeriodicRandom { count, params } => {
                open.shuffle(rng);
                for id in open.into_iter().take(*count) {
                    let old = graph.require_edge(id)?.weight;
                    updates.push((id, perturb(old, params, rng)));
                }
            }
            TrafficScenario::RushHour { factor } => {
                for id in open {
                    let old = graph.require_edge(id)?.weight;
                    updates.push((id, old * factor));
                }
            }
            TrafficScenario::NightMode { factor, params } => {
                for id in open {
                    let old = graph.require_edge(id)?.weight;
                    let jitter = rng.gen::<f64>() * params.jitter_max;
                    let new = (old * factor + jitter).max(params.clamp_min).min(params.clamp_max);
                    updates.push((id, new));
                }
            }
            TrafficScenario::RoadBlock { count } => {
                open.shuffle(rng);
                for id in open.into_iter().take(*count) {
                    updates.push((id, BLOCKED_THRESHOLD));
                }
            }
        }

        let mut changes = Vec::with_capacity(updates.len());
        for (id, new_weight) in updates {
            let old_weight = graph.set_weight(id, new_weight)?;
            let edge = graph.require_edge(id)?;
            changes.push(EdgeChange {
                edge: id,
                from: edge.from,
                to: edge.to,
                old_weight,
                new_weight,
            });
        }
        Ok(changes)
    }
}

/// 随机扰动：以一定概率缓解（减少权重），否则加剧，然后截断
fn perturb<R: Rng>(old: f64, params: &RandomTrafficConfig, rng: &mut R) -> f64 {
    let delta = if rng.gen::<f64>() < params.relief_probability {
        -(params.relief_min + rng.gen::<f64>() * (params.relief_max - params.relief_min))
    } else {
        params.congestion_min + rng.gen::<f64>() * (params.congestion_max - params.congestion_min)
    };
    (old + delta).max(params.clamp_min).min(params.clamp_max)
}

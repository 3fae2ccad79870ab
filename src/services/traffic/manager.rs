//! 交通管理器
//!
//! 维护路径缓存和交通版本号；场景修改边权后只淘汰经过被修改边的缓存条目，
//! 重算时根据自上次全量重算以来的变化比例在 Dijkstra（全量）和 A*（增量）之间选择

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::scenario::{EdgeChange, ScenarioKind, TrafficScenario};
use crate::cache::{Cache, CacheStats, PathCache};
use crate::config::TrafficConfig;
use crate::core::error::RouteResult;
use crate::graph::{EdgeId, NodeId, RoadGraph};
use crate::services::algorithm::{AStar, BellmanFord, Dijkstra, PathResult};

/// 一次重算使用的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecomputeStrategy {
    /// 直接返回缓存
    Cached,
    /// Dijkstra 全量重算
    Full,
    /// A* 增量重算
    Incremental,
    /// 图中存在负权边，只能使用 Bellman-Ford
    BellmanFord,
}

impl fmt::Display for RecomputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecomputeStrategy::Cached => "cached",
            RecomputeStrategy::Full => "full (Dijkstra)",
            RecomputeStrategy::Incremental => "incremental (A*)",
            RecomputeStrategy::BellmanFord => "full (Bellman-Ford)",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct TrafficManager {
    config: TrafficConfig,
    cache: PathCache,
    traffic_version: u64,
    last_full_recompute: Option<u64>,
    changed_since_full: HashSet<EdgeId>,
    last_changes: Vec<EdgeChange>,
}

impl Default for TrafficManager {
    fn default() -> Self {
        Self::new(TrafficConfig::default())
    }
}

impl TrafficManager {
    /// 创建管理器：空缓存，版本号为 0，从未全量重算
    pub fn new(config: TrafficConfig) -> Self {
        Self {
            config,
            cache: PathCache::new(),
            traffic_version: 0,
            last_full_recompute: None,
            changed_since_full: HashSet::new(),
            last_changes: Vec::new(),
        }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn traffic_version(&self) -> u64 {
        self.traffic_version
    }

    pub fn last_full_recompute(&self) -> Option<u64> {
        self.last_full_recompute
    }

    pub fn last_changes(&self) -> &[EdgeChange] {
        &self.last_changes
    }

    /// 自上次全量重算以来被修改过的不同边的数量
    pub fn changed_since_full(&self) -> usize {
        self.changed_since_full.len()
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 查看缓存条目，不计入命中统计
    pub fn cached(&self, source: NodeId, destination: NodeId) -> Option<&PathResult> {
        self.cache.peek(&(source, destination))
    }

    /// 按配置构造场景并应用
    pub fn apply_kind<R: Rng>(
        &mut self,
        graph: &mut RoadGraph,
        kind: ScenarioKind,
        rng: &mut R,
    ) -> RouteResult<Vec<EdgeChange>> {
        let scenario = TrafficScenario::from_config(kind, &self.config, graph.edge_count());
        self.apply_scenario(graph, &scenario, rng)
    }

    /// 应用场景，版本号加一并淘汰受影响的缓存条目
    pub fn apply_scenario<R: Rng>(
        &mut self,
        graph: &mut RoadGraph,
        scenario: &TrafficScenario,
        rng: &mut R,
    ) -> RouteResult<Vec<EdgeChange>> {
        let changes = scenario.apply(graph, rng)?;
        let purged = self.register_changes(&changes, graph.is_directed());
        log::info!(
            "交通场景 {} 已应用: 修改 {} 条边, 淘汰 {} 条缓存, 版本 {}",
            scenario.kind(),
            changes.len(),
            purged,
            self.traffic_version
        );
        Ok(changes)
    }

    /// 登记一批边权变化（场景或调用方直接修改），返回淘汰的缓存条目数
    pub fn register_changes(&mut self, changes: &[EdgeChange], directed: bool) -> usize {
        self.traffic_version += 1;
        self.changed_since_full.extend(changes.iter().map(|c| c.edge));
        self.last_changes = changes.to_vec();
        self.invalidate_for_changes(changes, directed)
    }

    /// 淘汰路径经过任一变化边的缓存条目；没有可用路径的条目一并清除
    fn invalidate_for_changes(&mut self, changes: &[EdgeChange], directed: bool) -> usize {
        if changes.is_empty() || self.cache.is_empty() {
            return 0;
        }

        self.cache.invalidate_where(|_, result| {
            result.path_len() < 2
                || changes
                    .iter()
                    .any(|change| result.traverses(change.from, change.to, directed))
        })
    }

    /// 淘汰经过某个节点或以其为端点的缓存条目，用于删除节点
    pub fn invalidate_node(&mut self, node: NodeId) -> usize {
        let purged = self.cache.invalidate_where(|(source, destination), result| {
            *source == node || *destination == node || result.contains_node(node)
        });
        log::debug!("节点 {} 删除, 淘汰 {} 条缓存", node, purged);
        purged
    }

    /// 淘汰经过 from → to 的缓存条目，用于删除边
    pub fn invalidate_edge(&mut self, from: NodeId, to: NodeId, directed: bool) -> usize {
        self.cache
            .invalidate_where(|_, result| result.traverses(from, to, directed))
    }

    /// 选择重算策略
    pub fn choose_strategy(&self, graph: &RoadGraph) -> RecomputeStrategy {
        if graph.has_negative_weights() {
            return RecomputeStrategy::BellmanFord;
        }

        let total_edges = graph.edge_count();
        if total_edges == 0 {
            return RecomputeStrategy::Incremental;
        }
        if self.last_full_recompute.is_none() {
            return RecomputeStrategy::Full;
        }

        let fraction = self.changed_since_full.len() as f64 / total_edges as f64;
        if fraction >= self.config.full_recompute_threshold {
            RecomputeStrategy::Full
        } else {
            RecomputeStrategy::Incremental
        }
    }

    /// 考虑交通状况的最短路径重算
    pub fn recompute(
        &mut self,
        graph: &RoadGraph,
        source: NodeId,
        destination: NodeId,
    ) -> RouteResult<PathResult> {
        self.recompute_with_strategy(graph, source, destination)
            .map(|(result, _)| result)
    }

    /// 同 `recompute`，并返回实际使用的策略
    pub fn recompute_with_strategy(
        &mut self,
        graph: &RoadGraph,
        source: NodeId,
        destination: NodeId,
    ) -> RouteResult<(PathResult, RecomputeStrategy)> {
        graph.require_node(source)?;
        graph.require_node(destination)?;

        let key = (source, destination);
        if let Some(cached) = self.cache.get(&key) {
            if cached.is_success() {
                log::debug!("缓存命中: {} -> {}", source, destination);
                return Ok((cached, RecomputeStrategy::Cached));
            }
        }

        let strategy = self.choose_strategy(graph);
        let result = match strategy {
            RecomputeStrategy::Full | RecomputeStrategy::Cached => {
                Dijkstra::shortest_path(graph, source, destination)
            }
            RecomputeStrategy::Incremental => AStar::shortest_path(graph, source, destination),
            RecomputeStrategy::BellmanFord => BellmanFord::shortest_path(graph, source, destination),
        };

        if matches!(strategy, RecomputeStrategy::Full | RecomputeStrategy::BellmanFord) {
            self.last_full_recompute = Some(self.traffic_version);
            self.changed_since_full.clear();
        }

        log::debug!(
            "重算 {} -> {} 使用 {}: found={} cost={}",
            source,
            destination,
            strategy,
            result.found,
            result.total_cost
        );

        if result.is_success() {
            self.cache.put(key, result.clone());
        }
        Ok((result, strategy))
    }

    /// 清空缓存（图被重置时调用）
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// 回到初始状态
    pub fn reset(&mut self) {
        self.cache = PathCache::new();
        self.traffic_version = 0;
        self.last_full_recompute = None;
        self.changed_since_full.clear();
        self.last_changes.clear();
    }
}

//! 引擎入口
//!
//! `RoutingEngine` 持有配置和交通管理器，把寻路、决策、交通场景、
//! 调度和 TSP 求解组合成调用方使用的统一接口。图始终由调用方持有，每次调用时传入

use std::path::Path;

use rand::Rng;
use serde::Serialize;

use crate::config::Config;
use crate::core::error::RouteResult;
use crate::graph::{Edge, EdgeId, NodeId, RoadGraph};
use crate::services::algorithm::{self, AlgorithmKind, AlgorithmRecord, PathResult};
use crate::services::decision::{Decision, DecisionEngine};
use crate::services::scheduling::{SchedulingReport, VehicleScheduler};
use crate::services::traffic::{EdgeChange, ScenarioKind, TrafficManager, TrafficScenario};
use crate::services::tsp::{TspReport, TspSolver};

/// 一次“全部运行”的结果：六条记录及推荐结论
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunAllReport {
    pub records: Vec<AlgorithmRecord>,
    pub decision: Decision,
}

impl RunAllReport {
    /// 导出为 JSON，供界面层保存或展示
    pub fn to_json(&self) -> RouteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 路径规划引擎
///
/// # 示例
///
/// ```rust
/// use cityroute::{AlgorithmKind, RoadGraph, RoutingEngine};
///
/// # fn example() -> Result<(), cityroute::RouteError> {
/// let mut graph = RoadGraph::new(true);
/// let a = graph.add_node("A", 0.0, 0.0)?;
/// let b = graph.add_node("B", 1.0, 0.0)?;
/// graph.add_edge(a, b, 2.0)?;
///
/// let mut engine = RoutingEngine::default();
/// let result = engine.run_path_algorithm(&graph, AlgorithmKind::Dijkstra, a, b)?;
/// assert_eq!(result.total_cost, 2.0);
///
/// let report = engine.run_all(&graph, a, b)?;
/// assert!(report.decision.best.is_some());
///
/// let cached = engine.recompute_shortest_path(&graph, a, b)?;
/// assert!(cached.found);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    config: Config,
    traffic: TrafficManager,
    scheduler: VehicleScheduler,
    tsp: TspSolver,
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl RoutingEngine {
    pub fn new(config: Config) -> Self {
        let traffic = TrafficManager::new(config.traffic.clone());
        let scheduler = VehicleScheduler::new(&config.solver);
        let tsp = TspSolver::new(&config.solver);
        Self {
            config,
            traffic,
            scheduler,
            tsp,
        }
    }

    /// 从 TOML 配置文件创建引擎
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> RouteResult<Self> {
        Ok(Self::new(Config::load(path)?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn traffic(&self) -> &TrafficManager {
        &self.traffic
    }

    pub fn run_path_algorithm(
        &self,
        graph: &RoadGraph,
        kind: AlgorithmKind,
        source: NodeId,
        destination: NodeId,
    ) -> RouteResult<PathResult> {
        algorithm::run_path_algorithm(graph, kind, source, destination)
    }

    /// 执行全部算法并给出推荐
    pub fn run_all(
        &self,
        graph: &RoadGraph,
        source: NodeId,
        destination: NodeId,
    ) -> RouteResult<RunAllReport> {
        let records = algorithm::run_all_path_algorithms(graph, source, destination)?;
        let decision = self.decide(graph, &records);
        log::info!("{}", decision);
        Ok(RunAllReport { records, decision })
    }

    /// 按图的权重特征做决策
    pub fn decide(&self, graph: &RoadGraph, records: &[AlgorithmRecord]) -> Decision {
        DecisionEngine::decide(
            records,
            graph.has_negative_weights(),
            graph.all_weights_equal_positive(),
        )
    }

    /// 按配置应用交通场景
    pub fn apply_traffic_scenario<R: Rng>(
        &mut self,
        graph: &mut RoadGraph,
        kind: ScenarioKind,
        rng: &mut R,
    ) -> RouteResult<Vec<EdgeChange>> {
        self.traffic.apply_kind(graph, kind, rng)
    }

    /// 应用自定义参数的交通场景
    pub fn apply_custom_scenario<R: Rng>(
        &mut self,
        graph: &mut RoadGraph,
        scenario: &TrafficScenario,
        rng: &mut R,
    ) -> RouteResult<Vec<EdgeChange>> {
        self.traffic.apply_scenario(graph, scenario, rng)
    }

    /// 直接修改一条边的权重，并像场景一样登记变化
    pub fn set_edge_weight(
        &mut self,
        graph: &mut RoadGraph,
        edge: EdgeId,
        weight: f64,
    ) -> RouteResult<EdgeChange> {
        let old_weight = graph.set_weight(edge, weight)?;
        let current = graph.require_edge(edge)?;
        let change = EdgeChange {
            edge,
            from: current.from,
            to: current.to,
            old_weight,
            new_weight: weight,
        };
        self.traffic
            .register_changes(std::slice::from_ref(&change), graph.is_directed());
        Ok(change)
    }

    pub fn recompute_shortest_path(
        &mut self,
        graph: &RoadGraph,
        source: NodeId,
        destination: NodeId,
    ) -> RouteResult<PathResult> {
        self.traffic.recompute(graph, source, destination)
    }

    /// 删除节点及其关联边，并淘汰涉及它的缓存
    pub fn remove_node(&mut self, graph: &mut RoadGraph, node: NodeId) -> RouteResult<Vec<Edge>> {
        let removed = graph.remove_node(node)?;
        self.traffic.invalidate_node(node);
        Ok(removed)
    }

    /// 删除边，并淘汰经过它的缓存
    pub fn remove_edge(&mut self, graph: &mut RoadGraph, edge: EdgeId) -> RouteResult<Edge> {
        let removed = graph.remove_edge(edge)?;
        self.traffic
            .invalidate_edge(removed.from, removed.to, graph.is_directed());
        Ok(removed)
    }

    pub fn solve_vehicle_scheduling(
        &self,
        durations: &[f64],
        machines: usize,
    ) -> Option<SchedulingReport> {
        self.scheduler.solve(durations, machines)
    }

    pub fn solve_tsp(&self, graph: &RoadGraph, nodes: &[NodeId]) -> RouteResult<TspReport> {
        self.tsp.solve(graph, nodes)
    }

    /// 清空路径缓存（图被重置时调用）
    pub fn clear_cache(&mut self) {
        self.traffic.clear_cache();
    }

    /// 交通状态回到初始值
    pub fn reset(&mut self) {
        self.traffic.reset();
    }
}

/// 通过管理器应用场景：版本号加一并淘汰经过变化边的缓存
pub fn apply_traffic_scenario<R: Rng>(
    manager: &mut TrafficManager,
    graph: &mut RoadGraph,
    scenario: &TrafficScenario,
    rng: &mut R,
) -> RouteResult<Vec<EdgeChange>> {
    manager.apply_scenario(graph, scenario, rng)
}

pub fn recompute_shortest_path(
    manager: &mut TrafficManager,
    graph: &RoadGraph,
    source: NodeId,
    destination: NodeId,
) -> RouteResult<PathResult> {
    manager.recompute(graph, source, destination)
}

/// 使用默认规模上限求解调度
pub fn solve_vehicle_scheduling(durations: &[f64], machines: usize) -> Option<SchedulingReport> {
    VehicleScheduler::default().solve(durations, machines)
}

/// 使用默认规模上限求解 TSP
pub fn solve_tsp(graph: &RoadGraph, nodes: &[NodeId]) -> RouteResult<TspReport> {
    TspSolver::default().solve(graph, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::core::error::RouteError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line() -> (RoadGraph, Vec<NodeId>) {
        let mut graph = RoadGraph::new(false);
        let ids: Vec<NodeId> = (0..4).map(|i| graph.add_node_auto(i as f64, 0.0)).collect();
        for i in 0..3 {
            graph
                .add_edge(ids[i], ids[i + 1], 2.0)
                .expect("Edge should be added in test");
        }
        (graph, ids)
    }

    #[test]
    fn test_run_all_on_equal_weights_picks_bfs() {
        let (graph, ids) = line();
        let engine = RoutingEngine::default();

        let report = engine.run_all(&graph, ids[0], ids[3]).expect("Run all should succeed in test");
        assert_eq!(report.records.len(), 6);
        assert_eq!(
            report.decision.best.as_ref().map(|r| r.kind),
            Some(AlgorithmKind::Bfs)
        );
        assert_eq!(report.records[0].reason, "Path found");

        let json = report.to_json().expect("Report should serialize in test");
        let value: serde_json::Value = serde_json::from_str(&json).expect("JSON should parse in test");
        assert_eq!(value["records"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["decision"]["best"]["name"], "BFS");
    }

    #[test]
    fn test_remove_node_invalidates_cache() {
        let (mut graph, ids) = line();
        let mut engine = RoutingEngine::default();
        engine
            .recompute_shortest_path(&graph, ids[0], ids[3])
            .expect("Recompute should succeed in test");
        assert_eq!(engine.traffic().cache().stats().misses, 1);
        assert!(engine.traffic().cached(ids[0], ids[3]).is_some());

        let removed = engine.remove_node(&mut graph, ids[1]).expect("Node should be removed in test");
        assert_eq!(removed.len(), 2);
        assert!(engine.traffic().cached(ids[0], ids[3]).is_none());

        let result = engine
            .recompute_shortest_path(&graph, ids[0], ids[3])
            .expect("Recompute should succeed in test");
        assert!(!result.found);
        assert!(matches!(
            engine.recompute_shortest_path(&graph, ids[1], ids[3]),
            Err(RouteError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_set_edge_weight_and_remove_edge() {
        let (mut graph, ids) = line();
        let mut engine = RoutingEngine::default();
        engine
            .recompute_shortest_path(&graph, ids[0], ids[2])
            .expect("Recompute should succeed in test");
        engine
            .recompute_shortest_path(&graph, ids[2], ids[3])
            .expect("Recompute should succeed in test");

        let edge = graph.find_edge(ids[0], ids[1]).expect("Edge should exist in test").id;
        let change = engine
            .set_edge_weight(&mut graph, edge, 5.0)
            .expect("Weight should be set in test");
        assert_eq!(change.old_weight, 2.0);
        assert_eq!(engine.traffic().traffic_version(), 1);
        assert!(engine.traffic().cached(ids[0], ids[2]).is_none());
        assert!(engine.traffic().cached(ids[2], ids[3]).is_some());

        let last = graph.find_edge(ids[2], ids[3]).expect("Edge should exist in test").id;
        engine.remove_edge(&mut graph, last).expect("Edge should be removed in test");
        assert!(engine.traffic().cache().is_empty());
    }

    #[test]
    fn test_scenario_and_reset() {
        let (mut graph, ids) = line();
        let mut engine = RoutingEngine::default();
        let mut rng = StdRng::seed_from_u64(9);

        let changes = engine
            .apply_traffic_scenario(&mut graph, ScenarioKind::RoadBlock, &mut rng)
            .expect("Scenario should apply in test");
        assert_eq!(changes.len(), 1);
        assert_eq!(graph.open_edge_ids().len(), 2);

        engine.clear_cache();
        engine.reset();
        assert_eq!(engine.traffic().traffic_version(), 0);
        assert!(!graph.is_reachable(ids[0], ids[3]));
    }

    #[test]
    fn test_free_functions() {
        let (mut graph, ids) = line();
        let mut rng = StdRng::seed_from_u64(1);
        let mut manager = TrafficManager::default();

        let before = recompute_shortest_path(&mut manager, &graph, ids[0], ids[3])
            .expect("Recompute should succeed in test");
        assert_eq!(before.total_cost, 6.0);

        let changes = apply_traffic_scenario(
            &mut manager,
            &mut graph,
            &TrafficScenario::RushHour { factor: 1.5 },
            &mut rng,
        )
        .expect("Scenario should apply in test");
        assert_eq!(changes.len(), 3);
        assert_eq!(manager.traffic_version(), 1);
        assert!(manager.cached(ids[0], ids[3]).is_none());

        let result = recompute_shortest_path(&mut manager, &graph, ids[0], ids[3])
            .expect("Recompute should succeed in test");
        assert_eq!(result.total_cost, 9.0);

        let schedule = solve_vehicle_scheduling(&[10.0, 20.0, 15.0, 25.0], 2)
            .expect("Schedule should exist in test");
        assert_eq!(schedule.greedy.makespan, 35.0);

        let report = solve_tsp(&graph, &ids[..3]).expect("TSP should succeed in test");
        assert!(report.heuristic.is_none());
    }

    #[test]
    fn test_free_scenario_purges_blocked_route() {
        let mut graph = RoadGraph::new(true);
        let a = graph.add_node("A", 0.0, 0.0).expect("Node should be added in test");
        let b = graph.add_node("B", 1.0, 0.0).expect("Node should be added in test");
        graph.add_edge(a, b, 2.0).expect("Edge should be added in test");
        let mut manager = TrafficManager::default();
        let mut rng = StdRng::seed_from_u64(4);

        let cached = recompute_shortest_path(&mut manager, &graph, a, b)
            .expect("Recompute should succeed in test");
        assert_eq!(cached.total_cost, 2.0);

        let changes = apply_traffic_scenario(
            &mut manager,
            &mut graph,
            &TrafficScenario::RoadBlock { count: 1 },
            &mut rng,
        )
        .expect("Scenario should apply in test");
        assert_eq!(changes.len(), 1);
        assert_eq!(manager.traffic_version(), 1);
        assert!(manager.cached(a, b).is_none());

        let after = recompute_shortest_path(&mut manager, &graph, a, b)
            .expect("Recompute should succeed in test");
        assert!(!after.found);
        assert!(graph.path_cost(&[a, b]).is_infinite());
    }
}

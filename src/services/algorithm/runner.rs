//! 算法执行器
//!
//! 负责参数校验、负权拒绝、计时，以及把 `PathResult` 汇总为 `AlgorithmRecord`

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use super::kind::AlgorithmKind;
use super::path::{PathResult, Refusal};
use crate::core::error::{RouteError, RouteResult};
use crate::graph::{NodeId, RoadGraph};
use crate::services::decision::mark_optimal_flags;

/// 单次算法执行的汇总记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmRecord {
    pub kind: AlgorithmKind,
    pub name: String,
    pub elapsed_ms: f64,
    pub steps: usize,
    pub total_cost: f64,
    pub path_len: usize,
    pub success: bool,
    pub reason: String,
    pub complexity: String,
    /// 仅由 `mark_optimal_flags` 设置
    pub optimal: bool,
}

impl AlgorithmRecord {
    fn from_result(
        kind: AlgorithmKind,
        result: &PathResult,
        elapsed_ms: f64,
        weights_equal: bool,
    ) -> Self {
        let reason = if let Some(refusal) = result.refusal {
            refusal.to_string()
        } else if result.has_negative_cycle {
            "Negative cycle detected".to_string()
        } else if result.found {
            if kind.is_unweighted_traversal() && !weights_equal {
                "Path found (Note: BFS/DFS not guaranteed optimal on weighted graphs)".to_string()
            } else {
                "Path found".to_string()
            }
        } else {
            "No path found.".to_string()
        };

        Self {
            kind,
            name: kind.name().to_string(),
            elapsed_ms,
            steps: result.steps,
            total_cost: result.total_cost,
            path_len: result.path_len(),
            success: result.is_success(),
            reason,
            complexity: kind.complexity().to_string(),
            optimal: false,
        }
    }
}

/// 执行前的连通性检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteCheck {
    Reachable,
    /// 不可达，且图中存在被封锁的道路
    Blocked { road: String },
    Unreachable { from: String, to: String },
}

impl RouteCheck {
    pub fn is_reachable(&self) -> bool {
        matches!(self, RouteCheck::Reachable)
    }
}

impl fmt::Display for RouteCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCheck::Reachable => write!(f, "Route available."),
            RouteCheck::Blocked { road } => {
                write!(f, "Traffic cannot proceed: Road {} is blocked.", road)
            }
            RouteCheck::Unreachable { from, to } => {
                write!(f, "No available route from {} to {}.", from, to)
            }
        }
    }
}

fn require_endpoints(graph: &RoadGraph, source: NodeId, destination: NodeId) -> RouteResult<()> {
    graph.require_node(source)?;
    graph.require_node(destination)?;
    Ok(())
}

/// 执行单个算法
///
/// Dijkstra/A*/Greedy 在存在负权边时拒绝执行，返回带 `refusal` 的结果
pub fn run_path_algorithm(
    graph: &RoadGraph,
    kind: AlgorithmKind,
    source: NodeId,
    destination: NodeId,
) -> RouteResult<PathResult> {
    run_with_record(graph, kind, source, destination).map(|(result, _)| result)
}

/// 执行单个算法并生成汇总记录，耗时只统计算法本身
pub fn run_with_record(
    graph: &RoadGraph,
    kind: AlgorithmKind,
    source: NodeId,
    destination: NodeId,
) -> RouteResult<(PathResult, AlgorithmRecord)> {
    require_endpoints(graph, source, destination)?;

    let weights_equal = graph.all_weights_equal_positive();
    if kind.requires_non_negative() && graph.has_negative_weights() {
        log::warn!("{} 拒绝执行: 图中存在负权边", kind);
        let result = PathResult::refused(Refusal::NegativeWeights);
        let record = AlgorithmRecord::from_result(kind, &result, 0.0, weights_equal);
        return Ok((result, record));
    }

    let start = Instant::now();
    let result = kind.execute(graph, source, destination);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::debug!(
        "{}: {} -> {} found={} cost={} steps={} ({:.3} ms)",
        kind,
        graph.label_of(source),
        graph.label_of(destination),
        result.found,
        result.total_cost,
        result.steps,
        elapsed_ms
    );

    let record = AlgorithmRecord::from_result(kind, &result, elapsed_ms, weights_equal);
    Ok((result, record))
}

/// 依次执行全部六种算法并标记最优记录
pub fn run_all_path_algorithms(
    graph: &RoadGraph,
    source: NodeId,
    destination: NodeId,
) -> RouteResult<Vec<AlgorithmRecord>> {
    require_endpoints(graph, source, destination)?;
    if source == destination {
        return Err(RouteError::InvalidRequest(
            "起点和终点不能相同".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(AlgorithmKind::ALL.len());
    for kind in AlgorithmKind::ALL {
        let (_, record) = run_with_record(graph, kind, source, destination)?;
        records.push(record);
    }

    mark_optimal_flags(&mut records);
    Ok(records)
}

/// 执行前的连通性检查，忽略权重只看未封锁的边
pub fn check_route(graph: &RoadGraph, source: NodeId, destination: NodeId) -> RouteResult<RouteCheck> {
    require_endpoints(graph, source, destination)?;

    if graph.is_reachable(source, destination) {
        return Ok(RouteCheck::Reachable);
    }

    Ok(match graph.first_blocked_road_label() {
        Some(road) => RouteCheck::Blocked { road },
        None => RouteCheck::Unreachable {
            from: graph.label_of(source),
            to: graph.label_of(destination),
        },
    })
}

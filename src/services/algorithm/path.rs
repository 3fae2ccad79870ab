//! 路径结果模块
//!
//! 所有寻路算法共享的结果结构和前驱回溯逻辑

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::graph::{NodeId, RoadGraph};

/// 一轮松弛结束后各节点的距离快照（仅Bellman-Ford记录）
pub type DistanceSnapshot = BTreeMap<NodeId, f64>;

/// 算法拒绝执行的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Refusal {
    /// 图中存在负权边，Dijkstra/A*/Greedy 无法给出正确答案
    NegativeWeights,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::NegativeWeights => write!(f, "Not executed (negative weights present)"),
        }
    }
}

/// 寻路算法的统一结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub found: bool,
    pub path: Option<Vec<NodeId>>,
    /// 代价指标：节点访问次数加边松弛次数，各算法的计数口径见对应模块
    pub steps: usize,
    pub has_negative_cycle: bool,
    pub distance_history: Option<Vec<DistanceSnapshot>>,
    pub total_cost: f64,
    pub refusal: Option<Refusal>,
}

impl PathResult {
    pub fn found(path: Vec<NodeId>, steps: usize, total_cost: f64) -> Self {
        Self {
            found: true,
            path: Some(path),
            steps,
            has_negative_cycle: false,
            distance_history: None,
            total_cost,
            refusal: None,
        }
    }

    pub fn not_found(steps: usize) -> Self {
        Self {
            found: false,
            path: None,
            steps,
            has_negative_cycle: false,
            distance_history: None,
            total_cost: f64::INFINITY,
            refusal: None,
        }
    }

    pub fn refused(refusal: Refusal) -> Self {
        Self {
            refusal: Some(refusal),
            ..Self::not_found(0)
        }
    }

    /// 找到路径且结果可靠（无负权环）
    pub fn is_success(&self) -> bool {
        self.found && !self.has_negative_cycle
    }

    pub fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, Vec::len)
    }

    /// 路径是否依次经过 from → to；`directed` 为 false 时反向经过同样计入
    pub fn traverses(&self, from: NodeId, to: NodeId, directed: bool) -> bool {
        self.path.as_ref().is_some_and(|path| {
            path.windows(2).any(|hop| {
                (hop[0] == from && hop[1] == to) || (!directed && hop[0] == to && hop[1] == from)
            })
        })
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.path.as_ref().is_some_and(|path| path.contains(&node))
    }
}

/// 从目标沿前驱回溯到起点
///
/// 回溯链未在起点结束，或出现环（负权环导致），都视为不存在路径
pub(crate) fn reconstruct_path(
    predecessors: &[Option<NodeId>],
    source: NodeId,
    destination: NodeId,
) -> Option<Vec<NodeId>> {
    let mut path = vec![destination];
    let mut current = destination;

    while let Some(predecessor) = predecessors.get(current.0).copied().flatten() {
        if path.len() > predecessors.len() {
            return None;
        }
        path.push(predecessor);
        current = predecessor;
    }

    if current != source {
        return None;
    }

    path.reverse();
    Some(path)
}

/// 当前存活节点的距离快照
pub(crate) fn snapshot(graph: &RoadGraph, distances: &[f64]) -> DistanceSnapshot {
    graph
        .nodes()
        .map(|node| (node.id, distances[node.id.0]))
        .collect()
}

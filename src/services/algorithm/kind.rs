//! 寻路算法种类
//!
//! 六种策略的封闭枚举，通过统一的函数签名分发

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::astar::AStar;
use super::bellman_ford::BellmanFord;
use super::bfs::Bfs;
use super::dfs::Dfs;
use super::dijkstra::Dijkstra;
use super::greedy::Greedy;
use super::path::PathResult;
use crate::core::error::RouteError;
use crate::graph::{NodeId, RoadGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
    BellmanFord,
    Greedy,
}

impl AlgorithmKind {
    /// “全部运行”时的执行顺序
    pub const ALL: [AlgorithmKind; 6] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::AStar,
        AlgorithmKind::BellmanFord,
        AlgorithmKind::Greedy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "BFS",
            AlgorithmKind::Dfs => "DFS",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::AStar => "A*",
            AlgorithmKind::BellmanFord => "Bellman-Ford",
            AlgorithmKind::Greedy => "Greedy",
        }
    }

    pub fn complexity(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => "O(V+E)",
            AlgorithmKind::Dijkstra | AlgorithmKind::AStar => "O((V+E)logV)",
            AlgorithmKind::BellmanFord => "O(V×E)",
            AlgorithmKind::Greedy => "O(E)",
        }
    }

    /// 存在负权边时必须拒绝执行的算法
    pub fn requires_non_negative(&self) -> bool {
        matches!(
            self,
            AlgorithmKind::Dijkstra | AlgorithmKind::AStar | AlgorithmKind::Greedy
        )
    }

    /// 按跳数遍历、不考虑权重的算法
    pub fn is_unweighted_traversal(&self) -> bool {
        matches!(self, AlgorithmKind::Bfs | AlgorithmKind::Dfs)
    }

    /// 直接执行算法，不做负权检查
    pub fn execute(&self, graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        match self {
            AlgorithmKind::Bfs => Bfs::shortest_path(graph, source, destination),
            AlgorithmKind::Dfs => Dfs::find_path(graph, source, destination),
            AlgorithmKind::Dijkstra => Dijkstra::shortest_path(graph, source, destination),
            AlgorithmKind::AStar => AStar::shortest_path(graph, source, destination),
            AlgorithmKind::BellmanFord => BellmanFord::shortest_path(graph, source, destination),
            AlgorithmKind::Greedy => Greedy::find_path(graph, source, destination),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "bfs" => Ok(AlgorithmKind::Bfs),
            "dfs" => Ok(AlgorithmKind::Dfs),
            "dijkstra" => Ok(AlgorithmKind::Dijkstra),
            "a*" | "astar" | "a-star" => Ok(AlgorithmKind::AStar),
            "bellman-ford" | "bellmanford" => Ok(AlgorithmKind::BellmanFord),
            "greedy" => Ok(AlgorithmKind::Greedy),
            _ => Err(RouteError::InvalidRequest(format!("未知的算法: {}", s))),
        }
    }
}

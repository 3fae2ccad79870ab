//! 旅行商问题
//!
//! 在选定的节点子集上求闭合回路：最近邻启发式，以及节点数不超过上限时的分支限界精确解。
//! 两点之间的代价取当前图中第一条未封锁边的权重，没有边时为无穷大

use std::collections::HashSet;

use serde::Serialize;

use crate::config::SolverConfig;
use crate::core::error::{RouteError, RouteResult};
use crate::graph::{NodeId, RoadGraph};

/// 闭合回路，首尾节点相同
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

impl Tour {
    fn closed(mut nodes: Vec<NodeId>, graph: &RoadGraph) -> Option<Self> {
        let start = *nodes.first()?;
        nodes.push(start);
        let cost = tour_cost(graph, &nodes);
        if cost.is_finite() {
            Some(Self { nodes, cost })
        } else {
            None
        }
    }

    pub fn describe(&self, graph: &RoadGraph) -> String {
        graph.labels_of(&self.nodes)
    }
}

/// TSP 求解结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TspReport {
    pub heuristic: Option<Tour>,
    pub exact: Option<Tour>,
}

impl TspReport {
    /// 代价不高于启发式解时取精确解，否则取启发式解
    pub fn best(&self) -> Option<&Tour> {
        match (&self.exact, &self.heuristic) {
            (Some(exact), Some(heuristic)) if exact.cost <= heuristic.cost => Some(exact),
            (Some(exact), None) => Some(exact),
            (_, heuristic) => heuristic.as_ref(),
        }
    }
}

/// 沿回路累加边权；任一段缺边时为无穷大
pub fn tour_cost(graph: &RoadGraph, tour: &[NodeId]) -> f64 {
    graph.path_cost(tour)
}

/// TSP 求解器
#[derive(Debug, Clone)]
pub struct TspSolver {
    max_exact_nodes: usize,
}

impl Default for TspSolver {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl TspSolver {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            max_exact_nodes: config.exact_tsp_max_nodes,
        }
    }

    /// 求解 TSP
    ///
    /// 节点不存在或重复时返回错误；少于 3 个节点时两种解都为 None
    pub fn solve(&self, graph: &RoadGraph, nodes: &[NodeId]) -> RouteResult<TspReport> {
        let mut seen = HashSet::new();
        for &node in nodes {
            graph.require_node(node)?;
            if !seen.insert(node) {
                return Err(RouteError::InvalidRequest(format!(
                    "TSP 节点重复: {}",
                    graph.label_of(node)
                )));
            }
        }

        if nodes.len() < 3 {
            log::warn!("TSP 至少需要 3 个节点, 实际 {}", nodes.len());
            return Ok(TspReport::default());
        }

        let heuristic = Self::nearest_neighbor(graph, nodes);
        match &heuristic {
            Some(tour) => log::info!("TSP 最近邻回路代价 {:.2}: {}", tour.cost, tour.describe(graph)),
            None => log::info!("TSP 最近邻失败: 所选节点之间缺少边"),
        }

        let exact = if nodes.len() <= self.max_exact_nodes {
            let exact = Self::branch_and_bound(graph, nodes);
            match &exact {
                Some(tour) => log::info!("TSP 精确回路代价 {:.2}: {}", tour.cost, tour.describe(graph)),
                None => log::info!("TSP 精确求解未找到完整回路"),
            }
            exact
        } else {
            log::info!("TSP 节点数 {} 超过精确求解上限 {}", nodes.len(), self.max_exact_nodes);
            None
        };

        Ok(TspReport { heuristic, exact })
    }

    /// 最近邻启发式：从第一个节点出发，每次走向最近的未访问节点，最后回到起点
    ///
    /// 某一步没有可达的未访问节点，或最后无法回到起点时失败
    pub fn nearest_neighbor(graph: &RoadGraph, nodes: &[NodeId]) -> Option<Tour> {
        let n = nodes.len();
        if n == 0 {
            return None;
        }

        let mut used = vec![false; n];
        let mut tour = Vec::with_capacity(n + 1);
        let mut current = 0;
        used[current] = true;
        tour.push(nodes[current]);

        for _ in 1..n {
            let mut next = None;
            let mut best = f64::INFINITY;
            for j in 0..n {
                if used[j] {
                    continue;
                }
                let weight = graph.edge_weight_between(nodes[current], nodes[j]);
                if weight < best {
                    best = weight;
                    next = Some(j);
                }
            }

            let j = next?;
            used[j] = true;
            tour.push(nodes[j]);
            current = j;
        }

        Tour::closed(tour, graph)
    }

    /// 分支限界精确解
    ///
    /// 预先检查每个节点都至少有一条有限代价的出边和入边
    pub fn branch_and_bound(graph: &RoadGraph, nodes: &[NodeId]) -> Option<Tour> {
        let n = nodes.len();
        if n == 0 {
            return None;
        }

        let mut cost = vec![vec![f64::INFINITY; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    cost[i][j] = graph.edge_weight_between(nodes[i], nodes[j]);
                }
            }
        }

        for i in 0..n {
            let has_out = (0..n).any(|j| cost[i][j].is_finite());
            let has_in = (0..n).any(|j| cost[j][i].is_finite());
            if !has_out || !has_in {
                return None;
            }
        }

        // 负权时剩余每一段至多让代价减少 |min_entry|
        let min_entry = cost
            .iter()
            .flatten()
            .copied()
            .filter(|c| c.is_finite())
            .fold(0.0, f64::min);

        let mut search = TourSearch {
            cost: &cost,
            min_entry,
            used: vec![false; n],
            path: vec![0; n],
            best_cost: f64::INFINITY,
            best_path: None,
        };
        search.used[0] = true;
        search.extend(0, 1, 0.0);

        let best_path = search.best_path?;
        Tour::closed(best_path.into_iter().map(|i| nodes[i]).collect(), graph)
    }
}

struct TourSearch<'a> {
    cost: &'a [Vec<f64>],
    min_entry: f64,
    used: Vec<bool>,
    path: Vec<usize>,
    best_cost: f64,
    best_path: Option<Vec<usize>>,
}

impl TourSearch<'_> {
    fn extend(&mut self, current: usize, level: usize, current_cost: f64) {
        let n = self.path.len();
        let remaining_hops = (n - level + 1) as f64;
        if current_cost + remaining_hops * self.min_entry >= self.best_cost {
            return;
        }

        if level == n {
            let back = self.cost[current][self.path[0]];
            if back.is_infinite() {
                return;
            }
            let total = current_cost + back;
            if total < self.best_cost {
                self.best_cost = total;
                self.best_path = Some(self.path.clone());
            }
            return;
        }

        for next in 1..n {
            if !self.used[next] && self.cost[current][next].is_finite() {
                self.used[next] = true;
                self.path[level] = next;
                self.extend(next, level + 1, current_cost + self.cost[current][next]);
                self.used[next] = false;
            }
        }
    }
}

//! A*算法模块
//!
//! 包含A*最短路径算法实现，以节点坐标的欧几里得距离作为启发式

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::path::{reconstruct_path, PathResult};
use crate::graph::{Adjacency, Node, NodeId, RoadGraph};

/// A*算法结构体
pub struct AStar;

/// A*节点结构体，用于优先队列
#[derive(Debug, Clone, Copy)]
struct AStarNode {
    node: NodeId,
    g_score: f64, // 从起点到当前节点的实际代价
    f_score: f64, // g_score + h_score（启发式估计）
    sequence: u64,
}

impl PartialEq for AStarNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AStarNode {}

impl Ord for AStarNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // 最小堆：f_score小的优先，相同时先入队的优先
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for AStarNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AStar {
    /// 使用A*算法查找最短路径
    ///
    /// 步数为展开的节点数加上检查过的弧数。
    /// 调用方负责在存在负权时拒绝执行
    pub fn shortest_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        let Some(target) = graph.node(destination) else {
            return PathResult::not_found(0);
        };
        if !graph.contains_node(source) {
            return PathResult::not_found(0);
        }

        let adjacency = Adjacency::build(graph);
        let scale = Self::heuristic_scale(graph);
        let heuristic = |node: NodeId| -> f64 {
            graph
                .node(node)
                .map_or(0.0, |n| n.distance_to(target) * scale)
        };

        let mut g_scores = vec![f64::INFINITY; adjacency.slots()];
        let mut closed = vec![false; adjacency.slots()];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; adjacency.slots()];
        let mut open_set: BinaryHeap<AStarNode> = BinaryHeap::new();
        let mut sequence = 0;
        let mut steps = 0;

        g_scores[source.0] = 0.0;
        open_set.push(AStarNode {
            node: source,
            g_score: 0.0,
            f_score: heuristic(source),
            sequence,
        });

        while let Some(current) = open_set.pop() {
            if closed[current.node.0] || current.g_score > g_scores[current.node.0] {
                continue;
            }
            closed[current.node.0] = true;
            steps += 1;

            if current.node == destination {
                return match reconstruct_path(&predecessors, source, destination) {
                    Some(path) => PathResult::found(path, steps, current.g_score),
                    None => PathResult::not_found(steps),
                };
            }

            for link in adjacency.neighbors(current.node) {
                steps += 1;
                if closed[link.to.0] {
                    continue;
                }

                let tentative_g_score = current.g_score + link.weight;
                if tentative_g_score < g_scores[link.to.0] {
                    predecessors[link.to.0] = Some(current.node);
                    g_scores[link.to.0] = tentative_g_score;
                    sequence += 1;
                    open_set.push(AStarNode {
                        node: link.to,
                        g_score: tentative_g_score,
                        f_score: tentative_g_score + heuristic(link.to),
                        sequence,
                    });
                }
            }
        }

        PathResult::not_found(steps)
    }

    /// 启发式缩放系数
    ///
    /// 取所有未封锁边 weight / 坐标长度 的最小值（上限为1），
    /// 使 `scale * 欧几里得距离` 在任意非负权重下都不会高估剩余代价
    pub fn heuristic_scale(graph: &RoadGraph) -> f64 {
        let mut scale: f64 = 1.0;
        for edge in graph.edges().filter(|e| !e.is_blocked()) {
            let (Some(from), Some(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
                continue;
            };
            let length = Node::distance_to(from, to);
            if length > 0.0 {
                scale = scale.min((edge.weight / length).max(0.0));
            }
        }
        scale
    }
}

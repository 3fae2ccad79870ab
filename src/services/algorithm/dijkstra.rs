//! Dijkstra算法模块
//!
//! 包含非负权图最短路径算法实现

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::path::{reconstruct_path, PathResult};
use crate::graph::{Adjacency, NodeId, RoadGraph};

/// Dijkstra算法结构体
pub struct Dijkstra;

/// 节点距离结构体，用于优先队列
#[derive(Debug, Clone, Copy)]
struct NodeDistance {
    node: NodeId,
    distance: f64,
    // 相同距离时按入队顺序出队
    sequence: u64,
}

impl PartialEq for NodeDistance {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeDistance {}

impl Ord for NodeDistance {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for NodeDistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Dijkstra {
    /// 查找从起点到目标节点的最短路径
    ///
    /// 步数为出队次数加上检查过的弧数；调用方负责在存在负权时拒绝执行
    pub fn shortest_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        if !graph.contains_node(source) {
            return PathResult::not_found(0);
        }
        let adjacency = Adjacency::build(graph);
        let mut distances = vec![f64::INFINITY; adjacency.slots()];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; adjacency.slots()];
        let mut to_visit: BinaryHeap<NodeDistance> = BinaryHeap::new();
        let mut sequence = 0;
        let mut steps = 0;

        distances[source.0] = 0.0;
        to_visit.push(NodeDistance {
            node: source,
            distance: 0.0,
            sequence,
        });

        while let Some(NodeDistance { node, distance, .. }) = to_visit.pop() {
            // 过期的队列条目
            if distance > distances[node.0] {
                continue;
            }
            steps += 1;

            if node == destination {
                return match reconstruct_path(&predecessors, source, destination) {
                    Some(path) => PathResult::found(path, steps, distance),
                    None => PathResult::not_found(steps),
                };
            }

            for link in adjacency.neighbors(node) {
                steps += 1;
                let new_distance = distance + link.weight;

                if new_distance < distances[link.to.0] {
                    distances[link.to.0] = new_distance;
                    predecessors[link.to.0] = Some(node);
                    sequence += 1;
                    to_visit.push(NodeDistance {
                        node: link.to,
                        distance: new_distance,
                        sequence,
                    });
                }
            }
        }

        PathResult::not_found(steps)
    }
}

//! Bellman-Ford算法模块
//!
//! 包含Bellman-Ford最短路径算法实现
//! 支持负权边，可检测负权环，并记录每一轮松弛后的距离快照

use super::path::{reconstruct_path, snapshot, DistanceSnapshot, PathResult};
use crate::graph::{Adjacency, NodeId, RoadGraph};

/// Bellman-Ford算法结构体
pub struct BellmanFord;

impl BellmanFord {
    /// 执行Bellman-Ford算法
    ///
    /// 最多 |V|-1 轮松弛，某一轮没有任何更新时提前结束；
    /// 快照 0 为初始距离，之后每轮一个。步数为成功松弛的次数。
    ///
    /// 检测到从起点可达的负权环时 `found` 为 false，
    /// `total_cost` 保留计算出的（不可靠的）距离
    pub fn shortest_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        let links = Adjacency::links(graph);
        let slots = graph.node_slots();
        let mut distances = vec![f64::INFINITY; slots];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; slots];
        let mut history: Vec<DistanceSnapshot> = Vec::new();
        let mut steps = 0;

        if graph.contains_node(source) {
            distances[source.0] = 0.0;
        }
        history.push(snapshot(graph, &distances));

        // 松弛操作，执行n-1次
        for _ in 0..graph.node_count().saturating_sub(1) {
            let mut updated = false;

            for link in &links {
                let dist_u = distances[link.from.0];
                if dist_u.is_infinite() {
                    continue;
                }

                let new_dist = dist_u + link.weight;
                if new_dist < distances[link.to.0] {
                    distances[link.to.0] = new_dist;
                    predecessors[link.to.0] = Some(link.from);
                    steps += 1;
                    updated = true;
                }
            }

            history.push(snapshot(graph, &distances));

            // 如果没有更新，提前结束
            if !updated {
                break;
            }
        }

        // 检测负权环
        let has_negative_cycle = links.iter().any(|link| {
            let dist_u = distances[link.from.0];
            !dist_u.is_infinite() && dist_u + link.weight < distances[link.to.0]
        });

        let total_cost = distances.get(destination.0).copied().unwrap_or(f64::INFINITY);
        let path = if has_negative_cycle || total_cost.is_infinite() {
            None
        } else {
            reconstruct_path(&predecessors, source, destination)
        };

        PathResult {
            found: path.is_some(),
            path,
            steps,
            has_negative_cycle,
            distance_history: Some(history),
            total_cost,
            refusal: None,
        }
    }
}

//! BFS算法模块
//!
//! 广度优先搜索，按跳数而非权重扩展；路径代价在找到路径后按边权累加，
//! 在带权图上可能不是最优，且结果依赖边的插入顺序

use std::collections::VecDeque;

use super::path::{reconstruct_path, PathResult};
use crate::graph::{Adjacency, NodeId, RoadGraph};

/// BFS算法结构体
pub struct Bfs;

impl Bfs {
    /// 使用BFS查找路径，步数为出队的节点数
    pub fn shortest_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        if !graph.contains_node(source) {
            return PathResult::not_found(0);
        }
        let adjacency = Adjacency::build(graph);
        let mut visited = vec![false; adjacency.slots()];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; adjacency.slots()];
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        queue.push_back(source);
        visited[source.0] = true;
        let mut steps = 0;

        while let Some(current) = queue.pop_front() {
            steps += 1;

            if current == destination {
                return match reconstruct_path(&predecessors, source, destination) {
                    Some(path) => {
                        let cost = graph.path_cost(&path);
                        PathResult::found(path, steps, cost)
                    }
                    None => PathResult::not_found(steps),
                };
            }

            for link in adjacency.neighbors(current) {
                if !visited[link.to.0] {
                    visited[link.to.0] = true;
                    predecessors[link.to.0] = Some(current);
                    queue.push_back(link.to);
                }
            }
        }

        PathResult::not_found(steps)
    }
}

//! DFS算法模块
//!
//! 基于显式栈的深度优先搜索，节点入栈时即标记为已访问；
//! 与BFS相同，代价在找到路径后按边权累加

use super::path::{reconstruct_path, PathResult};
use crate::graph::{Adjacency, NodeId, RoadGraph};

/// DFS算法结构体
pub struct Dfs;

impl Dfs {
    /// 使用DFS查找路径，步数为出栈的节点数
    pub fn find_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        if !graph.contains_node(source) {
            return PathResult::not_found(0);
        }
        let adjacency = Adjacency::build(graph);
        let mut visited = vec![false; adjacency.slots()];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; adjacency.slots()];
        let mut stack: Vec<NodeId> = vec![source];

        visited[source.0] = true;
        let mut steps = 0;

        while let Some(current) = stack.pop() {
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
                    stack.push(link.to);
                }
            }
        }

        PathResult::not_found(steps)
    }
}

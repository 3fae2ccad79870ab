//! 贪心寻路模块
//!
//! 每一步沿当前节点权重最小的、通往未访问节点的边前进，不回溯，
//! 因此既不保证找到路径，也不保证最优

use super::path::{reconstruct_path, PathResult};
use crate::graph::{Adjacency, Link, NodeId, RoadGraph};

/// 贪心寻路结构体
pub struct Greedy;

impl Greedy {
    /// 贪心地查找路径
    ///
    /// 访问到目标或当前节点没有未访问的出边时结束。
    /// 步数为访问的节点数加上移动次数，代价为沿途累加的边权
    pub fn find_path(graph: &RoadGraph, source: NodeId, destination: NodeId) -> PathResult {
        if !graph.contains_node(source) {
            return PathResult::not_found(0);
        }
        let adjacency = Adjacency::build(graph);
        let mut visited = vec![false; adjacency.slots()];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; adjacency.slots()];
        let mut distance = 0.0;
        let mut current = source;
        let mut steps = 0;

        loop {
            visited[current.0] = true;
            steps += 1;

            if current == destination {
                return match reconstruct_path(&predecessors, source, destination) {
                    Some(path) => PathResult::found(path, steps, distance),
                    None => PathResult::not_found(steps),
                };
            }

            // 权重相同时取插入顺序靠前的边
            let mut best: Option<&Link> = None;
            for link in adjacency.neighbors(current) {
                if !visited[link.to.0] && best.map_or(true, |b| link.weight < b.weight) {
                    best = Some(link);
                }
            }

            let Some(next) = best else {
                return PathResult::not_found(steps);
            };

            distance += next.weight;
            predecessors[next.to.0] = Some(current);
            current = next.to;
            steps += 1;
        }
    }
}

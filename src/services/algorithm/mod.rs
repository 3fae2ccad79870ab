//! 算法模块
//!
//! 包含六种寻路算法、统一的结果结构以及执行器

pub mod astar;
pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;
pub mod greedy;
pub mod kind;
pub mod path;
pub mod runner;

// 重新导出常用算法结构体
pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use dijkstra::Dijkstra;
pub use greedy::Greedy;
pub use kind::AlgorithmKind;
pub use path::{DistanceSnapshot, PathResult, Refusal};
pub use runner::{
    check_route, run_all_path_algorithms, run_path_algorithm, run_with_record, AlgorithmRecord,
    RouteCheck,
};

/// 单元测试共用的小图
#[cfg(test)]
pub(crate) mod test_graphs {
    use std::collections::HashMap;

    use super::PathResult;
    use crate::graph::{NodeId, RoadGraph};

    /// 有向图 A→B(5), A→C(1), C→B(1), B→D(1), C→D(9)
    pub fn diamond() -> (RoadGraph, HashMap<&'static str, NodeId>) {
        let mut graph = RoadGraph::new(true);
        let mut ids = HashMap::new();
        for (label, x, y) in [("A", 0.0, 0.0), ("B", 2.0, 1.0), ("C", 1.0, -1.0), ("D", 3.0, 0.0)] {
            let id = graph.add_node(label, x, y).expect("Node should be added in test");
            ids.insert(label, id);
        }
        for (from, to, weight) in [
            ("A", "B", 5.0),
            ("A", "C", 1.0),
            ("C", "B", 1.0),
            ("B", "D", 1.0),
            ("C", "D", 9.0),
        ] {
            graph
                .add_edge(ids[from], ids[to], weight)
                .expect("Edge should be added in test");
        }
        (graph, ids)
    }

    /// 有向负权环 A→B(1), B→C(-1), C→A(-1)
    pub fn negative_cycle() -> (RoadGraph, HashMap<&'static str, NodeId>) {
        let mut graph = RoadGraph::new(true);
        let mut ids = HashMap::new();
        for (label, x) in [("A", 0.0), ("B", 1.0), ("C", 2.0)] {
            let id = graph.add_node(label, x, 0.0).expect("Node should be added in test");
            ids.insert(label, id);
        }
        for (from, to, weight) in [("A", "B", 1.0), ("B", "C", -1.0), ("C", "A", -1.0)] {
            graph
                .add_edge(ids[from], ids[to], weight)
                .expect("Edge should be added in test");
        }
        (graph, ids)
    }

    pub fn labelled(graph: &RoadGraph, result: &PathResult) -> String {
        result
            .path
            .as_deref()
            .map(|path| graph.labels_of(path))
            .unwrap_or_default()
    }
}

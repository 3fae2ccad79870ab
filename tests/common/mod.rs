//! 集成测试共享工具模块
//!
//! 提供测试用的道路网络夹具，供所有集成测试使用

#![allow(dead_code)]

use std::collections::HashMap;

use cityroute::{NodeId, RoadGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 按标签查找节点的图夹具
pub struct Fixture {
    pub graph: RoadGraph,
    pub ids: HashMap<&'static str, NodeId>,
}

impl Fixture {
    pub fn id(&self, label: &str) -> NodeId {
        *self
            .ids
            .get(label)
            .unwrap_or_else(|| panic!("Fixture should contain node {}", label))
    }
}

fn build(directed: bool, nodes: &[(&'static str, f64, f64)], edges: &[(&str, &str, f64)]) -> Fixture {
    let mut graph = RoadGraph::new(directed);
    let mut ids = HashMap::new();
    for &(label, x, y) in nodes {
        let id = graph
            .add_node(label, x, y)
            .expect("Node should be added in test");
        ids.insert(label, id);
    }
    for &(from, to, weight) in edges {
        graph
            .add_edge(ids[from], ids[to], weight)
            .expect("Edge should be added in test");
    }
    Fixture { graph, ids }
}

/// 有向菱形图：A→D 最短路径为 A → C → B → D，代价 3
pub fn diamond() -> Fixture {
    build(
        true,
        &[("A", 0.0, 0.0), ("B", 2.0, 1.0), ("C", 1.0, -1.0), ("D", 3.0, 0.0)],
        &[
            ("A", "B", 5.0),
            ("A", "C", 1.0),
            ("C", "B", 1.0),
            ("B", "D", 1.0),
            ("C", "D", 9.0),
        ],
    )
}

/// 有向负权环 A → B → C → A，环总权重为 -1
pub fn negative_cycle() -> Fixture {
    build(
        true,
        &[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 0.0, 1.0)],
        &[("A", "B", 1.0), ("B", "C", -1.0), ("C", "A", -1.0)],
    )
}

/// 无向 2x3 网格，边按下列顺序编号 0..7
pub fn grid() -> Fixture {
    build(
        false,
        &[
            ("A", 0.0, 0.0),
            ("B", 1.0, 0.0),
            ("C", 2.0, 0.0),
            ("D", 0.0, 1.0),
            ("E", 1.0, 1.0),
            ("F", 2.0, 1.0),
        ],
        &[
            ("A", "B", 1.0),
            ("B", "C", 1.0),
            ("D", "E", 2.0),
            ("E", "F", 2.0),
            ("A", "D", 1.0),
            ("B", "E", 1.0),
            ("C", "F", 1.0),
        ],
    )
}

/// 无向单位权三角形
pub fn triangle() -> Fixture {
    build(
        false,
        &[("A", 0.0, 0.0), ("B", 1.0, 0.0), ("C", 0.0, 1.0)],
        &[("A", "B", 1.0), ("B", "C", 1.0), ("C", "A", 1.0)],
    )
}

/// 随机生成的有向图，权重为正且与坐标距离无关
pub fn random_graph(seed: u64, nodes: usize, edge_probability: f64) -> (RoadGraph, Vec<NodeId>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = RoadGraph::new(true);
    let ids: Vec<NodeId> = (0..nodes)
        .map(|_| graph.add_node_auto(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();

    for &from in &ids {
        for &to in &ids {
            if from != to && rng.gen::<f64>() < edge_probability {
                let weight = rng.gen_range(1.0..50.0);
                graph
                    .add_edge(from, to, weight)
                    .expect("Edge should be added in test");
            }
        }
    }
    (graph, ids)
}

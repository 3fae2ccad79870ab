//! 邻接表快照
//!
//! 每次算法调用时从当前边权构建，封锁的边被排除；
//! 无向图为每条边额外追加一条反向弧，顺序与边的插入顺序一致

use super::model::{EdgeId, NodeId, RoadGraph};

/// 邻接表中的一条有向弧
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub edge: EdgeId,
}

/// 按 `NodeId` 槽位索引的邻接表
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    lists: Vec<Vec<Link>>,
}

impl Adjacency {
    pub fn build(graph: &RoadGraph) -> Self {
        let mut lists = vec![Vec::new(); graph.node_slots()];
        for link in Self::links(graph) {
            lists[link.from.0].push(link);
        }
        Self { lists }
    }

    /// 所有可通行的有向弧，正向弧之后紧跟其反向弧（无向图）
    pub fn links(graph: &RoadGraph) -> Vec<Link> {
        let mut links = Vec::with_capacity(graph.edge_count() * 2);
        for edge in graph.edges().filter(|e| !e.is_blocked()) {
            links.push(Link {
                from: edge.from,
                to: edge.to,
                weight: edge.weight,
                edge: edge.id,
            });
            if !graph.is_directed() {
                links.push(Link {
                    from: edge.to,
                    to: edge.from,
                    weight: edge.weight,
                    edge: edge.id,
                });
            }
        }
        links
    }

    pub fn neighbors(&self, node: NodeId) -> &[Link] {
        self.lists.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slots(&self) -> usize {
        self.lists.len()
    }
}

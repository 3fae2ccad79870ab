//! 图数据模型
//!
//! 包含节点、边以及基于槽位数组的道路图实现

use std::collections::{HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{RouteError, RouteResult};

/// 边权达到该阈值即视为道路被封锁
pub const BLOCKED_THRESHOLD: f64 = 9999.0;

/// 浮点权重比较容差
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// 判断权重是否表示封锁的道路
pub fn is_blocked_weight(weight: f64) -> bool {
    weight >= BLOCKED_THRESHOLD || weight.is_infinite()
}

/// 节点句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// 边句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// 路口节点，坐标仅作为A*启发式的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    /// 两节点之间的欧几里得距离
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 道路边，创建后只有权重可以修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn is_blocked(&self) -> bool {
        is_blocked_weight(self.weight)
    }

    /// 边是否连接有序节点对 (a, b)；无向图中反方向同样匹配
    pub fn joins(&self, a: NodeId, b: NodeId, directed: bool) -> bool {
        (self.from == a && self.to == b) || (!directed && self.from == b && self.to == a)
    }
}

/// 道路网络图
///
/// 删除节点或边只会清空对应槽位，已分配的句柄永远不会被复用或移动，
/// 边的遍历顺序始终是插入顺序
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    directed: bool,
}

impl RoadGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            directed,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// 添加节点，标签大小写不敏感地唯一
    pub fn add_node(&mut self, label: &str, x: f64, y: f64) -> RouteResult<NodeId> {
        let label = label.trim();
        if label.is_empty() {
            return Err(RouteError::InvalidRequest("节点标签不能为空".to_string()));
        }
        if self.find_node_by_label(label).is_some() {
            return Err(RouteError::DuplicateLabel(label.to_string()));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            id,
            label: label.to_string(),
            x,
            y,
        }));
        Ok(id)
    }

    /// 以自动生成的标签添加节点：A, B, ..., Z, AA, AB, ...
    pub fn add_node_auto(&mut self, x: f64, y: f64) -> NodeId {
        let mut index = 0;
        loop {
            let label = Self::auto_label(index);
            if self.find_node_by_label(&label).is_none() {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Some(Node { id, label, x, y }));
                return id;
            }
            index += 1;
        }
    }

    fn auto_label(mut index: usize) -> String {
        let mut chars = Vec::new();
        loop {
            chars.push((b'A' + (index % 26) as u8) as char);
            if index < 26 {
                break;
            }
            index = index / 26 - 1;
        }
        chars.iter().rev().collect()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn require_node(&self, id: NodeId) -> RouteResult<&Node> {
        self.node(id).ok_or(RouteError::NodeNotFound(id))
    }

    /// 存活的节点，按创建顺序
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// 槽位数量，用于按 `NodeId` 索引的稠密数组
    pub fn node_slots(&self) -> usize {
        self.nodes.len()
    }

    pub fn find_node_by_label(&self, label: &str) -> Option<&Node> {
        let label = label.trim();
        self.nodes().find(|n| n.label.eq_ignore_ascii_case(label))
    }

    /// 节点标签，缺失节点用句柄代替
    pub fn label_of(&self, id: NodeId) -> String {
        self.node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// 路径的可读形式，例如 `A → C → B`
    pub fn labels_of(&self, path: &[NodeId]) -> String {
        path.iter()
            .map(|id| self.label_of(*id))
            .collect::<Vec<_>>()
            .join(" → ")
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> RouteResult<EdgeId> {
        self.require_node(from)?;
        self.require_node(to)?;
        if weight.is_nan() {
            return Err(RouteError::InvalidRequest("边权不能为NaN".to_string()));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Some(Edge {
            id,
            from,
            to,
            weight,
        }));
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn require_edge(&self, id: EdgeId) -> RouteResult<&Edge> {
        self.edge(id).ok_or(RouteError::EdgeNotFound(id))
    }

    /// 存活的边，按插入顺序
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// 未被封锁的边的句柄，按插入顺序
    pub fn open_edge_ids(&self) -> Vec<EdgeId> {
        self.edges()
            .filter(|e| !e.is_blocked())
            .map(|e| e.id)
            .collect()
    }

    /// 修改边权，返回旧权重
    pub fn set_weight(&mut self, id: EdgeId, weight: f64) -> RouteResult<f64> {
        if weight.is_nan() {
            return Err(RouteError::InvalidRequest("边权不能为NaN".to_string()));
        }
        let edge = self
            .edges
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .ok_or(RouteError::EdgeNotFound(id))?;
        let old = edge.weight;
        edge.weight = weight;
        Ok(old)
    }

    /// 查找第一条 from → to 的边（不考虑方向模式）
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges().find(|e| e.from == from && e.to == to)
    }

    /// 删除节点及其关联的所有边，返回被删除的边
    pub fn remove_node(&mut self, id: NodeId) -> RouteResult<Vec<Edge>> {
        self.require_node(id)?;

        let mut removed = Vec::new();
        for slot in self.edges.iter_mut() {
            let incident = matches!(slot, Some(e) if e.from == id || e.to == id);
            if incident {
                if let Some(edge) = slot.take() {
                    removed.push(edge);
                }
            }
        }
        self.nodes[id.0] = None;
        Ok(removed)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> RouteResult<Edge> {
        self.edges
            .get_mut(id.0)
            .and_then(|slot| slot.take())
            .ok_or(RouteError::EdgeNotFound(id))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    /// 节点对 (a, b) 之间未封锁边的最小权重，没有则为无穷大
    ///
    /// 存在平行边时与寻路算法的松弛结果一致
    pub fn edge_weight_between(&self, a: NodeId, b: NodeId) -> f64 {
        self.edges()
            .filter(|e| !e.is_blocked() && e.joins(a, b, self.directed))
            .map(|e| e.weight)
            .fold(f64::INFINITY, f64::min)
    }

    /// 沿当前边权累加路径代价；少于两个节点或任一跳缺边时为无穷大
    pub fn path_cost(&self, path: &[NodeId]) -> f64 {
        if path.len() < 2 {
            return f64::INFINITY;
        }

        let mut cost = 0.0;
        for hop in path.windows(2) {
            let weight = self.edge_weight_between(hop[0], hop[1]);
            if weight.is_infinite() {
                return f64::INFINITY;
            }
            cost += weight;
        }
        cost
    }

    pub fn has_negative_weights(&self) -> bool {
        self.edges().any(|e| !e.is_blocked() && e.weight < 0.0)
    }

    /// 所有未封锁边的权重是否相同且为正
    pub fn all_weights_equal_positive(&self) -> bool {
        let mut reference: Option<f64> = None;
        for edge in self.edges().filter(|e| !e.is_blocked()) {
            if edge.weight <= 0.0 {
                return false;
            }
            match reference {
                None => reference = Some(edge.weight),
                Some(w) if (edge.weight - w).abs() > WEIGHT_EPSILON => return false,
                Some(_) => {}
            }
        }
        reference.is_some()
    }

    /// 忽略权重，仅通过未封锁的边判断可达性
    pub fn is_reachable(&self, source: NodeId, destination: NodeId) -> bool {
        if !self.contains_node(source) || !self.contains_node(destination) {
            return false;
        }

        let adjacency = super::Adjacency::build(self);
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<NodeId> = VecDeque::new();

        queue.push_back(source);
        visited.insert(source);

        while let Some(current) = queue.pop_front() {
            if current == destination {
                return true;
            }
            for link in adjacency.neighbors(current) {
                if visited.insert(link.to) {
                    queue.push_back(link.to);
                }
            }
        }

        false
    }

    /// 第一条被封锁道路的标签，例如 `A-B`
    pub fn first_blocked_road_label(&self) -> Option<String> {
        self.edges()
            .find(|e| e.is_blocked())
            .map(|e| format!("{}-{}", self.label_of(e.from), self.label_of(e.to)))
    }
}

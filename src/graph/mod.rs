//! 道路网络图模块
//!
//! 节点与边存放在稠密的槽位数组中，通过稳定的整数句柄引用；
//! 邻接表按调用时的快照临时构建，被封锁的边不参与构建

pub mod adjacency;
pub mod model;

pub use adjacency::{Adjacency, Link};
pub use model::{
    is_blocked_weight, Edge, EdgeId, Node, NodeId, RoadGraph, BLOCKED_THRESHOLD, WEIGHT_EPSILON,
};

//! 交通模块
//!
//! 交通场景的批量边权修改，以及基于路径缓存的交通感知重算

pub mod manager;
pub mod scenario;

pub use manager::{RecomputeStrategy, TrafficManager};
pub use scenario::{EdgeChange, ScenarioKind, TrafficScenario};

//! 服务层模块
//!
//! 寻路算法、最优算法决策、交通管理以及两个组合优化求解器

pub mod algorithm;
pub mod decision;
pub mod scheduling;
pub mod traffic;
pub mod tsp;

// 重新导出常用服务
pub use algorithm::*;
pub use decision::{decide_best_algorithm, mark_optimal_flags, Decision, DecisionEngine};
pub use scheduling::{Schedule, SchedulingReport, VehicleScheduler};
pub use traffic::{EdgeChange, RecomputeStrategy, ScenarioKind, TrafficManager, TrafficScenario};
pub use tsp::{Tour, TspReport, TspSolver};

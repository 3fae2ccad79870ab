//! CityRoute - 道路网络上的路径规划与资源调度引擎
//!
//! 提供六种寻路算法及其对比决策、带缓存的交通感知重算、
//! 车辆调度（makespan 最小化）以及小规模 TSP 求解。
//! 图由调用方持有，引擎只在调用期间借用它

pub mod api;
pub mod cache;
pub mod config;
pub mod core;
pub mod graph;
pub mod services;
pub mod utils;

// 错误和结果类型
pub use crate::core::error::{RouteError, RouteResult};

// 图模型
pub use graph::{Edge, EdgeId, Node, NodeId, RoadGraph, BLOCKED_THRESHOLD};

// 引擎入口与无状态操作
pub use api::{
    apply_traffic_scenario, recompute_shortest_path, solve_tsp, solve_vehicle_scheduling,
    RoutingEngine, RunAllReport,
};
pub use config::Config;
pub use services::{
    check_route, decide_best_algorithm, run_all_path_algorithms, run_path_algorithm,
    AlgorithmKind, AlgorithmRecord, Decision, DecisionEngine, EdgeChange, PathResult,
    RecomputeStrategy, RouteCheck, ScenarioKind, Schedule, SchedulingReport, Tour,
    TrafficManager, TrafficScenario, TspReport, TspSolver, VehicleScheduler,
};

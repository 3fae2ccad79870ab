//! 寻路与决策集成测试
//!
//! 测试范围：
//! - 六种算法在同一张图上的结果对比
//! - 负权环检测
//! - 决策引擎的推荐规则
//! - Dijkstra 与 A* 在随机图上的代价一致性

mod common;

use cityroute::services::{AStar, BellmanFord, Dijkstra};
use cityroute::{
    check_route, decide_best_algorithm, run_all_path_algorithms, run_path_algorithm,
    AlgorithmKind, RoadGraph, RouteCheck, RouteError, RoutingEngine,
};

// ==================== 单算法测试 ====================

#[test]
fn test_dijkstra_and_bfs_on_diamond() {
    let fixture = common::diamond();
    let (a, d) = (fixture.id("A"), fixture.id("D"));

    let dijkstra = run_path_algorithm(&fixture.graph, AlgorithmKind::Dijkstra, a, d)
        .expect("Dijkstra should run in test");
    assert!(dijkstra.found);
    assert_eq!(dijkstra.total_cost, 3.0);
    assert_eq!(
        fixture.graph.labels_of(dijkstra.path.as_deref().unwrap_or_default()),
        "A → C → B → D"
    );

    // BFS 只看跳数，走 A → B → D
    let bfs = run_path_algorithm(&fixture.graph, AlgorithmKind::Bfs, a, d)
        .expect("BFS should run in test");
    assert!(bfs.found);
    assert_eq!(bfs.total_cost, 6.0);
    assert_eq!(bfs.path_len(), 3);
}

#[test]
fn test_negative_cycle_detection() {
    let fixture = common::negative_cycle();
    let (a, c) = (fixture.id("A"), fixture.id("C"));

    let result = BellmanFord::shortest_path(&fixture.graph, a, c);
    assert!(!result.found);
    assert!(result.has_negative_cycle);
    assert!(result.path.is_none());
    assert!(result.distance_history.is_some());

    // 非负权算法拒绝执行
    let refused = run_path_algorithm(&fixture.graph, AlgorithmKind::Dijkstra, a, c)
        .expect("Refusal is not an error in test");
    assert!(!refused.is_success());
    assert!(refused.refusal.is_some());
}

#[test]
fn test_unknown_node_is_error() {
    let fixture = common::diamond();
    let mut other = common::grid();
    let stray = other.graph.add_node_auto(9.0, 9.0);

    let result = run_path_algorithm(&fixture.graph, AlgorithmKind::AStar, fixture.id("A"), stray);
    assert!(matches!(result, Err(RouteError::NodeNotFound(_))));
}

// ==================== 决策测试 ====================

#[test]
fn test_run_all_recommends_weighted_algorithm() {
    let fixture = common::diamond();
    let engine = RoutingEngine::default();

    let report = engine
        .run_all(&fixture.graph, fixture.id("A"), fixture.id("D"))
        .expect("Run all should succeed in test");
    assert_eq!(report.records.len(), AlgorithmKind::ALL.len());

    let best = report.decision.best.expect("Decision should exist in test");
    assert_eq!(best.total_cost, 3.0);
    assert!(!best.kind.is_unweighted_traversal());
    assert!(best.optimal);
}

#[test]
fn test_decision_is_none_when_every_algorithm_fails() {
    let fixture = common::diamond();
    let records = run_all_path_algorithms(&fixture.graph, fixture.id("D"), fixture.id("A"))
        .expect("Run all should succeed in test");
    assert!(records.iter().all(|r| !r.success));

    let decision = decide_best_algorithm(&records, false, false);
    assert!(decision.best.is_none());
    assert_eq!(decision.summary(), "Best: none");
}

#[test]
fn test_hop_only_successes_give_no_decision_on_weighted_graph() {
    let mut graph = RoadGraph::new(true);
    let a = graph.add_node("A", 0.0, 0.0).expect("Node should be added in test");
    let b = graph.add_node("B", 1.0, 0.0).expect("Node should be added in test");
    let c = graph.add_node("C", 2.0, 0.0).expect("Node should be added in test");
    graph.add_edge(a, b, 1.0).expect("Edge should be added in test");
    graph.add_edge(b, a, -3.0).expect("Edge should be added in test");
    graph.add_edge(b, c, 1.0).expect("Edge should be added in test");

    let report = RoutingEngine::default()
        .run_all(&graph, a, c)
        .expect("Run all should succeed in test");
    let succeeded: Vec<AlgorithmKind> = report
        .records
        .iter()
        .filter(|r| r.success)
        .map(|r| r.kind)
        .collect();
    assert_eq!(succeeded, vec![AlgorithmKind::Bfs, AlgorithmKind::Dfs]);
    assert!(report.decision.best.is_none());
    assert_eq!(report.decision.rationale, "No valid successful result found.");
}

#[test]
fn test_negative_weights_recommend_bellman_ford() {
    let mut fixture = common::diamond();
    let edge = fixture
        .graph
        .find_edge(fixture.id("C"), fixture.id("B"))
        .expect("Edge should exist in test")
        .id;
    fixture
        .graph
        .set_weight(edge, -0.5)
        .expect("Weight should be set in test");

    let engine = RoutingEngine::default();
    let report = engine
        .run_all(&fixture.graph, fixture.id("A"), fixture.id("D"))
        .expect("Run all should succeed in test");
    let best = report.decision.best.expect("Decision should exist in test");
    assert_eq!(best.kind, AlgorithmKind::BellmanFord);
    assert_eq!(best.total_cost, 1.5);
}

#[test]
fn test_route_check() {
    let fixture = common::diamond();
    let check = check_route(&fixture.graph, fixture.id("D"), fixture.id("A"))
        .expect("Check should succeed in test");
    assert_eq!(
        check,
        RouteCheck::Unreachable {
            from: "D".to_string(),
            to: "A".to_string()
        }
    );
}

// ==================== 一致性测试 ====================

#[test]
fn test_astar_matches_dijkstra_on_random_graphs() {
    for seed in 0..20 {
        let (graph, ids) = common::random_graph(seed, 12, 0.25);
        for &source in ids.iter().take(4) {
            for &destination in ids.iter().rev().take(4) {
                if source == destination {
                    continue;
                }
                let dijkstra = Dijkstra::shortest_path(&graph, source, destination);
                let astar = AStar::shortest_path(&graph, source, destination);
                assert_eq!(dijkstra.found, astar.found, "seed {}", seed);
                if dijkstra.found {
                    assert!(
                        (dijkstra.total_cost - astar.total_cost).abs() < 1e-9,
                        "seed {}: {} vs {}",
                        seed,
                        dijkstra.total_cost,
                        astar.total_cost
                    );
                }
            }
        }
    }
}

//! 最优算法决策
//!
//! 根据一次“全部运行”的记录和图的权重特征，按固定规则挑选推荐算法并给出理由

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::graph::WEIGHT_EPSILON;
use crate::services::algorithm::{AlgorithmKind, AlgorithmRecord};

/// 决策结果，`best` 为 None 表示没有可推荐的算法
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub best: Option<AlgorithmRecord>,
    pub rationale: String,
}

impl Decision {
    fn none() -> Self {
        Self {
            best: None,
            rationale: "No valid successful result found.".to_string(),
        }
    }

    fn pick(record: &AlgorithmRecord, rationale: &str) -> Self {
        Self {
            best: Some(record.clone()),
            rationale: rationale.to_string(),
        }
    }

    /// 一行摘要，例如 `Best: Dijkstra (cost 3.00, steps 9, 0.01 ms)`
    pub fn summary(&self) -> String {
        match &self.best {
            Some(best) => format!(
                "Best: {} (cost {:.2}, steps {}, {:.2} ms)",
                best.name, best.total_cost, best.steps, best.elapsed_ms
            ),
            None => "Best: none".to_string(),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.summary(), self.rationale)
    }
}

/// 决策引擎
pub struct DecisionEngine;

impl DecisionEngine {
    /// 按规则挑选最优算法
    ///
    /// 1. 排除失败的记录
    /// 2. 权重不全相同时排除 BFS/DFS
    /// 3. 存在负权时选择 Bellman-Ford
    /// 4. 权重全部相同时选择 BFS
    /// 5. 否则取最小代价，优先非 BFS/DFS，再按步数、耗时打破平局
    pub fn decide(
        records: &[AlgorithmRecord],
        has_negative_weights: bool,
        all_weights_equal_positive: bool,
    ) -> Decision {
        let candidates: Vec<&AlgorithmRecord> = records
            .iter()
            .filter(|r| r.success)
            .filter(|r| all_weights_equal_positive || !r.kind.is_unweighted_traversal())
            .collect();

        if candidates.is_empty() {
            return Decision::none();
        }

        if has_negative_weights {
            if let Some(record) = find_kind(&candidates, AlgorithmKind::BellmanFord) {
                return Decision::pick(
                    record,
                    "Negative weights detected → Bellman-Ford is required for correctness.",
                );
            }
        }

        if all_weights_equal_positive {
            if let Some(record) = find_kind(&candidates, AlgorithmKind::Bfs) {
                return Decision::pick(
                    record,
                    "All edge weights equal → BFS is optimal (shortest-hop) and efficient.",
                );
            }
        }

        let best_cost = candidates
            .iter()
            .map(|r| r.total_cost)
            .fold(f64::INFINITY, f64::min);

        let optimal: Vec<&AlgorithmRecord> = candidates
            .into_iter()
            .filter(|r| (r.total_cost - best_cost).abs() < WEIGHT_EPSILON)
            .collect();

        let weighted: Vec<&AlgorithmRecord> = optimal
            .iter()
            .copied()
            .filter(|r| !r.kind.is_unweighted_traversal())
            .collect();
        let finalists = if weighted.is_empty() { optimal } else { weighted };

        // min_by 在相等时保留第一个
        let best = finalists.into_iter().min_by(|a, b| {
            a.steps
                .cmp(&b.steps)
                .then_with(|| a.elapsed_ms.partial_cmp(&b.elapsed_ms).unwrap_or(Ordering::Equal))
        });

        match best {
            Some(record) => Decision::pick(record, rationale_for(record.kind)),
            None => Decision::none(),
        }
    }
}

fn find_kind<'a>(
    candidates: &[&'a AlgorithmRecord],
    kind: AlgorithmKind,
) -> Option<&'a AlgorithmRecord> {
    candidates.iter().copied().find(|r| r.kind == kind)
}

fn rationale_for(kind: AlgorithmKind) -> &'static str {
    match kind {
        AlgorithmKind::AStar => {
            "A* achieved optimal cost with fewer operations → best balance for this case."
        }
        AlgorithmKind::Dijkstra => {
            "Dijkstra guarantees optimal shortest path for non-negative weights → best safe choice."
        }
        AlgorithmKind::BellmanFord => {
            "Bellman-Ford handles negative weights (slower but correct) → best for this case."
        }
        AlgorithmKind::Greedy => {
            "Greedy matched the optimal cost in this instance and was efficient (not guaranteed generally)."
        }
        AlgorithmKind::Bfs => "BFS is optimal on unweighted/equal-weight graphs and efficient here.",
        AlgorithmKind::Dfs => "Selected based on optimal cost, then steps/time tie-break.",
    }
}

/// 标记每条记录是否达到成功记录中的最小代价
///
/// 与决策规则无关，仅用于展示
pub fn mark_optimal_flags(records: &mut [AlgorithmRecord]) {
    let best_cost = records
        .iter()
        .filter(|r| r.success)
        .map(|r| r.total_cost)
        .fold(f64::INFINITY, f64::min);

    for record in records.iter_mut() {
        record.optimal =
            record.success && best_cost.is_finite() && (record.total_cost - best_cost).abs() < WEIGHT_EPSILON;
    }
}

/// 便捷函数，等价于 `DecisionEngine::decide`
pub fn decide_best_algorithm(
    records: &[AlgorithmRecord],
    has_negative_weights: bool,
    all_weights_equal_positive: bool,
) -> Decision {
    DecisionEngine::decide(records, has_negative_weights, all_weights_equal_positive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: AlgorithmKind, cost: f64, steps: usize, elapsed_ms: f64, success: bool) -> AlgorithmRecord {
        AlgorithmRecord {
            kind,
            name: kind.name().to_string(),
            elapsed_ms,
            steps,
            total_cost: cost,
            path_len: 0,
            success,
            reason: String::new(),
            complexity: kind.complexity().to_string(),
            optimal: false,
        }
    }

    fn weighted_batch() -> Vec<AlgorithmRecord> {
        vec![
            record(AlgorithmKind::Bfs, 6.0, 4, 0.01, true),
            record(AlgorithmKind::Dfs, 10.0, 3, 0.01, true),
            record(AlgorithmKind::Dijkstra, 3.0, 9, 0.02, true),
            record(AlgorithmKind::AStar, 3.0, 7, 0.03, true),
            record(AlgorithmKind::BellmanFord, 3.0, 4, 0.05, true),
            record(AlgorithmKind::Greedy, 3.0, 7, 0.01, true),
        ]
    }

    #[test]
    fn test_no_decision_when_all_failed() {
        let records = vec![
            record(AlgorithmKind::Dijkstra, f64::INFINITY, 0, 0.0, false),
            record(AlgorithmKind::BellmanFord, -3.0, 6, 0.0, false),
        ];
        let decision = DecisionEngine::decide(&records, true, false);
        assert!(decision.best.is_none());
        assert_eq!(decision.rationale, "No valid successful result found.");
        assert_eq!(decision.summary(), "Best: none");
    }

    #[test]
    fn test_bfs_excluded_on_weighted_graph() {
        let records = vec![record(AlgorithmKind::Bfs, 6.0, 4, 0.01, true)];
        let decision = DecisionEngine::decide(&records, false, false);
        assert!(decision.best.is_none());
    }

    #[test]
    fn test_negative_weights_pick_bellman_ford() {
        let records = vec![
            record(AlgorithmKind::Dijkstra, f64::INFINITY, 0, 0.0, false),
            record(AlgorithmKind::BellmanFord, 1.0, 5, 0.2, true),
        ];
        let decision = DecisionEngine::decide(&records, true, false);
        assert_eq!(decision.best.map(|r| r.kind), Some(AlgorithmKind::BellmanFord));
        assert!(decision.rationale.starts_with("Negative weights detected"));
    }

    #[test]
    fn test_equal_weights_pick_bfs() {
        let mut records = weighted_batch();
        for r in records.iter_mut() {
            r.total_cost = 2.0;
        }
        let decision = DecisionEngine::decide(&records, false, true);
        assert_eq!(decision.best.map(|r| r.kind), Some(AlgorithmKind::Bfs));
        assert!(decision.rationale.starts_with("All edge weights equal"));
    }

    #[test]
    fn test_tie_break_by_steps_then_time() {
        let decision = DecisionEngine::decide(&weighted_batch(), false, false);
        assert_eq!(
            decision.best.as_ref().map(|r| r.kind),
            Some(AlgorithmKind::BellmanFord)
        );
        assert!(decision.rationale.starts_with("Bellman-Ford handles negative weights"));

        let mut records = weighted_batch();
        records.retain(|r| r.kind != AlgorithmKind::BellmanFord);
        let decision = DecisionEngine::decide(&records, false, false);
        // A* 与 Greedy 步数相同，Greedy 耗时更短
        assert_eq!(decision.best.map(|r| r.kind), Some(AlgorithmKind::Greedy));
    }

    #[test]
    fn test_mark_optimal_flags() {
        let mut records = weighted_batch();
        records.push(record(AlgorithmKind::Dijkstra, 1.0, 1, 0.0, false));
        mark_optimal_flags(&mut records);

        let optimal: Vec<&str> = records.iter().filter(|r| r.optimal).map(|r| r.name.as_str()).collect();
        assert_eq!(optimal, vec!["Dijkstra", "A*", "Bellman-Ford", "Greedy"]);
    }

    #[test]
    fn test_summary() {
        let decision = DecisionEngine::decide(&weighted_batch(), false, false);
        assert_eq!(decision.summary(), "Best: Bellman-Ford (cost 3.00, steps 4, 0.05 ms)");
    }
}

//! 车辆调度
//!
//! 把一组线路时长分配给 m 辆车，使最晚完成时间（makespan）最小。
//! 先用 LPT 贪心得到初始解，作业数不超过上限时再用分支限界求精确解

use serde::Serialize;

use crate::config::SolverConfig;

/// 调度方案
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub makespan: f64,
    /// 每辆车的总负载
    pub loads: Vec<f64>,
    /// 每辆车分到的作业下标（按分配顺序）
    pub assignment: Vec<Vec<usize>>,
}

impl Schedule {
    fn empty(machines: usize) -> Self {
        Self {
            makespan: 0.0,
            loads: vec![0.0; machines],
            assignment: vec![Vec::new(); machines],
        }
    }

    pub fn machine_count(&self) -> usize {
        self.assignment.len()
    }

    /// 可读的分配结果，每辆车一行：
    /// `Vehicle 1: R4(25) R1(10) | total = 35.00`
    pub fn describe(&self, durations: &[f64]) -> String {
        let mut out = String::new();
        for (machine, jobs) in self.assignment.iter().enumerate() {
            out.push_str(&format!("Vehicle {}:", machine + 1));
            let mut total = 0.0;
            for &job in jobs {
                let duration = durations.get(job).copied().unwrap_or(0.0);
                out.push_str(&format!(" R{}({})", job + 1, duration));
                total += duration;
            }
            out.push_str(&format!(" | total = {:.2}\n", total));
        }
        out
    }
}

/// 调度求解结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulingReport {
    pub greedy: Schedule,
    /// 作业数超过上限时为 None
    pub exact: Option<Schedule>,
    pub lower_bound: f64,
}

impl SchedulingReport {
    /// 精确解优先，否则为贪心解
    pub fn best(&self) -> &Schedule {
        self.exact.as_ref().unwrap_or(&self.greedy)
    }

    /// 贪心解是否已被证明最优
    pub fn greedy_is_optimal(&self) -> bool {
        self.exact
            .as_ref()
            .is_some_and(|exact| exact.makespan >= self.greedy.makespan)
    }
}

/// makespan 的下界：max(总时长 / 车辆数, 最长作业)
pub fn lower_bound(durations: &[f64], machines: usize) -> f64 {
    if machines == 0 {
        return f64::INFINITY;
    }
    let total: f64 = durations.iter().sum();
    let longest = durations.iter().copied().fold(0.0, f64::max);
    (total / machines as f64).max(longest)
}

/// 车辆调度求解器
#[derive(Debug, Clone)]
pub struct VehicleScheduler {
    max_exact_jobs: usize,
}

impl Default for VehicleScheduler {
    fn default() -> Self {
        Self::new(&SolverConfig::default())
    }
}

impl VehicleScheduler {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            max_exact_jobs: config.exact_scheduling_max_jobs,
        }
    }

    /// 求解调度问题
    ///
    /// 车辆数为 0、作业列表为空或含非正/非有限时长时返回 None
    pub fn solve(&self, durations: &[f64], machines: usize) -> Option<SchedulingReport> {
        if machines == 0 || durations.is_empty() {
            log::warn!("调度请求无效: {} 个作业, {} 辆车", durations.len(), machines);
            return None;
        }
        if durations.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            log::warn!("调度请求无效: 时长必须为正的有限数");
            return None;
        }

        let greedy = Self::greedy(durations, machines);
        let exact = if durations.len() <= self.max_exact_jobs {
            Some(Self::branch_and_bound(durations, machines, &greedy))
        } else {
            log::info!(
                "作业数 {} 超过精确求解上限 {}, 仅使用贪心解",
                durations.len(),
                self.max_exact_jobs
            );
            None
        };

        log::info!(
            "调度完成: 贪心 makespan={:.2}, 精确 makespan={}",
            greedy.makespan,
            exact
                .as_ref()
                .map_or_else(|| "-".to_string(), |s| format!("{:.2}", s.makespan))
        );

        Some(SchedulingReport {
            greedy,
            exact,
            lower_bound: lower_bound(durations, machines),
        })
    }

    /// LPT 贪心：按时长降序，每个作业分给当前负载最小的车（负载相同取下标小的）
    pub fn greedy(durations: &[f64], machines: usize) -> Schedule {
        let mut schedule = Schedule::empty(machines);
        if machines == 0 {
            return schedule;
        }

        let mut order: Vec<usize> = (0..durations.len()).collect();
        order.sort_by(|&a, &b| durations[b].total_cmp(&durations[a]));

        for job in order {
            let mut best_machine = 0;
            for machine in 1..machines {
                if schedule.loads[machine] < schedule.loads[best_machine] {
                    best_machine = machine;
                }
            }
            schedule.loads[best_machine] += durations[job];
            schedule.assignment[best_machine].push(job);
        }

        schedule.makespan = schedule.loads.iter().copied().fold(0.0, f64::max);
        schedule
    }

    /// 以贪心解为初始上界的分支限界
    pub fn branch_and_bound(durations: &[f64], machines: usize, seed: &Schedule) -> Schedule {
        let mut search = BranchAndBound {
            durations,
            best: seed.clone(),
            current: Schedule::empty(machines),
        };
        search.assign(0);
        search.best
    }
}

struct BranchAndBound<'a> {
    durations: &'a [f64],
    best: Schedule,
    current: Schedule,
}

impl BranchAndBound<'_> {
    fn assign(&mut self, job: usize) {
        if job == self.durations.len() {
            let makespan = self.current.loads.iter().copied().fold(0.0, f64::max);
            if makespan < self.best.makespan {
                self.best = Schedule {
                    makespan,
                    ..self.current.clone()
                };
            }
            return;
        }

        let duration = self.durations[job];
        for machine in 0..self.current.machine_count() {
            self.current.assignment[machine].push(job);
            self.current.loads[machine] += duration;

            let current_max = self.current.loads.iter().copied().fold(0.0, f64::max);
            if current_max < self.best.makespan {
                self.assign(job + 1);
            }

            self.current.loads[machine] -= duration;
            self.current.assignment[machine].pop();

            // 空车彼此等价，只需尝试第一辆
            if self.current.assignment[machine].is_empty() {
                break;
            }
        }
    }
}

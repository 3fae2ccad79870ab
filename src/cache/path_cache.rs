//! 路径缓存
//!
//! 以 (起点, 终点) 为键保存最近一次成功的寻路结果。
//! 缓存只保存派生的 `PathResult`，不持有图的引用

use std::collections::HashMap;

use super::stats::CacheStats;
use super::traits::{Cache, StatsCache};
use crate::graph::NodeId;
use crate::services::algorithm::PathResult;

/// 缓存键：(起点, 终点)
pub type RouteKey = (NodeId, NodeId);

#[derive(Debug, Clone, Default)]
pub struct PathCache {
    entries: HashMap<RouteKey, PathResult>,
    stats: CacheStats,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查看条目，不计入统计
    pub fn peek(&self, key: &RouteKey) -> Option<&PathResult> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &RouteKey> {
        self.entries.keys()
    }

    /// 删除所有满足条件的条目，返回删除数量并计入失效统计
    pub fn invalidate_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&RouteKey, &PathResult) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, result| !predicate(key, result));
        let removed = before - self.entries.len();
        self.stats.record_invalidations(removed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Cache<RouteKey, PathResult> for PathCache {
    fn get(&mut self, key: &RouteKey) -> Option<PathResult> {
        match self.entries.get(key) {
            Some(result) => {
                self.stats.record_hit();
                Some(result.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    fn put(&mut self, key: RouteKey, value: PathResult) {
        self.entries.insert(key, value);
    }

    fn contains(&self, key: &RouteKey) -> bool {
        self.entries.contains_key(key)
    }

    fn remove(&mut self, key: &RouteKey) -> Option<PathResult> {
        self.entries.remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl StatsCache<RouteKey, PathResult> for PathCache {
    fn hits(&self) -> u64 {
        self.stats.hits
    }

    fn misses(&self) -> u64 {
        self.stats.misses
    }

    fn hit_rate(&self) -> f64 {
        self.stats.hit_rate()
    }

    fn invalidations(&self) -> u64 {
        self.stats.invalidations
    }

    fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

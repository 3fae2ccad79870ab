//! 缓存特征定义
//!
//! 提供统一的缓存接口。引擎是单线程的，所有操作都通过 `&mut self` 完成

/// 基础缓存特征
pub trait Cache<K, V> {
    /// 获取缓存值，计入命中/未命中统计
    fn get(&mut self, key: &K) -> Option<V>;

    /// 设置缓存值
    fn put(&mut self, key: K, value: V);

    /// 检查是否包含键
    fn contains(&self, key: &K) -> bool;

    /// 移除缓存项
    fn remove(&mut self, key: &K) -> Option<V>;

    /// 清空缓存
    fn clear(&mut self);

    /// 获取缓存大小
    fn len(&self) -> usize;

    /// 检查是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 统计缓存特征
pub trait StatsCache<K, V>: Cache<K, V> {
    /// 获取命中次数
    fn hits(&self) -> u64;

    /// 获取未命中次数
    fn misses(&self) -> u64;

    /// 获取命中率
    fn hit_rate(&self) -> f64;

    /// 获取因图变化而失效的条目数
    fn invalidations(&self) -> u64;

    /// 重置统计信息
    fn reset_stats(&mut self);
}

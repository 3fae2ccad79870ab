//! 缓存模块
//!
//! 提供缓存接口以及交通管理器使用的路径缓存

pub mod path_cache;
pub mod stats;
pub mod traits;

// 重新导出主要类型
pub use path_cache::{PathCache, RouteKey};
pub use stats::CacheStats;
pub use traits::{Cache, StatsCache};

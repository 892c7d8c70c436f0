//! 话数引用
//!
//! 封装"哪部作品的哪一话"这一抓取目标信息

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 话数引用
///
/// 只在话数列表请求的生命周期内有意义，没有独立状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRef {
    /// 作品ID
    pub work_id: String,

    /// 话数ID
    pub episode_id: String,
}

impl EpisodeRef {
    /// 创建新的话数引用
    pub fn new(work_id: impl Into<String>, episode_id: impl Into<String>) -> Self {
        Self {
            work_id: work_id.into(),
            episode_id: episode_id.into(),
        }
    }
}

impl Display for EpisodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[作品#{} 话数#{}]", self.work_id, self.episode_id)
    }
}

//! 话数评审上下文
//!
//! 封装"我正在评审哪部作品的第几话"这一信息

use std::fmt::Display;

use crate::models::episode::EpisodeRef;

/// 话数评审上下文
///
/// 包含评审单话所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct EpisodeCtx {
    /// 作品ID
    pub work_id: String,

    /// 话数在列表中的序号（从1开始，仅用于日志显示）
    pub episode_index: usize,

    /// 话数ID
    pub episode_id: String,
}

impl EpisodeCtx {
    /// 创建新的话数上下文
    pub fn new(work_id: String, episode_index: usize, episode_id: String) -> Self {
        Self {
            work_id,
            episode_index,
            episode_id,
        }
    }

    /// 转换为话数引用
    pub fn episode_ref(&self) -> EpisodeRef {
        EpisodeRef::new(&self.work_id, &self.episode_id)
    }
}

impl Display for EpisodeCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[作品#{} 第{}话 ID#{}]",
            self.work_id, self.episode_index, self.episode_id
        )
    }
}

//! 顺序处理器 - 编排层
//!
//! 按话数列表逐话评审，严格保持输入顺序。
//! 抓取类错误向上抛出（与顺序执行语义一致），
//! 判定无效只记为跳过。

use anyhow::Result;
use reqwest::Client;
use tracing::info;

use crate::models::verdict::EpisodeVerdict;
use crate::workflow::{EpisodeCtx, EpisodeFlow, ReviewOutcome};

/// 单部作品的评审统计
#[derive(Debug, Default, Clone)]
pub struct WorkStats {
    /// 得到有效判定的话数
    pub judged: usize,
    /// 被跳过的话数
    pub skipped: usize,
    /// 评审对象总话数
    pub total: usize,
}

/// 顺序评审一部作品的所有话数
///
/// # 参数
/// - `client`: HTTP 客户端
/// - `flow`: 单话评审流程
/// - `work_id`: 作品ID
/// - `episode_ids`: 话数ID列表（来自话数列表接口，已按页面顺序截断）
///
/// # 返回
/// 返回按话数顺序排列的判定列表和统计信息
pub async fn process_work(
    client: &Client,
    flow: &EpisodeFlow,
    work_id: &str,
    episode_ids: &[String],
) -> Result<(Vec<EpisodeVerdict>, WorkStats)> {
    let total = episode_ids.len();
    let mut verdicts = Vec::with_capacity(total);
    let mut skipped = 0;

    for (idx, episode_id) in episode_ids.iter().enumerate() {
        let ctx = EpisodeCtx::new(work_id.to_string(), idx + 1, episode_id.clone());

        match flow.run(client, &ctx).await? {
            ReviewOutcome::Judged(verdict) => verdicts.push(verdict),
            ReviewOutcome::Skipped => skipped += 1,
        }
    }

    let judged = verdicts.len();
    info!("✓ 顺序评审完成: 有效判定 {}/{}, 跳过 {}", judged, total, skipped);

    Ok((
        verdicts,
        WorkStats {
            judged,
            skipped,
            total,
        },
    ))
}

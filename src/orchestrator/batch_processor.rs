//! 并发处理器 - 编排层
//!
//! ## 职责
//!
//! 对固定的话数列表做异步扇出评审：
//!
//! 1. **并发控制**：使用 Semaphore 限制同时在途的评审数量
//! 2. **顺序保证**：结果按输入顺序重新组装
//! 3. **失败隔离**：单话失败记日志并记为跳过，不中断其余话数
//!
//! 没有重试、没有额外背压、没有取消机制，
//! 超出 Semaphore 之外的行为全部交给 HTTP / LLM 库的默认语义。

use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::models::verdict::EpisodeVerdict;
use crate::orchestrator::work_processor::WorkStats;
use crate::workflow::{EpisodeCtx, EpisodeFlow, ReviewOutcome};

/// 并发评审一部作品的所有话数
///
/// # 参数
/// - `client`: HTTP 客户端（内部为 Arc，可安全 clone）
/// - `flow`: 单话评审流程（Arc 共享）
/// - `work_id`: 作品ID
/// - `episode_ids`: 话数ID列表
/// - `max_concurrent`: 最大并发数
///
/// # 返回
/// 返回按输入顺序排列的判定列表和统计信息
pub async fn process_work_concurrent(
    client: &Client,
    flow: Arc<EpisodeFlow>,
    work_id: &str,
    episode_ids: &[String],
    max_concurrent: usize,
) -> Result<(Vec<EpisodeVerdict>, WorkStats)> {
    let total = episode_ids.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    info!("📦 并发评审 {} 话，最大并发数: {}", total, max_concurrent);

    // 为每一话创建并发任务
    let mut handles = Vec::with_capacity(total);

    for (idx, episode_id) in episode_ids.iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;

        // reqwest::Client 内部使用 Arc，clone 是轻量操作
        let client_clone = client.clone();
        let flow_clone = flow.clone();
        let ctx = EpisodeCtx::new(work_id.to_string(), idx + 1, episode_id.clone());

        let handle = tokio::spawn(async move {
            let _permit = permit;
            flow_clone.run(&client_clone, &ctx).await
        });
        handles.push(handle);
    }

    // 等待全部任务完成（join_all 保持输入顺序）
    let results = futures::future::join_all(handles).await;

    let mut verdicts = Vec::new();
    let mut skipped = 0;

    for (idx, joined) in results.into_iter().enumerate() {
        match joined {
            Ok(Ok(ReviewOutcome::Judged(verdict))) => {
                verdicts.push(verdict);
            }
            Ok(Ok(ReviewOutcome::Skipped)) => {
                skipped += 1;
            }
            Ok(Err(e)) => {
                error!("[第 {} 话] ❌ 评审过程中发生错误: {}", idx + 1, e);
                skipped += 1;
            }
            Err(e) => {
                error!("[第 {} 话] 任务执行失败: {}", idx + 1, e);
                skipped += 1;
            }
        }
    }

    let judged = verdicts.len();
    info!("✓ 并发评审完成: 有效判定 {}/{}, 跳过 {}", judged, total, skipped);

    Ok((
        verdicts,
        WorkStats {
            judged,
            skipped,
            total,
        },
    ))
}

//! 单话评审流程 - 流程层
//!
//! 核心职责：定义"一话"的完整评审流程
//!
//! 流程顺序：
//! 1. 抓取正文 → 2. LLM 结构化判定 → 3. 校验 → 4. 返回判定结果

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::api::kakuyomu;
use crate::config::Config;
use crate::models::prompt::PromptConfig;
use crate::models::verdict::EpisodeVerdict;
use crate::services::LlmService;
use crate::utils::logging::truncate_text;
use crate::workflow::episode_ctx::EpisodeCtx;

/// 单话评审结果
#[derive(Debug)]
pub enum ReviewOutcome {
    /// 得到有效判定
    Judged(EpisodeVerdict),
    /// 跳过（LLM 输出无法转成有效判定）
    Skipped,
}

/// 单话评审流程
///
/// - 编排完整的单话评审流程
/// - 决定何时抓取、何时判定、何时跳过
/// - 不持有 HTTP 客户端（由编排层传入）
/// - 只依赖业务能力（services）
pub struct EpisodeFlow {
    llm_service: LlmService,
    prompts: PromptConfig,
    base_url: String,
    verbose_logging: bool,
}

impl EpisodeFlow {
    /// 创建新的单话评审流程
    pub fn new(config: &Config, prompts: PromptConfig) -> Self {
        Self {
            llm_service: LlmService::new(config),
            prompts,
            base_url: config.kakuyomu_base_url.clone(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 评审单话
    ///
    /// 正文抓取失败会向上抛出（抓取错误属于站点问题，由调用方决定如何处理）；
    /// LLM 输出无法通过解析或校验时记日志并返回 Skipped
    pub async fn run(&self, client: &Client, ctx: &EpisodeCtx) -> Result<ReviewOutcome> {
        info!("[第 {} 话] 📖 正在抓取正文... (ID: {})", ctx.episode_index, ctx.episode_id);

        let body = kakuyomu::fetch_episode_body(
            client,
            &self.base_url,
            &ctx.work_id,
            &ctx.episode_id,
        )
        .await?;

        if self.verbose_logging {
            info!(
                "[第 {} 话] 正文预览: {}",
                ctx.episode_index,
                truncate_text(&body, 80)
            );
        }

        info!("[第 {} 话] 🤖 正在调用 LLM 评审...", ctx.episode_index);

        match self
            .llm_service
            .judge_episode(&ctx.episode_ref(), &body, &self.prompts)
            .await
        {
            Ok(verdict) => {
                info!(
                    "[第 {} 话] ✓ 判定: {} (置信度: {:.2})",
                    ctx.episode_index, verdict.verdict, verdict.confidence
                );
                Ok(ReviewOutcome::Judged(verdict))
            }
            Err(e) => {
                warn!(
                    "[第 {} 话] ⚠️ 未能得到有效判定，跳过: {}",
                    ctx.episode_index, e
                );
                Ok(ReviewOutcome::Skipped)
            }
        }
    }

    /// 借出内部的 LLM 服务（总评任务复用同一客户端配置）
    pub fn llm_service(&self) -> &LlmService {
        &self.llm_service
    }

    /// 借出提示词配置
    pub fn prompts(&self) -> &PromptConfig {
        &self.prompts
    }
}

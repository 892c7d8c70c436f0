//! 应用主结构
//!
//! 持有配置和共享资源（HTTP 客户端、单话评审流程），
//! 负责从"拿到作品ID"到"打印报告"的完整生命周期

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use crate::api::kakuyomu;
use crate::config::Config;
use crate::models::load_prompt_config;
use crate::orchestrator::{process_work, process_work_concurrent};
use crate::services::ReportPresenter;
use crate::workflow::EpisodeFlow;

/// 应用主结构
pub struct App {
    config: Config,
    client: Client,
    flow: Arc<EpisodeFlow>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 加载提示词配置（缺失时使用内置默认值）
        let prompts = load_prompt_config(&config.prompts_file).await?;

        let client = Client::new();
        let flow = Arc::new(EpisodeFlow::new(&config, prompts));

        Ok(Self {
            config,
            client,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 确定评审对象的作品ID
        let work_id = match self.resolve_work_id()? {
            Some(id) => id,
            None => {
                warn!("IDが入力されていません。");
                return Ok(());
            }
        };

        info!("分析開始: {}", work_id);

        // 获取话数列表
        let episodes = kakuyomu::list_episodes(
            &self.client,
            &self.config.kakuyomu_base_url,
            &work_id,
            self.config.episode_limit,
        )
        .await?;

        if episodes.is_empty() {
            warn!("⚠️ 作品 {} 没有发现任何话数，程序结束", work_id);
            return Ok(());
        }

        info!("episodes: {:?}", episodes);

        // 逐话评审（根据配置选择顺序或并发模式）
        let (verdicts, stats) = if self.config.max_concurrent_episodes > 1 {
            process_work_concurrent(
                &self.client,
                self.flow.clone(),
                &work_id,
                &episodes,
                self.config.max_concurrent_episodes,
            )
            .await?
        } else {
            process_work(&self.client, &self.flow, &work_id, &episodes).await?
        };

        // 总评（没有任何有效判定时跳过）
        let summary = if verdicts.is_empty() {
            None
        } else {
            info!("📝 正在生成总评...");
            Some(
                self.flow
                    .llm_service()
                    .summarize_verdicts(&work_id, &verdicts, self.flow.prompts())
                    .await?,
            )
        };

        // 打印报告
        ReportPresenter::print_report(&work_id, &verdicts, stats.skipped, summary.as_deref());

        Ok(())
    }

    /// 确定作品ID：配置非空则直接使用，否则通过标准输入询问
    fn resolve_work_id(&self) -> Result<Option<String>> {
        if !self.config.work_id.trim().is_empty() {
            return Ok(Some(self.config.work_id.trim().to_string()));
        }

        print!("カクヨムの作品IDを入力してください: ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            Ok(None)
        } else {
            Ok(Some(input.to_string()))
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - カクヨム文章品質チェック");
    info!("📊 评审上限: {} 话 / 并发数: {}", config.episode_limit, config.max_concurrent_episodes);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

//! # Kakuyomu Wordsalad
//!
//! 一个用于检测カクヨム（kakuyomu.jp）小说"文章破綻"（ワードサラダ）的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 站点接口层（Api）
//! - `api/kakuyomu` - 抓取作品页面、解析 `__NEXT_DATA__`、提取话数列表和正文
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个对象
//! - `LlmService` - LLM 评审能力（单话判定 + 全话总评）
//! - `ReportPresenter` - 汇总统计与结果展示能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一话"的完整评审流程
//! - `EpisodeCtx` - 上下文封装（work_id + episode_id）
//! - `EpisodeFlow` - 流程编排（抓取正文 → LLM 判定 → 校验）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/work_processor` - 顺序处理器，按话数列表逐话评审
//! - `orchestrator/batch_processor` - 并发处理器，对固定话数列表做异步扇出
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{EpisodeRef, EpisodeVerdict, Metrics, PromptConfig, VerdictCategory};
pub use orchestrator::{process_work, process_work_concurrent, WorkStats};
pub use services::{LlmService, ReportPresenter, VerdictTally};
pub use workflow::{EpisodeCtx, EpisodeFlow, ReviewOutcome};

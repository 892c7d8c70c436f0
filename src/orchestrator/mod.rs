//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整部作品的评审调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `work_processor` - 顺序处理器
//! - 按话数列表逐话评审（默认模式）
//! - 复用同一个 EpisodeFlow
//! - 汇总单部作品的评审统计
//!
//! ### `batch_processor` - 并发处理器
//! - 对固定的话数列表做异步扇出（tokio::spawn + Semaphore）
//! - 结果按输入顺序重新组装
//! - 单话失败只影响该话，不中断整体
//!
//! ## 层次关系
//!
//! ```text
//! app (解析作品ID、话数列表、总评、报告)
//!     ↓
//! orchestrator (处理 Vec<episode_id>)
//!     ↓
//! workflow::EpisodeFlow (处理单话)
//!     ↓
//! services (能力层：llm / report)
//!     ↓
//! api (站点接口：kakuyomu)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：work_processor 管顺序，batch_processor 管并发
//! 2. **向下依赖**：编排层 → workflow → services → api
//! 3. **无业务逻辑**：只做调度和统计，不做具体判定

pub mod batch_processor;
pub mod work_processor;

// 重新导出主要类型
pub use batch_processor::process_work_concurrent;
pub use work_processor::{process_work, WorkStats};

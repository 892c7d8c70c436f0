//! LLM 服务 - 业务能力层
//!
//! 只负责"LLM 评审"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::episode::EpisodeRef;
use crate::models::prompt::PromptConfig;
use crate::models::verdict::EpisodeVerdict;

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 对单话正文做结构化判定
/// - 对全部判定结果做一次总评
/// - 提供通用的 LLM 调用接口
/// - 只处理单话，不出现 Vec<EpisodeCtx>
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 通用的 LLM 调用函数
    ///
    /// 这是最基础的 LLM 调用接口，其他所有 LLM 相关功能都应该基于此函数。
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        // 添加用户消息
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.3)
            .max_tokens(2048u32)
            .build()?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 对单话正文做结构化判定
    ///
    /// 这个函数基于 `send_to_llm` 实现，要求模型返回 EpisodeVerdict 形状的
    /// JSON，解析并校验后返回。
    ///
    /// # 参数
    /// - `episode`: 话数引用（work_id + episode_id）
    /// - `body`: 单话正文（纯文本）
    /// - `prompts`: 提示词配置
    ///
    /// # 返回
    /// 返回通过校验的判定结果
    pub async fn judge_episode(
        &self,
        episode: &EpisodeRef,
        body: &str,
        prompts: &PromptConfig,
    ) -> Result<EpisodeVerdict> {
        debug!(
            "开始评审 {}，正文长度: {} 字符",
            episode,
            body.chars().count()
        );

        let description = prompts
            .reviewer
            .render(&episode.work_id, &episode.episode_id);

        let user_message = format!(
            "{}\n\n【本文】\n{}\n\n【出力形式】\n{}",
            description, body, prompts.reviewer.expected_output
        );

        let response = self
            .send_to_llm(&user_message, Some(&prompts.reviewer.system))
            .await?;

        let verdict = self.parse_verdict_response(&response, episode)?;
        verdict.validate()?;

        debug!("{} 判定: {}", episode, verdict.verdict);

        Ok(verdict)
    }

    /// 对全部判定结果做一次总评
    ///
    /// 对应评审流程最后的汇总任务：把所有单话判定以 JSON 形式交给模型，
    /// 返回自由文本的总评。
    ///
    /// # 参数
    /// - `work_id`: 作品ID
    /// - `verdicts`: 全部单话判定结果
    /// - `prompts`: 提示词配置
    pub async fn summarize_verdicts(
        &self,
        work_id: &str,
        verdicts: &[EpisodeVerdict],
        prompts: &PromptConfig,
    ) -> Result<String> {
        debug!("开始总评，判定数量: {}", verdicts.len());

        let verdicts_json = serde_json::to_string_pretty(verdicts)?;

        let description = prompts.aggregator.render(work_id, "");
        let user_message = format!(
            "{}\n\n【判定結果一覧】\n{}\n\n【出力形式】\n{}",
            description, verdicts_json, prompts.aggregator.expected_output
        );

        self.send_to_llm(&user_message, Some(&prompts.aggregator.system))
            .await
    }

    /// 解析判定 JSON 响应
    ///
    /// 模型输出的 work_id / episode_id 不可信，解析后用上下文强制覆盖，
    /// 保证判定结果始终归属于列表中的话数
    fn parse_verdict_response(
        &self,
        response: &str,
        episode: &EpisodeRef,
    ) -> AppResult<EpisodeVerdict> {
        let json_text = extract_json_object(response)?;

        let mut verdict: EpisodeVerdict = serde_json::from_str(json_text)
            .map_err(|e| AppError::verdict_parse_failed(response, e))?;

        verdict.work_id = episode.work_id.clone();
        verdict.episode_id = episode.episode_id.clone();

        Ok(verdict)
    }
}

/// 从 LLM 响应中提取 JSON 对象文本
///
/// 兼容 ```json 代码块包裹和前后夹杂说明文字的情况
fn extract_json_object(response: &str) -> AppResult<&str> {
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => Ok(&response[s..=e]),
        _ => Err(AppError::Llm(LlmError::JsonObjectMissing {
            response: response.chars().take(200).collect(),
        })),
    }
}

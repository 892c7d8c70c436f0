//! 评审任务提示词配置
//!
//! 对应 crew 配置文件的 Rust 表达：每个任务由 system / description /
//! expected_output 三段组成，description 中的 `{work_id}` / `{episode_id}`
//! 占位符在运行时替换

use serde::{Deserialize, Serialize};

/// 单个任务的提示词模板
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPrompt {
    /// 系统消息（角色设定）
    pub system: String,
    /// 任务描述（可包含 {work_id} / {episode_id} 占位符）
    pub description: String,
    /// 期望的输出格式说明
    pub expected_output: String,
}

impl TaskPrompt {
    /// 渲染任务描述，替换占位符
    pub fn render(&self, work_id: &str, episode_id: &str) -> String {
        self.description
            .replace("{work_id}", work_id)
            .replace("{episode_id}", episode_id)
    }
}

/// 全部任务的提示词配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// 单话评审任务
    pub reviewer: TaskPrompt,
    /// 全话总评任务
    pub aggregator: TaskPrompt,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            reviewer: TaskPrompt {
                system: "あなたは小説の文章品質を専門に評価するレビュアーです。\
                         ワードサラダ（意味の通らない単語の羅列）、理解不能な表現、\
                         不自然な文の流れを見抜くことが得意です。\
                         必ず指定されたJSON形式のみで回答してください。"
                    .to_string(),
                description: "カクヨム作品 {work_id} のエピソード {episode_id} の本文を読み、\
                              文章破綻（ワードサラダ）の有無を判定してください。\
                              判定は「問題なし」「要注意」「文章破綻」のいずれかです。\
                              理由を最低1件、証拠となる原文抜粋を最大3件（各50文字以内）挙げてください。"
                    .to_string(),
                expected_output: r#"以下の形式のJSONオブジェクトのみを出力してください:
{
  "verdict": "問題なし | 要注意 | 文章破綻",
  "reasons": ["判定理由（最低1件）"],
  "metrics": {
    "global_incoherence": 0,
    "unreadable_expressions": 0,
    "unnatural_flow": 0
  },
  "evidence": [
    {"span": "原文抜粋（50文字以内）", "explanation": "問題点の簡潔な説明"}
  ],
  "confidence": 0.0
}
metricsの各値は0〜5の整数、confidenceは0〜1の小数です。"#
                    .to_string(),
            },
            aggregator: TaskPrompt {
                system: "あなたは小説レビューの編集者です。\
                         各エピソードの判定結果を俯瞰し、作品全体の文章品質について\
                         簡潔な総評を書くことが得意です。"
                    .to_string(),
                description: "カクヨム作品 {work_id} の各エピソードの判定結果（JSON）を読み、\
                              作品全体の文章品質についての総評を日本語で書いてください。\
                              特に文章破綻が疑われるエピソードがあれば指摘してください。"
                    .to_string(),
                expected_output: "日本語の簡潔な総評テキスト（箇条書き可、JSONは不要）".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_placeholders() {
        let prompt = TaskPrompt {
            system: "sys".to_string(),
            description: "作品 {work_id} の {episode_id} を評価".to_string(),
            expected_output: "json".to_string(),
        };

        let rendered = prompt.render("9999", "123");
        assert_eq!(rendered, "作品 9999 の 123 を評価");
    }

    #[test]
    fn test_default_prompts_have_placeholders() {
        let config = PromptConfig::default();
        assert!(config.reviewer.description.contains("{work_id}"));
        assert!(config.reviewer.description.contains("{episode_id}"));
        assert!(config.aggregator.description.contains("{work_id}"));
    }
}

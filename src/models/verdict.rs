//! 判定结果数据模型
//!
//! LLM 每评审一话必须返回符合此结构的 JSON，
//! `validate` 负责把 0-5 评分、理由非空等约束显式检查出来。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, VerdictError};

/// 单项评分上限
pub const MAX_SCORE: u8 = 5;
/// 证据条数上限
pub const MAX_EVIDENCE: usize = 3;
/// 证据原文抜粋的最大字符数
pub const MAX_SPAN_CHARS: usize = 50;

/// 判定分类枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictCategory {
    /// 問題なし
    #[serde(rename = "問題なし")]
    NoIssue,
    /// 要注意
    #[serde(rename = "要注意")]
    Caution,
    /// 文章破綻
    #[serde(rename = "文章破綻")]
    BrokenText,
}

impl VerdictCategory {
    /// 获取判定标签（日文原文）
    pub fn label(self) -> &'static str {
        match self {
            VerdictCategory::NoIssue => "問題なし",
            VerdictCategory::Caution => "要注意",
            VerdictCategory::BrokenText => "文章破綻",
        }
    }

    /// 获取显示用表情符号
    pub fn emoji(self) -> &'static str {
        match self {
            VerdictCategory::NoIssue => "✅",
            VerdictCategory::Caution => "⚠️",
            VerdictCategory::BrokenText => "❌",
        }
    }

    /// 获取严重度（数字越大越严重）
    pub fn severity(self) -> u8 {
        match self {
            VerdictCategory::NoIssue => 0,
            VerdictCategory::Caution => 1,
            VerdictCategory::BrokenText => 2,
        }
    }

    /// 从判定标签解析分类
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "問題なし" => Some(VerdictCategory::NoIssue),
            "要注意" => Some(VerdictCategory::Caution),
            "文章破綻" => Some(VerdictCategory::BrokenText),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerdictCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 三项细分评分（0〜5 的整数）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    /// 全体的无意义性
    pub global_incoherence: u8,
    /// 理解不能表达的多寡
    pub unreadable_expressions: u8,
    /// 文章流畅度的不自然程度
    pub unnatural_flow: u8,
}

impl Metrics {
    fn check(&self) -> AppResult<()> {
        for (metric, value) in [
            ("global_incoherence", self.global_incoherence),
            ("unreadable_expressions", self.unreadable_expressions),
            ("unnatural_flow", self.unnatural_flow),
        ] {
            if value > MAX_SCORE {
                return Err(AppError::Verdict(VerdictError::ScoreOutOfRange {
                    metric,
                    value,
                }));
            }
        }
        Ok(())
    }
}

/// 证据条目（原文抜粋 + 问题说明）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// 原文抜粋（最多 50 字）
    pub span: String,
    /// 问题点的简要说明
    pub explanation: String,
}

/// 单话判定结果
///
/// LLM 产出后即为不可变数据，只读地流经编排层和展示层
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeVerdict {
    /// 作品ID（解析后由上下文强制覆盖，不信任模型输出）
    #[serde(default)]
    pub work_id: String,
    /// 话数ID
    #[serde(default)]
    pub episode_id: String,
    /// 判定分类
    pub verdict: VerdictCategory,
    /// 判定理由（至少 1 条）
    pub reasons: Vec<String>,
    /// 三项细分评分
    pub metrics: Metrics,
    /// 证据列表（最多 3 条）
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    /// 评估时间（ISO 8601）
    #[serde(default = "Utc::now")]
    pub evaluated_at: DateTime<Utc>,
    /// 判定置信度（0〜1）
    pub confidence: f64,
}

impl EpisodeVerdict {
    /// 校验判定结果是否满足所有约束
    ///
    /// 对应的约束：
    /// - 各项评分在 0〜5 之间
    /// - 理由至少 1 条
    /// - 证据最多 3 条，且原文抜粋不超过 50 字
    /// - 置信度在 0〜1 之间
    pub fn validate(&self) -> AppResult<()> {
        self.metrics.check()?;

        if self.reasons.is_empty() {
            return Err(AppError::Verdict(VerdictError::EmptyReasons));
        }

        if self.evidence.len() > MAX_EVIDENCE {
            return Err(AppError::Verdict(VerdictError::TooManyEvidence {
                count: self.evidence.len(),
                max: MAX_EVIDENCE,
            }));
        }

        for item in &self.evidence {
            let chars = item.span.chars().count();
            if chars > MAX_SPAN_CHARS {
                return Err(AppError::Verdict(VerdictError::SpanTooLong {
                    chars,
                    max: MAX_SPAN_CHARS,
                }));
            }
        }

        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(AppError::Verdict(VerdictError::ConfidenceOutOfRange {
                value: self.confidence,
            }));
        }

        Ok(())
    }

    /// 获取第一条理由（用于单行显示）
    pub fn primary_reason(&self) -> &str {
        self.reasons.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_verdict() -> EpisodeVerdict {
        EpisodeVerdict {
            work_id: "16817330652495155185".to_string(),
            episode_id: "123".to_string(),
            verdict: VerdictCategory::NoIssue,
            reasons: vec!["文の流れが自然で意味が通っている".to_string()],
            metrics: Metrics {
                global_incoherence: 0,
                unreadable_expressions: 1,
                unnatural_flow: 0,
            },
            evidence: vec![],
            evaluated_at: Utc::now(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_valid_verdict_passes() {
        assert!(sample_verdict().validate().is_ok());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut v = sample_verdict();
        v.metrics.unnatural_flow = 6;
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_empty_reasons_rejected() {
        let mut v = sample_verdict();
        v.reasons.clear();
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_too_many_evidence_rejected() {
        let mut v = sample_verdict();
        v.evidence = (0..4)
            .map(|i| EvidenceItem {
                span: format!("抜粋{}", i),
                explanation: "説明".to_string(),
            })
            .collect();
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_span_too_long_rejected() {
        let mut v = sample_verdict();
        v.evidence = vec![EvidenceItem {
            span: "あ".repeat(51),
            explanation: "長すぎる".to_string(),
        }];
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        let mut v = sample_verdict();
        v.confidence = 1.5;
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&VerdictCategory::BrokenText).unwrap();
        assert_eq!(json, "\"文章破綻\"");

        let parsed: VerdictCategory = serde_json::from_str("\"要注意\"").unwrap();
        assert_eq!(parsed, VerdictCategory::Caution);
    }

    #[test]
    fn test_severity_order() {
        assert!(VerdictCategory::BrokenText.severity() > VerdictCategory::Caution.severity());
        assert!(VerdictCategory::Caution.severity() > VerdictCategory::NoIssue.severity());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        // 模型偷懒省略 work_id / episode_id / evaluated_at 时也能解析
        let json = r#"{
            "verdict": "問題なし",
            "reasons": ["自然な文章"],
            "metrics": {
                "global_incoherence": 0,
                "unreadable_expressions": 0,
                "unnatural_flow": 0
            },
            "confidence": 0.8
        }"#;
        let v: EpisodeVerdict = serde_json::from_str(json).unwrap();
        assert!(v.work_id.is_empty());
        assert_eq!(v.verdict, VerdictCategory::NoIssue);
        assert!(v.validate().is_ok());
    }
}

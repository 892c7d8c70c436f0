//! 结果展示服务 - 业务能力层
//!
//! 只负责"汇总统计与展示"能力，不关心流程

use tracing::{info, warn};

use crate::models::verdict::{EpisodeVerdict, VerdictCategory};

/// 按判定分类的计数
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerdictTally {
    /// 問題なし
    pub no_issue: usize,
    /// 要注意
    pub caution: usize,
    /// 文章破綻
    pub broken_text: usize,
    /// 校验不通过、被拒绝计数的判定
    pub rejected: usize,
}

impl VerdictTally {
    /// 从判定列表汇总计数
    ///
    /// 校验不通过的判定记入 rejected，绝不参与分类计数
    pub fn from_verdicts(verdicts: &[EpisodeVerdict]) -> Self {
        let mut tally = Self::default();

        for verdict in verdicts {
            if let Err(e) = verdict.validate() {
                warn!(
                    "话数 {} 的判定未通过校验，不计入统计: {}",
                    verdict.episode_id, e
                );
                tally.rejected += 1;
                continue;
            }

            match verdict.verdict {
                VerdictCategory::NoIssue => tally.no_issue += 1,
                VerdictCategory::Caution => tally.caution += 1,
                VerdictCategory::BrokenText => tally.broken_text += 1,
            }
        }

        tally
    }

    /// 参与统计的判定总数
    pub fn counted(&self) -> usize {
        self.no_issue + self.caution + self.broken_text
    }

    /// 指定分类的占比（百分数，总数为 0 时返回 0.0）
    pub fn percentage(&self, category: VerdictCategory) -> f64 {
        let total = self.counted();
        if total == 0 {
            return 0.0;
        }
        let count = match category {
            VerdictCategory::NoIssue => self.no_issue,
            VerdictCategory::Caution => self.caution,
            VerdictCategory::BrokenText => self.broken_text,
        };
        count as f64 / total as f64 * 100.0
    }

    /// 综合评估：取出现过的最高严重度分类
    pub fn overall(&self) -> Option<VerdictCategory> {
        if self.broken_text > 0 {
            Some(VerdictCategory::BrokenText)
        } else if self.caution > 0 {
            Some(VerdictCategory::Caution)
        } else if self.no_issue > 0 {
            Some(VerdictCategory::NoIssue)
        } else {
            None
        }
    }
}

/// 结果展示服务
///
/// 职责：
/// - 按判定分类统计数量和占比
/// - 打印人类可读的评审报告
/// - 只消费判定列表，不发起任何网络调用
pub struct ReportPresenter;

impl ReportPresenter {
    /// 打印完整的评审报告
    ///
    /// # 参数
    /// - `work_id`: 作品ID
    /// - `verdicts`: 全部单话判定结果（按话数顺序）
    /// - `skipped`: 评审失败被跳过的话数
    /// - `summary`: LLM 总评（可选）
    pub fn print_report(
        work_id: &str,
        verdicts: &[EpisodeVerdict],
        skipped: usize,
        summary: Option<&str>,
    ) {
        info!("\n{}", "=".repeat(60));
        info!("📊 文章品質チェック結果 - 作品 {}", work_id);
        info!("{}", "=".repeat(60));

        // 逐话明细
        for (i, verdict) in verdicts.iter().enumerate() {
            info!("\n{} エピソード {}", verdict.verdict.emoji(), i + 1);
            info!("   ID: {}", verdict.episode_id);
            info!("   判定: {}", verdict.verdict);
            info!("   理由: {}", verdict.primary_reason());
            info!(
                "   指標: 無意味性 {} / 理解不能 {} / 不自然さ {} (置信度 {:.2})",
                verdict.metrics.global_incoherence,
                verdict.metrics.unreadable_expressions,
                verdict.metrics.unnatural_flow,
                verdict.confidence
            );
        }

        // 汇总
        let tally = VerdictTally::from_verdicts(verdicts);
        let total = tally.counted();

        info!("\n{}", "-".repeat(60));
        info!("📋 総合結果");
        info!("{}", "-".repeat(60));
        info!(
            "✅ 問題なし:   {:2}/{} ({:.1}%)",
            tally.no_issue,
            total,
            tally.percentage(VerdictCategory::NoIssue)
        );
        info!(
            "⚠️  要注意:     {:2}/{} ({:.1}%)",
            tally.caution,
            total,
            tally.percentage(VerdictCategory::Caution)
        );
        info!(
            "❌ 文章破綻:   {:2}/{} ({:.1}%)",
            tally.broken_text,
            total,
            tally.percentage(VerdictCategory::BrokenText)
        );

        if tally.rejected > 0 {
            info!("🚫 校验不通过: {}", tally.rejected);
        }
        if skipped > 0 {
            info!("⏭️  评审失败跳过: {}", skipped);
        }

        info!("{}", "=".repeat(60));

        // 综合评估（按最高严重度升级）
        match tally.overall() {
            Some(VerdictCategory::BrokenText) => {
                info!("🚨 注意: 文章破綻が検出されました。確認が必要です。");
            }
            Some(VerdictCategory::Caution) => {
                info!("⚠️  要注意エピソードがあります。目視確認を推奨します。");
            }
            Some(VerdictCategory::NoIssue) => {
                info!("🎉 すべてのエピソードで問題は検出されませんでした。");
            }
            None => {
                warn!("⚠️ 没有可统计的判定结果");
            }
        }

        // LLM 总评
        if let Some(text) = summary {
            info!("\n{}", "-".repeat(60));
            info!("📝 総評");
            info!("{}", "-".repeat(60));
            for line in text.lines() {
                info!("{}", line);
            }
        }

        info!("{}", "=".repeat(60));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::verdict::Metrics;
    use chrono::Utc;

    fn verdict_with(category: VerdictCategory) -> EpisodeVerdict {
        EpisodeVerdict {
            work_id: "1".to_string(),
            episode_id: "100".to_string(),
            verdict: category,
            reasons: vec!["理由".to_string()],
            metrics: Metrics {
                global_incoherence: 0,
                unreadable_expressions: 0,
                unnatural_flow: 0,
            },
            evidence: vec![],
            evaluated_at: Utc::now(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_tally_one_of_each() {
        let verdicts = vec![
            verdict_with(VerdictCategory::NoIssue),
            verdict_with(VerdictCategory::Caution),
            verdict_with(VerdictCategory::BrokenText),
        ];

        let tally = VerdictTally::from_verdicts(&verdicts);

        assert_eq!(tally.no_issue, 1);
        assert_eq!(tally.caution, 1);
        assert_eq!(tally.broken_text, 1);
        assert_eq!(tally.rejected, 0);
        // 综合评估必须反映最高严重度
        assert_eq!(tally.overall(), Some(VerdictCategory::BrokenText));
    }

    #[test]
    fn test_tally_rejects_invalid_verdict() {
        let mut invalid = verdict_with(VerdictCategory::BrokenText);
        invalid.metrics.global_incoherence = 6;

        let mut no_reasons = verdict_with(VerdictCategory::Caution);
        no_reasons.reasons.clear();

        let verdicts = vec![
            verdict_with(VerdictCategory::NoIssue),
            invalid,
            no_reasons,
        ];

        let tally = VerdictTally::from_verdicts(&verdicts);

        assert_eq!(tally.counted(), 1);
        assert_eq!(tally.rejected, 2);
        // 被拒绝的"文章破綻"不得影响综合评估
        assert_eq!(tally.overall(), Some(VerdictCategory::NoIssue));
    }

    #[test]
    fn test_overall_escalates_to_caution() {
        let verdicts = vec![
            verdict_with(VerdictCategory::NoIssue),
            verdict_with(VerdictCategory::Caution),
        ];

        let tally = VerdictTally::from_verdicts(&verdicts);
        assert_eq!(tally.overall(), Some(VerdictCategory::Caution));
    }

    #[test]
    fn test_empty_tally() {
        let tally = VerdictTally::from_verdicts(&[]);
        assert_eq!(tally.counted(), 0);
        assert_eq!(tally.overall(), None);
        assert_eq!(tally.percentage(VerdictCategory::NoIssue), 0.0);
    }

    #[test]
    fn test_percentages() {
        let verdicts = vec![
            verdict_with(VerdictCategory::NoIssue),
            verdict_with(VerdictCategory::NoIssue),
            verdict_with(VerdictCategory::Caution),
            verdict_with(VerdictCategory::BrokenText),
        ];

        let tally = VerdictTally::from_verdicts(&verdicts);
        assert!((tally.percentage(VerdictCategory::NoIssue) - 50.0).abs() < f64::EPSILON);
        assert!((tally.percentage(VerdictCategory::Caution) - 25.0).abs() < f64::EPSILON);
    }
}

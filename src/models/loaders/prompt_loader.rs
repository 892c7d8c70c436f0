use crate::models::prompt::PromptConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载提示词配置
///
/// 文件不存在时回退到内置默认提示词（保证零配置也能运行）
pub async fn load_prompt_config(path: &str) -> Result<PromptConfig> {
    if !Path::new(path).exists() {
        tracing::info!("未找到提示词配置 {}，使用内置默认值", path);
        return Ok(PromptConfig::default());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取提示词配置: {}", path))?;

    let config: PromptConfig =
        toml::from_str(&content).with_context(|| format!("无法解析提示词配置: {}", path))?;

    tracing::info!("已加载提示词配置: {}", path);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt_toml() {
        let toml_str = r#"
[reviewer]
system = "レビュアー"
description = "作品 {work_id} のエピソード {episode_id} を判定"
expected_output = "JSON"

[aggregator]
system = "編集者"
description = "作品 {work_id} の総評"
expected_output = "テキスト"
"#;
        let config: PromptConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reviewer.system, "レビュアー");
        assert_eq!(
            config.reviewer.render("1", "2"),
            "作品 1 のエピソード 2 を判定"
        );
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_default() {
        let config = load_prompt_config("no_such_prompts_file.toml")
            .await
            .unwrap();
        assert!(config.reviewer.description.contains("{episode_id}"));
    }
}

//! カクヨム站点接口模块
//!
//! 负责所有与 kakuyomu.jp 的交互：抓取作品页面、解析 `__NEXT_DATA__`
//! 内嵌状态、提取话数列表、抓取单话正文

use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult, ParseError};

/// 话数键的前缀（Apollo 状态中形如 "Episode:123"）
const EPISODE_KEY_PREFIX: &str = "Episode:";

/// 抓取用的 User-Agent（伪装成桌面浏览器）
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/138.0.0.0 Safari/537.36";

/// 抓取作品页面 HTML
///
/// # 参数
/// - `client`: HTTP 客户端
/// - `base_url`: 站点基础 URL
/// - `work_id`: 作品ID
///
/// # 返回
/// 返回页面 HTML 文本；非 2xx 状态码视为抓取错误
pub async fn fetch_work_page(client: &Client, base_url: &str, work_id: &str) -> AppResult<String> {
    let url = format!("{}/works/{}", base_url, work_id);
    fetch_page(client, &url).await
}

/// 抓取单话页面 HTML
pub async fn fetch_episode_page(
    client: &Client,
    base_url: &str,
    work_id: &str,
    episode_id: &str,
) -> AppResult<String> {
    let url = format!("{}/works/{}/episodes/{}", base_url, work_id, episode_id);
    fetch_page(client, &url).await
}

/// 通用页面抓取
async fn fetch_page(client: &Client, url: &str) -> AppResult<String> {
    debug!("抓取页面: {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| AppError::fetch_failed(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::bad_status(url, status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::fetch_failed(url, e))
}

/// 从页面 HTML 中提取 `__NEXT_DATA__` 脚本标签并解析为 JSON
///
/// 标签缺失是解析错误，绝不能静默返回空数据
pub fn extract_next_data(html: &str) -> AppResult<Value> {
    let re = Regex::new(r#"(?s)<script[^>]*id="__NEXT_DATA__"[^>]*>(.*?)</script>"#)
        .map_err(|e| AppError::Other(format!("构建 __NEXT_DATA__ 正则失败: {}", e)))?;

    let caps = re
        .captures(html)
        .ok_or(AppError::Parse(ParseError::NextDataMissing))?;

    let json_text = caps[1].trim();
    let data: Value = serde_json::from_str(json_text)?;

    Ok(data)
}

/// 从 `__NEXT_DATA__` 中取出 Apollo 状态映射
///
/// 路径为 `props.pageProps.__APOLLO_STATE__`
pub fn apollo_state(next_data: &Value) -> AppResult<&Map<String, Value>> {
    next_data
        .pointer("/props/pageProps/__APOLLO_STATE__")
        .and_then(Value::as_object)
        .ok_or(AppError::Parse(ParseError::ApolloStateMissing))
}

/// 从 Apollo 状态中筛选话数ID
///
/// 过滤 "Episode:" 前缀的键，去掉前缀，保持页面中的出现顺序，
/// 截断到前 `limit` 个
pub fn filter_episode_ids(state: &Map<String, Value>, limit: usize) -> Vec<String> {
    state
        .keys()
        .filter_map(|key| key.strip_prefix(EPISODE_KEY_PREFIX))
        .map(str::to_string)
        .take(limit)
        .collect()
}

/// 获取作品的话数ID列表
///
/// # 参数
/// - `client`: HTTP 客户端
/// - `base_url`: 站点基础 URL
/// - `work_id`: 作品ID
/// - `limit`: 最多返回的话数
///
/// # 返回
/// 返回按页面出现顺序排列的话数ID列表；抓取和解析错误记录日志后重新抛出
pub async fn list_episodes(
    client: &Client,
    base_url: &str,
    work_id: &str,
    limit: usize,
) -> AppResult<Vec<String>> {
    let result: AppResult<Vec<String>> = async {
        let html = fetch_work_page(client, base_url, work_id).await?;
        let next_data = extract_next_data(&html)?;
        let state = apollo_state(&next_data)?;
        Ok(filter_episode_ids(state, limit))
    }
    .await;

    match &result {
        Ok(episodes) => {
            info!("✓ 作品 {} 共发现 {} 话（上限 {}）", work_id, episodes.len(), limit);
        }
        Err(e) => {
            error!("获取作品 {} 的话数列表失败: {}", work_id, e);
        }
    }

    result
}

/// 抓取单话正文（纯文本）
///
/// 提取 `widget-episodeBody` 区块并剥离 HTML 标签；
/// 区块缺失视为解析错误
pub async fn fetch_episode_body(
    client: &Client,
    base_url: &str,
    work_id: &str,
    episode_id: &str,
) -> AppResult<String> {
    let html = fetch_episode_page(client, base_url, work_id, episode_id).await?;

    let re = Regex::new(r#"(?s)<div[^>]*class="widget-episodeBody[^"]*"[^>]*>(.*?)</div>"#)
        .map_err(|e| AppError::Other(format!("构建正文正则失败: {}", e)))?;

    let caps = re.captures(&html).ok_or_else(|| {
        AppError::Parse(ParseError::EpisodeBodyMissing {
            episode_id: episode_id.to_string(),
        })
    })?;

    let body = strip_html(&caps[1]);

    debug!("话数 {} 正文长度: {} 字符", episode_id, body.chars().count());

    Ok(body)
}

/// 剥离 HTML 标签，保留段落换行
fn strip_html(html: &str) -> String {
    // <br> 和 </p> 转换为换行，其余标签直接去掉
    let text = html.replace("<br>", "\n").replace("<br/>", "\n").replace("<br />", "\n");
    let text = text.replace("</p>", "\n");

    let text = match Regex::new(r"<[^>]+>") {
        Ok(re) => re.replace_all(&text, "").into_owned(),
        Err(_) => text,
    };

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造包含 Apollo 状态的测试页面
    fn sample_work_page() -> String {
        r#"<html><head>
<script id="__NEXT_DATA__" type="application/json">{
  "props": {
    "pageProps": {
      "__APOLLO_STATE__": {
        "Episode:123": {"id": "123", "title": "第一話"},
        "Episode:456": {"id": "456", "title": "第二話"},
        "Work:1": {"id": "1", "title": "作品"}
      }
    }
  }
}</script>
</head><body></body></html>"#
            .to_string()
    }

    #[test]
    fn test_filter_episode_ids_preserves_order() {
        let html = sample_work_page();
        let next_data = extract_next_data(&html).unwrap();
        let state = apollo_state(&next_data).unwrap();

        let episodes = filter_episode_ids(state, 20);
        assert_eq!(episodes, vec!["123".to_string(), "456".to_string()]);
    }

    #[test]
    fn test_filter_episode_ids_respects_limit() {
        let html = sample_work_page();
        let next_data = extract_next_data(&html).unwrap();
        let state = apollo_state(&next_data).unwrap();

        let episodes = filter_episode_ids(state, 1);
        assert_eq!(episodes, vec!["123".to_string()]);
    }

    #[test]
    fn test_missing_next_data_is_parse_error() {
        let html = "<html><body>何もないページ</body></html>";
        let result = extract_next_data(html);

        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::NextDataMissing))
        ));
    }

    #[test]
    fn test_missing_apollo_state_is_parse_error() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">{"props":{}}</script>"#;
        let next_data = extract_next_data(html).unwrap();
        let result = apollo_state(&next_data);

        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::ApolloStateMissing))
        ));
    }

    #[test]
    fn test_invalid_next_data_json_is_parse_error() {
        let html = r#"<script id="__NEXT_DATA__" type="application/json">{壊れたJSON</script>"#;
        let result = extract_next_data(html);

        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_strip_html_keeps_paragraphs() {
        let html = r#"<p id="p1">　吾輩は猫である。</p><p id="p2">名前はまだ無い。<br/>どこで生れたか</p>"#;
        let text = strip_html(html);

        assert_eq!(text, "　吾輩は猫である。\n名前はまだ無い。\nどこで生れたか");
    }

    #[test]
    fn test_strip_html_decodes_entities() {
        assert_eq!(strip_html("A &amp; B &lt;C&gt;"), "A & B <C>");
    }
}

use kakuyomu_wordsalad::api::kakuyomu;
use kakuyomu_wordsalad::config::Config;
use kakuyomu_wordsalad::models::{load_prompt_config, EpisodeRef};
use kakuyomu_wordsalad::services::LlmService;
use kakuyomu_wordsalad::utils::logging;
use kakuyomu_wordsalad::App;

/// 测试用的真实作品ID（近畿地方のある場所について）
const TEST_WORK_ID: &str = "16817330652495155185";

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_list_episodes() {
    // 初始化日志
    logging::init();

    let config = Config::from_env();
    let client = reqwest::Client::new();

    let episodes = kakuyomu::list_episodes(&client, &config.kakuyomu_base_url, TEST_WORK_ID, 5)
        .await
        .expect("获取话数列表失败");

    println!("episodes: {:?}", episodes);
    assert!(!episodes.is_empty(), "应该至少发现一话");
    assert!(episodes.len() <= 5, "话数不应超过上限");
}

#[tokio::test]
#[ignore]
async fn test_fetch_episode_body() {
    logging::init();

    let config = Config::from_env();
    let client = reqwest::Client::new();

    let episodes = kakuyomu::list_episodes(&client, &config.kakuyomu_base_url, TEST_WORK_ID, 1)
        .await
        .expect("获取话数列表失败");
    let episode_id = episodes.first().expect("没有发现任何话数");

    let body = kakuyomu::fetch_episode_body(
        &client,
        &config.kakuyomu_base_url,
        TEST_WORK_ID,
        episode_id,
    )
    .await
    .expect("抓取正文失败");

    println!("正文长度: {} 字符", body.chars().count());
    assert!(!body.is_empty(), "正文不应为空");
    assert!(!body.contains('<'), "正文不应残留 HTML 标签");
}

/// 测试单话评审（需要真实 LLM API）
///
/// 运行方式：
/// ```bash
/// LLM_API_KEY=... cargo test test_judge_episode -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore]
async fn test_judge_episode() {
    logging::init();

    let config = Config::from_env();
    let client = reqwest::Client::new();
    let service = LlmService::new(&config);
    let prompts = load_prompt_config(&config.prompts_file)
        .await
        .expect("加载提示词配置失败");

    let episodes = kakuyomu::list_episodes(&client, &config.kakuyomu_base_url, TEST_WORK_ID, 1)
        .await
        .expect("获取话数列表失败");
    let episode_id = episodes.first().expect("没有发现任何话数");

    let body = kakuyomu::fetch_episode_body(
        &client,
        &config.kakuyomu_base_url,
        TEST_WORK_ID,
        episode_id,
    )
    .await
    .expect("抓取正文失败");

    let episode = EpisodeRef::new(TEST_WORK_ID, episode_id.clone());
    let verdict = service
        .judge_episode(&episode, &body, &prompts)
        .await
        .expect("评审失败");

    println!("判定: {} / 理由: {:?}", verdict.verdict, verdict.reasons);
    assert_eq!(verdict.work_id, TEST_WORK_ID);
    assert_eq!(&verdict.episode_id, episode_id);
    assert!(verdict.validate().is_ok());
}

/// 端到端测试：从作品ID到评审报告
#[tokio::test]
#[ignore]
async fn test_full_pipeline() {
    logging::init();

    let mut config = Config::from_env();
    config.work_id = TEST_WORK_ID.to_string();
    config.episode_limit = 2;

    let app = App::initialize(config).await.expect("应用初始化失败");

    app.run().await.expect("评审流程应该成功");
}

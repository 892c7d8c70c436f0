/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// カクヨム站点基础 URL
    pub kakuyomu_base_url: String,
    /// 作品ID（为空则启动时通过标准输入询问）
    pub work_id: String,
    /// 最多评审的话数
    pub episode_limit: usize,
    /// 同时评审的话数（1 为顺序模式）
    pub max_concurrent_episodes: usize,
    /// 提示词配置文件路径（不存在时使用内置默认值）
    pub prompts_file: String,
    /// 是否显示详细日志（正文预览等）
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kakuyomu_base_url: "https://kakuyomu.jp".to_string(),
            work_id: String::new(),
            episode_limit: 10,
            max_concurrent_episodes: 1,
            prompts_file: "prompts.toml".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            kakuyomu_base_url: std::env::var("KAKUYOMU_BASE_URL").unwrap_or(default.kakuyomu_base_url),
            work_id: std::env::var("WORK_ID").unwrap_or(default.work_id),
            episode_limit: std::env::var("EPISODE_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.episode_limit),
            max_concurrent_episodes: std::env::var("MAX_CONCURRENT_EPISODES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_episodes),
            prompts_file: std::env::var("PROMPTS_FILE").unwrap_or(default.prompts_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}

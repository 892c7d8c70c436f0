use anyhow::Result;
use kakuyomu_wordsalad::app::App;
use kakuyomu_wordsalad::config::Config;
use kakuyomu_wordsalad::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}

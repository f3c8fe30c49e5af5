use anyhow::{Context, Result};

use take_exam_submit::utils::logging;
use take_exam_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 试卷ID来自命令行参数
    let paper_id = std::env::args()
        .nth(1)
        .context("用法: take_exam_submit <试卷ID>")?;

    // 初始化并运行一场考试
    let _result = App::initialize(config).await?.run(&paper_id).await?;

    Ok(())
}

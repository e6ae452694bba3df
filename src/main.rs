use anyhow::{Context, Result};
use clap::Parser;
use page_capture::cli::Cli;
use page_capture::utils::logging;
use page_capture::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::try_from_env().context("读取环境变量配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    App::new(config)
        .run(&cli.toc, &cli.dest_folder)
        .await
        .with_context(|| format!("处理目录文件 {} 失败", cli.toc.display()))?;

    Ok(())
}

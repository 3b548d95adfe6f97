//! 加载模型注册表配置，把所有模型绑定到 headless 上下文上，输出统计信息
//!
//! 用法：`model-info [config.toml]`，默认使用 `resources/models.toml`

use anyhow::Context;
use std::path::PathBuf;
use vesta_app::model_report::LibraryReport;
use vesta_crate_tools::init_log::init_log;
use vesta_crate_tools::resource::VestaPath;
use vesta_scene::config::ModelLibraryConfig;
use vesta_scene::model_library::ModelLibrary;

fn main() -> anyhow::Result<()> {
    init_log();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| VestaPath::resources_path("models.toml"));
    let config = ModelLibraryConfig::from_file(&config_path)
        .with_context(|| format!("failed to load model library config: {:?}", config_path))?;

    let mut library = ModelLibrary::new();
    let loaded_cnt = library.load_from_config(&config).context("failed to load model library")?;
    log::info!("{} models registered from {:?}", loaded_cnt, config_path);

    let report = LibraryReport::build(&library).context("failed to bind models")?;
    for model in &report.models {
        println!("{model}");
    }
    println!(
        "{} models, {} draw calls, {} allocations, {} releases, {} live",
        report.models.len(),
        report.draw_cnt,
        report.stats.allocations,
        report.stats.releases,
        report.stats.live()
    );

    Ok(())
}

// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use deptpages::application::usecases::check_links::LinkCheckUseCase;
use deptpages::application::usecases::scrape_activities::ScrapeActivitiesUseCase;
use deptpages::config::settings::Settings;
use deptpages::engines::reqwest_engine::ReqwestEngine;
use deptpages::engines::traits::HttpEngine;
use deptpages::utils::telemetry;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "deptpages",
    about = "Markdown link checker and department activity table scraper",
    version
)]
struct Cli {
    /// Additional configuration file (layered over config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report unreachable links in the *.md files of a directory
    CheckLinks {
        /// Directory to scan (defaults to link_checker.directory)
        dir: Option<PathBuf>,
    },
    /// Scrape activity tables and write one markdown file per category
    Scrape {
        /// Directory for the generated files (defaults to scraper.output_dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

/// 主函数
///
/// 解析命令行、加载配置并执行对应的子命令
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    telemetry::init_telemetry(cli.verbose);

    // 2. Load configuration
    let settings = Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    info!("Configuration loaded");

    // 3. Build the HTTP engine
    let engine: Arc<dyn HttpEngine> = Arc::new(ReqwestEngine::new(&settings.http)?);

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::CheckLinks { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(&settings.link_checker.directory));
            let use_case = LinkCheckUseCase::new(engine, settings.link_checker.timeout());
            use_case.check_directory(&dir, &mut stdout).await?;
        }
        Commands::Scrape { output_dir } => {
            // A length mismatch aborts before any request is made.
            let sources = settings.scraper.sources()?;
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&settings.scraper.output_dir));
            let use_case = ScrapeActivitiesUseCase::new(
                engine,
                settings.scraper.timeout(),
                settings.scraper.workers,
            );
            use_case.run(&sources, &output_dir, &mut stdout).await?;
        }
    }

    Ok(())
}

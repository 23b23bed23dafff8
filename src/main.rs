//! goscaf：Go 服务项目脚手架生成器
//! 创建固定目录布局、按模板写出文件，然后执行 `go mod tidy`。

mod cli;
mod commands;
mod config;
mod scaffold;
mod templates;
mod tidy;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    commands::run(cli)
}

/// 初始化日志：GOSCAF_LOG 优先，否则按 -q / -v 计数选择级别
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env("GOSCAF_LOG").unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("info"),
                2 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

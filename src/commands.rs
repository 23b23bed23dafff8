//! 命令调度模块：
//! - 接收解析好的 CLI 参数，与环境变量、配置文件合并为“有效设置”
//! - 依次执行 校验 -> 渲染 -> 写出 -> 依赖整理

use anyhow::{Context, Result};
use chrono::Datelike;
use std::{env, path::PathBuf};
use tracing::{debug, info};

use crate::{
    cli::Cli,
    config::{self, Overrides, Settings},
    scaffold::{self, Plan},
    templates::{render_all, TemplateVars},
    tidy::run_mod_tidy,
    utils::{env_opt_string, validate_module_name, validate_project_name},
};

/// 执行一次项目生成
pub(crate) fn run(cli: Cli) -> Result<()> {
    validate_project_name(&cli.project)?;

    // CLI 优先，其次环境变量
    let overrides = cli.overrides().or(Overrides::from_env()?);

    let cwd = env::current_dir().context("获取当前目录失败")?;
    let loaded = config::load_config(overrides.config.as_deref(), &cwd)?;
    info!("config source: {}", config::describe_source(&loaded.source));

    let system_author = env_opt_string("USER").or_else(|| env_opt_string("USERNAME"));
    let settings = Settings::resolve(&cli.project, overrides, &loaded.config, system_author);
    validate_module_name(&settings.module_name)?;
    debug!(?settings, "effective settings");

    let parent = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = parent.join(&settings.project_name);

    let year = chrono::Local::now().year();
    let vars = TemplateVars::from_settings(&settings, year);
    let plan = Plan::new(root, render_all(&vars)?);

    if cli.dry_run {
        scaffold::check_target(&plan.root, cli.force)?;
        scaffold::print_plan(&plan);
        return Ok(());
    }

    scaffold::apply(&plan, cli.force)?;

    if settings.tidy {
        run_mod_tidy(&settings.go_bin, &plan.root)?;
    } else {
        println!("ℹ️ 已跳过依赖整理，可稍后在项目目录执行: {} mod tidy", settings.go_bin);
    }
    Ok(())
}

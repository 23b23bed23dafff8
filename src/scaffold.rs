//! 脚手架写出模块
//! - 检查目标目录（已存在且非空时需 `--force`）
//! - 创建固定目录布局、写出渲染后的文件

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::templates::{RenderedFile, LAYOUT_DIRS};

/// 一次生成的完整计划
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    pub(crate) root: PathBuf,
    pub(crate) dirs: Vec<&'static str>,
    pub(crate) files: Vec<RenderedFile>,
}

impl Plan {
    pub(crate) fn new(root: PathBuf, files: Vec<RenderedFile>) -> Plan {
        Plan { root, dirs: LAYOUT_DIRS.to_vec(), files }
    }
}

/// 目标目录检查：是文件则报错；非空目录且未指定 force 时报错
pub(crate) fn check_target(root: &Path, force: bool) -> Result<()> {
    if !root.exists() {
        return Ok(());
    }
    if !root.is_dir() {
        bail!("目标路径已存在且不是目录: {}", root.display());
    }
    let non_empty = fs::read_dir(root)
        .with_context(|| format!("读取目录失败: {}", root.display()))?
        .next()
        .is_some();
    if non_empty && !force {
        bail!("目录 {} 已存在且非空，使用 --force 可覆盖", root.display());
    }
    if non_empty {
        eprintln!("⚠️ 目录 {} 已存在，--force 将覆盖同名文件", root.display());
    }
    Ok(())
}

/// 按计划写出目录与文件
pub(crate) fn apply(plan: &Plan, force: bool) -> Result<()> {
    check_target(&plan.root, force)?;

    fs::create_dir_all(&plan.root)
        .with_context(|| format!("创建目录失败: {}", plan.root.display()))?;
    for dir in &plan.dirs {
        let path = plan.root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("创建目录失败: {}", path.display()))?;
        println!("创建: {}/", path.display());
    }

    for f in &plan.files {
        let path = plan.root.join(f.target);
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("创建目录失败: {}", parent.display()))?;
            }
        }
        if path.exists() {
            debug!(path = %path.display(), "overwriting existing file");
        }
        fs::write(&path, f.contents.as_bytes())
            .with_context(|| format!("写入文件失败: {}", path.display()))?;
        println!("写入: {}", path.display());
    }

    info!(root = %plan.root.display(), files = plan.files.len(), "scaffold written");
    println!("✅ 项目骨架已生成: {}", plan.root.display());
    Ok(())
}

/// 仅打印计划（--dry-run），不触碰磁盘
pub(crate) fn print_plan(plan: &Plan) {
    println!("ℹ️ 预演模式，不会写入任何文件: {}", plan.root.display());
    for dir in &plan.dirs {
        println!("  目录: {}/", plan.root.join(dir).display());
    }
    for f in &plan.files {
        println!("  文件: {} ({} 字节)", plan.root.join(f.target).display(), f.contents.len());
    }
}

//! 依赖整理：在生成的项目根目录执行 `<go_bin> mod tidy`

use anyhow::{bail, Context, Result};
use std::{path::Path, process::Command};
use tracing::debug;

/// 执行 `mod tidy`，继承标准输出/错误并等待结束
pub(crate) fn run_mod_tidy(go_bin: &str, project_dir: &Path) -> Result<()> {
    println!("ℹ️ 执行: {} mod tidy (目录: {})", go_bin, project_dir.display());
    debug!(go_bin, dir = %project_dir.display(), "spawning dependency resolution");

    let status = Command::new(go_bin)
        .args(["mod", "tidy"])
        .current_dir(project_dir)
        .status()
        .with_context(|| format!("无法启动 `{}`（可使用 --no-tidy 跳过依赖整理）", go_bin))?;

    if !status.success() {
        bail!("`{} mod tidy` 执行失败: {}（已生成的文件保留）", go_bin, status);
    }
    println!("✅ 依赖整理完成");
    Ok(())
}

//! 通用辅助函数：
//! - 环境变量读取与解析
//! - 项目名 / 模块路径校验
//! - 从模块路径推导仓库 URL，从项目名推导数据库名、镜像名

use std::env;

use anyhow::{bail, Result};

/// 可选读取 String 环境变量。
pub(crate) fn env_opt_string(key: &str) -> Option<String> {
    env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 布尔文本的真值（1/true/on/yes/y），其余一律为假。
pub(crate) fn parse_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes" | "y"
    )
}

/// 校验项目名：必须是单个安全路径片段。
pub(crate) fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("项目名不能为空");
    }
    if name.trim() != name {
        bail!("项目名不能以空白开头或结尾: {:?}", name);
    }
    if name == "." || name == ".." {
        bail!("项目名不能是 `.` 或 `..`");
    }
    if name.contains('/') || name.contains('\\') {
        bail!("项目名不能包含路径分隔符: {}", name);
    }
    if name.chars().any(|c| c.is_control()) {
        bail!("项目名包含控制字符: {:?}", name);
    }
    Ok(())
}

/// 校验模块路径（写入 go.mod 的 module 行）。
pub(crate) fn validate_module_name(module: &str) -> Result<()> {
    if module.is_empty() {
        bail!("模块名不能为空");
    }
    if module.chars().any(|c| c.is_whitespace() || c.is_control()) {
        bail!("模块名不能包含空白字符: {:?}", module);
    }
    // Go 模块路径字符集：字母、数字与 `-._~/`
    if let Some(bad) = module
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '/')))
    {
        bail!("模块名包含非法字符 {:?}: {}（仅允许字母、数字与 -._~/）", bad, module);
    }
    if module.starts_with('/') || module.ends_with('/') {
        bail!("模块名不能以 `/` 开头或结尾: {}", module);
    }
    for seg in module.split('/') {
        if seg.is_empty() || seg == "." || seg == ".." {
            bail!("模块名包含非法片段 {:?}: {}", seg, module);
        }
    }
    Ok(())
}

/// 模块路径首段像主机名（含 `.`）时推导可浏览的仓库地址。
pub(crate) fn repo_url_from_module(module: &str) -> Option<String> {
    let host = module.split('/').next()?;
    if !host.contains('.') {
        return None;
    }
    let parsed = url::Url::parse(&format!("https://{}", module)).ok()?;
    parsed.host_str()?;
    Some(parsed.as_str().trim_end_matches('/').to_string())
}

/// 由项目名得到数据库名：小写，非字母数字替换为 `_`。
pub(crate) fn db_name_from_project(project: &str) -> String {
    let mut out = String::with_capacity(project.len());
    for ch in project.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() { "app".to_string() } else { trimmed.to_string() }
}

/// 由项目名得到 Docker 镜像名：小写字母数字，其余替换为 `-`。
pub(crate) fn image_name_from_project(project: &str) -> String {
    let mut out = String::with_capacity(project.len());
    for ch in project.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() { "app".to_string() } else { trimmed.to_string() }
}

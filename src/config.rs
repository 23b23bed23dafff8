//! 配置与加载模块：
//! - 定义配置文件结构 `ConfigFile`（goscaf.yaml）
//! - 提供 `load_config` 支持显式路径与当前目录自动发现
//! - 按 CLI > 环境变量 > 配置文件 > 内置默认 计算最终生效的 `Settings`

use std::{fs, path::{Path, PathBuf}};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::utils::{env_opt_string, image_name_from_project, parse_truthy};

/// 自动发现的配置文件名（按顺序）
const CONFIG_CANDIDATES: [&str; 3] = ["goscaf.yaml", "goscaf.yml", ".goscaf.yaml"];

pub(crate) const DEFAULT_GO_VERSION: &str = "1.20";
pub(crate) const DEFAULT_PORT: u16 = 8080;
pub(crate) const DEFAULT_AUTHOR: &str = "Your Name";
pub(crate) const DEFAULT_DOCKER_USER: &str = "yourusername";
pub(crate) const DEFAULT_GO_BIN: &str = "go";

/// 许可证类型
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum LicenseKind {
    #[default]
    #[serde(rename = "mit", alias = "MIT")]
    #[value(name = "mit")]
    Mit,
    #[serde(rename = "apache-2.0", alias = "Apache-2.0", alias = "apache")]
    #[value(name = "apache-2.0", alias = "apache")]
    Apache2,
}

impl LicenseKind {
    pub(crate) fn spdx_id(self) -> &'static str {
        match self {
            LicenseKind::Mit => "MIT",
            LicenseKind::Apache2 => "Apache-2.0",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            LicenseKind::Mit => "MIT License",
            LicenseKind::Apache2 => "Apache License 2.0",
        }
    }

    /// 解析环境变量等来源的文本（大小写不敏感）
    pub(crate) fn parse(s: &str) -> Option<LicenseKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mit" => Some(LicenseKind::Mit),
            "apache-2.0" | "apache2" | "apache" => Some(LicenseKind::Apache2),
            _ => None,
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    /// 作者（写入 LICENSE / README）
    #[serde(default)]
    pub(crate) author: Option<String>,
    #[serde(default)]
    pub(crate) license: Option<LicenseKind>,
    /// go.mod 与 Docker 基础镜像使用的 Go 版本
    #[serde(default)]
    pub(crate) go_version: Option<String>,
    #[serde(default)]
    pub(crate) port: Option<u16>,
    /// 模块前缀，例如 `github.com/alice`，未指定模块名时拼接为 `<prefix>/<project>`
    #[serde(default)]
    pub(crate) module_prefix: Option<String>,
    /// Makefile 中镜像名的用户部分：`<docker_user>/<project>`
    #[serde(default)]
    pub(crate) docker_user: Option<String>,
    /// 依赖整理命令使用的可执行文件
    #[serde(default)]
    pub(crate) go_bin: Option<String>,
    /// 是否在生成后执行 `go mod tidy`
    #[serde(default)]
    pub(crate) tidy: Option<bool>,
}

/// 配置来源（用于打印和调试）
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    LocalExplicit(PathBuf),
    LocalAuto(PathBuf),
    Defaults,
}

/// 加载后的配置及其来源
#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub(crate) config: ConfigFile,
    pub(crate) source: ConfigSource,
}

/// 人类可读的来源描述
pub(crate) fn describe_source(src: &ConfigSource) -> String {
    match src {
        ConfigSource::LocalExplicit(p) => format!("本地文件: {}", p.display()),
        ConfigSource::LocalAuto(p) => format!("本地文件(自动发现): {}", p.display()),
        ConfigSource::Defaults => "内置默认值（未找到配置文件）".to_string(),
    }
}

// 自动发现：在 base 目录下按顺序查找候选文件
fn resolve_local_config_path(base: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|cand| base.join(cand))
        .find(|p| p.is_file())
}

/// 加载配置：显式路径必须存在；否则在 `base` 中自动发现；都没有时返回默认值。
pub(crate) fn load_config(explicit: Option<&Path>, base: &Path) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("配置文件不存在: {}", path.display());
        }
        let config = read_config_file(path)?;
        return Ok(LoadedConfig { config, source: ConfigSource::LocalExplicit(path.to_path_buf()) });
    }
    if let Some(path) = resolve_local_config_path(base) {
        let config = read_config_file(&path)?;
        return Ok(LoadedConfig { config, source: ConfigSource::LocalAuto(path) });
    }
    debug!(base = %base.display(), "no config file found, using defaults");
    Ok(LoadedConfig { config: ConfigFile::default(), source: ConfigSource::Defaults })
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("读取配置失败: {}", path.display()))?;
    parse_config(&raw).with_context(|| format!("解析 YAML 失败: {}", path.display()))
}

pub(crate) fn parse_config(raw: &str) -> Result<ConfigFile> {
    // 空文件视为全部默认
    if raw.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}

/// 单层覆盖值（CLI 或环境变量）
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub(crate) config: Option<PathBuf>,
    pub(crate) module: Option<String>,
    pub(crate) module_prefix: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) license: Option<LicenseKind>,
    pub(crate) go_version: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) go_bin: Option<String>,
    pub(crate) no_tidy: Option<bool>,
}

impl Overrides {
    /// 读取 GOSCAF_* 环境变量；取值非法时报错并指出变量名
    pub(crate) fn from_env() -> Result<Overrides> {
        Overrides::from_vars(env_opt_string)
    }

    /// 从任意键值来源读取（`get` 返回去除首尾空白后的非空值）
    pub(crate) fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Overrides> {
        let license = match get("GOSCAF_LICENSE") {
            Some(s) => match LicenseKind::parse(&s) {
                Some(kind) => Some(kind),
                None => bail!("环境变量 GOSCAF_LICENSE 取值无效: {:?}（可选 mit / apache-2.0）", s),
            },
            None => None,
        };
        let port = match get("GOSCAF_PORT") {
            Some(s) => match s.parse::<u16>() {
                Ok(p) if p != 0 => Some(p),
                _ => bail!("环境变量 GOSCAF_PORT 取值无效: {:?}（应为 1-65535）", s),
            },
            None => None,
        };
        Ok(Overrides {
            config: get("GOSCAF_CONFIG").map(PathBuf::from),
            module: get("GOSCAF_MODULE"),
            module_prefix: get("GOSCAF_MODULE_PREFIX"),
            author: get("GOSCAF_AUTHOR"),
            license,
            go_version: get("GOSCAF_GO_VERSION"),
            port,
            go_bin: get("GOSCAF_GO_BIN"),
            no_tidy: get("GOSCAF_NO_TIDY").map(|v| parse_truthy(&v)),
        })
    }

    /// 逐字段合并：self 优先，缺失时取 fallback
    pub(crate) fn or(self, fallback: Overrides) -> Overrides {
        Overrides {
            config: self.config.or(fallback.config),
            module: self.module.or(fallback.module),
            module_prefix: self.module_prefix.or(fallback.module_prefix),
            author: self.author.or(fallback.author),
            license: self.license.or(fallback.license),
            go_version: self.go_version.or(fallback.go_version),
            port: self.port.or(fallback.port),
            go_bin: self.go_bin.or(fallback.go_bin),
            no_tidy: self.no_tidy.or(fallback.no_tidy),
        }
    }
}

/// 最终生效的设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) project_name: String,
    pub(crate) module_name: String,
    pub(crate) author: String,
    pub(crate) license: LicenseKind,
    pub(crate) go_version: String,
    pub(crate) port: u16,
    pub(crate) image: String,
    pub(crate) go_bin: String,
    pub(crate) tidy: bool,
}

impl Settings {
    /// 合并覆盖值与配置文件；`system_author` 为系统用户名（USER/USERNAME），作为作者的最后回退
    pub(crate) fn resolve(
        project_name: &str,
        overrides: Overrides,
        file: &ConfigFile,
        system_author: Option<String>,
    ) -> Settings {
        let module_prefix = overrides
            .module_prefix
            .or_else(|| file.module_prefix.clone())
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty());
        let module_name = overrides.module.unwrap_or_else(|| match module_prefix {
            Some(prefix) => format!("{}/{}", prefix, project_name),
            None => project_name.to_string(),
        });
        let author = overrides
            .author
            .or_else(|| file.author.clone())
            .or(system_author)
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        let docker_user = file
            .docker_user
            .clone()
            .unwrap_or_else(|| DEFAULT_DOCKER_USER.to_string());
        // 显式的 no_tidy（包括假值）优先于配置文件
        let tidy = match overrides.no_tidy {
            Some(no_tidy) => !no_tidy,
            None => file.tidy.unwrap_or(true),
        };

        Settings {
            project_name: project_name.to_string(),
            module_name,
            author,
            license: overrides.license.or(file.license).unwrap_or_default(),
            go_version: overrides
                .go_version
                .or_else(|| file.go_version.clone())
                .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            image: format!("{}/{}", docker_user, image_name_from_project(project_name)),
            go_bin: overrides
                .go_bin
                .or_else(|| file.go_bin.clone())
                .unwrap_or_else(|| DEFAULT_GO_BIN.to_string()),
            tidy,
        }
    }
}

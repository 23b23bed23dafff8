//! CLI 定义模块：仅负责命令行参数结构体与解析
//! 将 clap 的声明与业务逻辑解耦，参数到设置的合并在 commands 中完成。

use clap::Parser;
use std::path::PathBuf;

use crate::config::{LicenseKind, Overrides};

/// 顶层 CLI 入口
#[derive(Parser, Debug)]
#[command(name = "goscaf", about = "Go 服务项目脚手架生成器", version)]
pub(crate) struct Cli {
    /// 项目名（同时作为生成目录名）
    #[arg(value_name = "PROJECT")]
    pub(crate) project: String,
    /// go.mod 模块路径，例如 github.com/username/package（默认由模块前缀或项目名推导）
    #[arg(short, long, value_name = "MODULE")]
    pub(crate) module: Option<String>,
    /// 作者（写入 LICENSE 与 README）
    #[arg(long, value_name = "NAME")]
    pub(crate) author: Option<String>,
    /// 许可证类型
    #[arg(long, value_enum, value_name = "KIND")]
    pub(crate) license: Option<LicenseKind>,
    /// Go 版本，默认 1.20
    #[arg(long, value_name = "VER")]
    pub(crate) go_version: Option<String>,
    /// 服务端口，默认 8080
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) port: Option<u16>,
    /// 在该目录下创建项目（默认当前目录）
    #[arg(short = 'C', long, value_name = "DIR")]
    pub(crate) dir: Option<PathBuf>,
    /// 配置文件路径，默认自动发现 goscaf.yaml / goscaf.yml / .goscaf.yaml
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,
    /// 目标目录已存在且非空时强制覆盖
    #[arg(long)]
    pub(crate) force: bool,
    /// 生成后不执行 `go mod tidy`
    #[arg(long)]
    pub(crate) no_tidy: bool,
    /// 仅打印将要生成的内容，不写入磁盘
    #[arg(long)]
    pub(crate) dry_run: bool,
    /// 输出更多日志（可重复：-v / -vv / -vvv）
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub(crate) verbose: u8,
    /// 仅输出错误日志
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

impl Cli {
    /// 命令行中显式给出的覆盖值
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            module: self.module.clone(),
            module_prefix: None,
            author: self.author.clone(),
            license: self.license,
            go_version: self.go_version.clone(),
            port: self.port,
            go_bin: None,
            no_tidy: self.no_tidy.then_some(true),
        }
    }
}

//! 模板与渲染模块：
//! - 内置模板（编译期通过 include_dir 嵌入 `templates/`）
//! - 固定的目录布局与 目标路径 -> 模板 清单
//! - 基于 tera 的变量替换

use anyhow::{anyhow, Context, Result};
use include_dir::{include_dir, Dir};
use serde::Serialize;
use tera::{Context as TContext, Tera};
use tracing::{debug, trace};

use crate::{
    config::{LicenseKind, Settings},
    utils::{db_name_from_project, repo_url_from_module},
};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// 项目内固定创建的目录
pub(crate) const LAYOUT_DIRS: [&str; 6] = [
    "cmd/app",
    "internal/handler",
    "internal/service",
    "internal/repository",
    "pkg",
    "configs",
];

/// 一个待生成文件：目标相对路径与模板名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileSpec {
    pub(crate) target: &'static str,
    pub(crate) template: &'static str,
}

const fn spec(target: &'static str, template: &'static str) -> FileSpec {
    FileSpec { target, template }
}

/// 生成文件清单（顺序即写出顺序）
pub(crate) fn manifest(license: LicenseKind) -> Vec<FileSpec> {
    let license_template = match license {
        LicenseKind::Mit => "LICENSE-MIT.tera",
        LicenseKind::Apache2 => "LICENSE-APACHE.tera",
    };
    vec![
        spec("go.mod", "go.mod.tera"),
        spec("cmd/app/main.go", "main.go.tera"),
        spec("configs/config.yaml", "config.yaml.tera"),
        spec("Dockerfile", "Dockerfile.tera"),
        spec("Makefile", "Makefile.tera"),
        spec("README.md", "README.md.tera"),
        spec(".gitignore", "gitignore.tera"),
        spec("LICENSE", license_template),
    ]
}

/// 模板变量
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TemplateVars {
    pub(crate) project_name: String,
    pub(crate) module_name: String,
    pub(crate) year: i32,
    pub(crate) author: String,
    pub(crate) go_version: String,
    pub(crate) port: u16,
    pub(crate) image: String,
    pub(crate) db_name: String,
    /// main.go 输出的问候语，模板中经 json_encode 转为合法的 Go 字符串字面量
    pub(crate) greeting: String,
    pub(crate) repo_url: Option<String>,
    #[serde(skip)]
    pub(crate) license: LicenseKind,
    pub(crate) license_id: &'static str,
    pub(crate) license_name: &'static str,
}

impl TemplateVars {
    pub(crate) fn from_settings(settings: &Settings, year: i32) -> TemplateVars {
        TemplateVars {
            project_name: settings.project_name.clone(),
            module_name: settings.module_name.clone(),
            year,
            author: settings.author.clone(),
            go_version: settings.go_version.clone(),
            port: settings.port,
            image: settings.image.clone(),
            db_name: db_name_from_project(&settings.project_name),
            greeting: format!("Hello from {}!", settings.project_name),
            repo_url: repo_url_from_module(&settings.module_name),
            license: settings.license,
            license_id: settings.license.spdx_id(),
            license_name: settings.license.display_name(),
        }
    }
}

/// 渲染后的文件
#[derive(Debug, Clone)]
pub(crate) struct RenderedFile {
    pub(crate) target: &'static str,
    pub(crate) contents: String,
}

/// 读取内置模板源码
fn template_source(name: &str) -> Result<&'static str> {
    let file = TEMPLATES_DIR
        .get_file(name)
        .ok_or_else(|| anyhow!("缺少内置模板: {}", name))?;
    file.contents_utf8()
        .ok_or_else(|| anyhow!("内置模板不是 UTF-8: {}", name))
}

/// 渲染清单中的全部文件
pub(crate) fn render_all(vars: &TemplateVars) -> Result<Vec<RenderedFile>> {
    let specs = manifest(vars.license);
    let mut tera = Tera::default();
    // 生成物都不是 HTML，关闭转义
    tera.autoescape_on(vec![]);
    for s in &specs {
        let src = template_source(s.template)?;
        tera.add_raw_template(s.template, src)
            .with_context(|| format!("解析模板失败: {}", s.template))?;
    }

    let ctx = TContext::from_serialize(vars).context("构建模板上下文失败")?;
    debug!(module = %vars.module_name, year = vars.year, "rendering templates");

    let mut out = Vec::with_capacity(specs.len());
    for s in specs {
        let contents = tera
            .render(s.template, &ctx)
            .with_context(|| format!("渲染模板失败: {} -> {}", s.template, s.target))?;
        trace!(target_path = s.target, bytes = contents.len(), "rendered");
        out.push(RenderedFile { target: s.target, contents });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(license: LicenseKind, module: &str) -> TemplateVars {
        let settings = Settings {
            project_name: "orders-api".into(),
            module_name: module.into(),
            author: "Jane Doe".into(),
            license,
            go_version: "1.22".into(),
            port: 9090,
            image: "jane/orders-api".into(),
            go_bin: "go".into(),
            tidy: false,
        };
        TemplateVars::from_settings(&settings, 2031)
    }

    fn find<'a>(files: &'a [RenderedFile], target: &str) -> &'a str {
        &files.iter().find(|f| f.target == target).unwrap().contents
    }

    #[test]
    fn every_manifest_template_is_embedded() {
        for license in [LicenseKind::Mit, LicenseKind::Apache2] {
            for s in manifest(license) {
                assert!(template_source(s.template).is_ok(), "缺少 {}", s.template);
            }
        }
    }

    #[test]
    fn renders_fixed_file_set() {
        let files = render_all(&vars(LicenseKind::Mit, "github.com/jane/orders-api")).unwrap();
        let targets: Vec<&str> = files.iter().map(|f| f.target).collect();
        assert_eq!(
            targets,
            [
                "go.mod",
                "cmd/app/main.go",
                "configs/config.yaml",
                "Dockerfile",
                "Makefile",
                "README.md",
                ".gitignore",
                "LICENSE"
            ]
        );
        for f in &files {
            assert!(!f.contents.contains("{{"), "{} 仍有未替换的占位符", f.target);
        }
    }

    #[test]
    fn substitutes_variables() {
        let files = render_all(&vars(LicenseKind::Mit, "github.com/jane/orders-api")).unwrap();
        assert!(find(&files, "go.mod").starts_with("module github.com/jane/orders-api\n\ngo 1.22"));
        assert!(find(&files, "cmd/app/main.go").contains("fmt.Println(\"Hello from orders-api!\")"));
        assert!(find(&files, "configs/config.yaml").contains("port: 9090"));
        assert!(find(&files, "configs/config.yaml").contains("dbname: orders_api"));
        assert!(find(&files, "Dockerfile").contains("FROM golang:1.22-alpine"));
        assert!(find(&files, "Dockerfile").contains("EXPOSE 9090"));
        assert!(find(&files, "LICENSE").contains("Copyright (c) 2031 Jane Doe"));
        let readme = find(&files, "README.md");
        assert!(readme.contains("# orders-api"));
        assert!(readme.contains("(https://github.com/jane/orders-api)"));
        assert!(readme.contains("MIT License. Copyright (c) 2031 Jane Doe."));
    }

    #[test]
    fn quotes_in_project_name_stay_inside_go_string() {
        let mut v = vars(LicenseKind::Mit, "example.com/ab");
        v.project_name = "a\"b".into();
        v.greeting = "Hello from a\"b!".into();
        let files = render_all(&v).unwrap();
        assert!(find(&files, "cmd/app/main.go").contains(r#"fmt.Println("Hello from a\"b!")"#));
    }

    #[test]
    fn makefile_recipes_use_tabs() {
        let files = render_all(&vars(LicenseKind::Mit, "svc")).unwrap();
        let makefile = find(&files, "Makefile");
        assert!(makefile.contains("\tgo build -o bin/app ./cmd/app"));
        assert!(makefile.contains("\tdocker build -t jane/orders-api ."));
        assert!(makefile.contains("docker run -p 9090:9090 jane/orders-api"));
        assert!(!makefile.contains("    go "));
    }

    #[test]
    fn readme_without_repo_link_for_local_module() {
        let files = render_all(&vars(LicenseKind::Mit, "orders-api")).unwrap();
        assert!(!find(&files, "README.md").contains("[source]"));
    }

    #[test]
    fn apache_license_selected() {
        let files = render_all(&vars(LicenseKind::Apache2, "svc")).unwrap();
        let license = find(&files, "LICENSE");
        assert!(license.contains("Apache License, Version 2.0"));
        assert!(license.contains("Copyright 2031 Jane Doe"));
        assert!(find(&files, "README.md").contains("Apache License 2.0."));
    }
}

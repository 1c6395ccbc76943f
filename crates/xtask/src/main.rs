use std::path::{Path, PathBuf};

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

/// Crates that only make sense inside a browser.
const BROWSER_CRATES: &[&str] = &[
    "web-sys",
    "js-sys",
    "wasm-bindgen",
    "wasm-bindgen-futures",
    "gloo-timers",
    "tracing-wasm",
    "console_error_panic_hook",
];

/// Source trees that must stay free of browser APIs, relative to the workspace.
const PURE_SOURCE_DIRS: &[&str] = &[
    "crates/domain/src",
    "crates/client/src/application",
    "crates/client/src/ports",
    "crates/client/src/state",
    "crates/client/src/ui/presentation",
    "crates/client/src/ui/routes",
];

const DOMAIN_PACKAGE: &str = "issuedraft-domain";

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = forbidden_dependencies(&metadata);

    let pattern = browser_api_pattern()?;
    for dir in PURE_SOURCE_DIRS {
        let root = metadata.workspace_root.join(dir);
        for file in rust_files(&root)? {
            let source = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            for line in browser_api_lines(&pattern, &source) {
                violations.push(format!("{}:{line} uses a browser API", file.display()));
            }
        }
    }

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("{violation}");
    }
    anyhow::bail!("arch-check found {} violation(s)", violations.len())
}

fn forbidden_dependencies(metadata: &Metadata) -> Vec<String> {
    metadata
        .packages
        .iter()
        .filter(|p| p.name == DOMAIN_PACKAGE)
        .flat_map(|p| &p.dependencies)
        .filter(|d| BROWSER_CRATES.contains(&d.name.as_str()))
        .map(|d| format!("{DOMAIN_PACKAGE} depends on browser crate {}", d.name))
        .collect()
}

fn browser_api_pattern() -> anyhow::Result<Regex> {
    Regex::new(r"\b(web_sys|js_sys|wasm_bindgen|wasm_bindgen_futures|gloo_timers)::")
        .context("compiling browser API pattern")
}

/// 1-based line numbers that reference a browser crate path, ignoring comments.
fn browser_api_lines(pattern: &Regex, source: &str) -> Vec<usize> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(idx, _)| idx + 1)
        .collect()
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.exists() {
        return Ok(files);
    }
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

//! `<stem>.provenance.json` sidecars written next to every node file.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact (`params`) and what came out (`summary`).
pub struct Payload {
    pub params: Value,
    pub summary: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            summary: Value::Null,
        }
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar {
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    params: Value,
    summary: Value,
    outputs: Vec<String>,
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let caller = Location::caller();
    let sidecar = Sidecar {
        code_rev: current_git_rev(),
        version: nodegen::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        params: payload.params,
        summary: payload.summary,
        outputs: vec![artifact.display().to_string()],
    };

    let path = provenance_path(artifact);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?,
        _ => {}
    }
    let bytes = serde_json::to_vec_pretty(&sidecar)?;
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("nodes");
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    from_env
        .or_else(git_head)
        .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout).ok().map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        let derived = provenance_path(Path::new("/tmp/out/disk_cvt.parquet"));
        assert_eq!(derived, Path::new("/tmp/out/disk_cvt.provenance.json"));
        assert_eq!(
            provenance_path(Path::new("nodes.csv")),
            Path::new("nodes.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_params_and_summary() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nodes.csv");
        fs::write(&artifact, "x,y\n").unwrap();
        let payload = Payload::new(json!({"method": "glass"})).with_summary(json!({"emitted": 0}));
        let written = write_sidecar(&artifact, payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(written).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.display().to_string());
        assert_eq!(parsed["params"]["method"], "glass");
        assert_eq!(parsed["summary"]["emitted"], 0);
        assert_eq!(parsed["version"], nodegen::VERSION);
        assert!(parsed["callsite"]["line"].as_u64().unwrap() > 0);
        assert!(!parsed["code_rev"].as_str().unwrap().is_empty());
    }
}

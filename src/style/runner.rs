//! Invocation of the external style-transfer batch process.
//!
//! The model is opaque: one subprocess run per style consumes an input
//! image folder and leaves a styled-image folder behind. The runner only
//! builds the command line, watches exit status, and reports per-style
//! progress; it never parses the model's output images.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::foundation::error::{AtelierError, AtelierResult};
use crate::style::StyleKind;

/// Configuration for the external style-transfer process.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StylizeConfig {
    /// Interpreter used to run the test script.
    pub interpreter: PathBuf,
    /// The model's inference entry point script.
    pub script: PathBuf,
    /// Folder of input images to stylize.
    pub dataroot: PathBuf,
    /// Folder holding the pretrained per-style checkpoints.
    pub checkpoints_dir: PathBuf,
    /// Folder the process writes styled results into.
    pub results_dir: PathBuf,
    /// Run on GPU 0 instead of CPU-only.
    #[serde(default)]
    pub gpu: bool,
}

impl StylizeConfig {
    pub fn validate(&self) -> AtelierResult<()> {
        for (field, path) in [
            ("interpreter", &self.interpreter),
            ("script", &self.script),
            ("dataroot", &self.dataroot),
            ("checkpoints_dir", &self.checkpoints_dir),
            ("results_dir", &self.results_dir),
        ] {
            if path.as_os_str().is_empty() {
                return Err(AtelierError::validation(format!(
                    "stylize config field '{field}' must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Progress report passed to the callback after each completed style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StylizeProgress {
    pub style: StyleKind,
    pub completed: usize,
    pub total: usize,
}

pub(crate) fn build_args(cfg: &StylizeConfig, style: StyleKind) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![cfg.script.clone().into()];
    args.push("--dataroot".into());
    args.push(cfg.dataroot.clone().into());
    args.push("--name".into());
    args.push(style.as_str().into());
    args.push("--checkpoints_dir".into());
    args.push(cfg.checkpoints_dir.clone().into());
    args.push("--model".into());
    args.push("test".into());
    args.push("--direction".into());
    args.push("BtoA".into());
    args.push("--results_dir".into());
    args.push(cfg.results_dir.clone().into());
    args.push("--no_dropout".into());
    args.push("--gpu_ids".into());
    args.push(if cfg.gpu { "0" } else { "-1" }.into());
    args
}

/// Run the transfer process for a single style, blocking until it exits.
pub fn run_style(cfg: &StylizeConfig, style: StyleKind) -> AtelierResult<()> {
    cfg.validate()?;
    if style == StyleKind::Original {
        return Err(AtelierError::validation(
            "the original style is not produced by the transfer process",
        ));
    }

    tracing::debug!(style = style.as_str(), "spawning style-transfer process");
    let output = Command::new(&cfg.interpreter)
        .args(build_args(cfg, style))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            AtelierError::evaluation(format!(
                "failed to spawn style-transfer process for '{}': {e}",
                style.as_str()
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AtelierError::evaluation(format!(
            "style transfer for '{}' exited with status {}: {}",
            style.as_str(),
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// Run every non-original style in order, reporting one progress increment
/// per completed style. Stops at the first failure.
pub fn run_all(
    cfg: &StylizeConfig,
    mut progress: impl FnMut(StylizeProgress),
) -> AtelierResult<()> {
    let styles: Vec<StyleKind> = StyleKind::styled().collect();
    let total = styles.len();
    for (i, style) in styles.into_iter().enumerate() {
        run_style(cfg, style)?;
        progress(StylizeProgress {
            style,
            completed: i + 1,
            total,
        });
    }
    Ok(())
}

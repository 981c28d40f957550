//! Runtime configuration for the window manager and the demo binary.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::Error;

/// Which window-manager policy drives placement and decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PolicyKind {
    /// Center new windows, no decorations beyond the border.
    #[default]
    Default,
    /// Close boxes, a full-height `MainWindow` and `alt-b` to raise it.
    Classic,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Default => write!(f, "default"),
            PolicyKind::Classic => write!(f, "classic"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(PolicyKind::Default),
            "classic" => Ok(PolicyKind::Classic),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WmConfig {
    /// Workspace names, in switching order. Empty means one unnamed
    /// workspace.
    pub workspaces: Vec<String>,
    pub policy: PolicyKind,
    /// Whether widgets flagged with a shadow actually cast one.
    pub shadows: bool,
    /// Reserve the bottom row for the window list.
    pub taskbar: bool,
    /// New windows go on top and take focus. When off they are stacked at
    /// the bottom and flagged urgent.
    pub focus_new_windows: bool,
    pub poll_interval: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            workspaces: Vec::new(),
            policy: PolicyKind::Default,
            shadows: false,
            taskbar: true,
            focus_new_windows: true,
            poll_interval: Duration::from_millis(50),
            log_path: None,
        }
    }
}

/// Command line of the demo binary.
#[derive(Debug, Parser)]
#[command(name = "term-toolkit", version, about)]
pub struct Args {
    /// Window-manager policy. Falls back to `TERM_TOOLKIT_POLICY`, then
    /// `default`.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyKind>,

    /// Workspace names, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub workspaces: Vec<String>,

    /// Draw drop shadows under windows.
    #[arg(long)]
    pub shadows: bool,

    /// Hide the taskbar row.
    #[arg(long)]
    pub no_taskbar: bool,

    /// Stack new windows at the bottom instead of focusing them.
    #[arg(long)]
    pub no_focus_new: bool,

    /// Input poll interval in milliseconds.
    #[arg(long, default_value_t = 50)]
    pub poll_ms: u64,

    /// Write the debug log to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Environment variable naming the policy when `--policy` is absent.
pub const POLICY_ENV: &str = "TERM_TOOLKIT_POLICY";

/// The flag wins over the environment; an unset or empty variable means the
/// default policy.
pub fn resolve_policy(flag: Option<PolicyKind>, env: Option<&str>) -> Result<PolicyKind, Error> {
    match (flag, env) {
        (Some(kind), _) => Ok(kind),
        (None, Some(name)) if !name.trim().is_empty() => name.parse(),
        (None, _) => Ok(PolicyKind::default()),
    }
}

impl Args {
    pub fn into_config(self) -> Result<WmConfig, Error> {
        let env = std::env::var(POLICY_ENV).ok();
        let policy = resolve_policy(self.policy, env.as_deref())?;
        Ok(WmConfig {
            workspaces: self
                .workspaces
                .into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect(),
            policy,
            shadows: self.shadows,
            taskbar: !self.no_taskbar,
            focus_new_windows: !self.no_focus_new,
            poll_interval: Duration::from_millis(self.poll_ms.max(1)),
            log_path: self.log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_kind_parses_names() {
        assert_eq!("classic".parse::<PolicyKind>().unwrap(), PolicyKind::Classic);
        assert_eq!(" Default ".parse::<PolicyKind>().unwrap(), PolicyKind::Default);
        let err = "tiling".parse::<PolicyKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownPolicy(ref name) if name == "tiling"));
    }

    #[test]
    fn policy_flag_beats_the_environment() {
        assert_eq!(
            resolve_policy(Some(PolicyKind::Default), Some("classic")).unwrap(),
            PolicyKind::Default
        );
        assert_eq!(resolve_policy(None, Some("Classic")).unwrap(), PolicyKind::Classic);
        assert_eq!(resolve_policy(None, Some("  ")).unwrap(), PolicyKind::Default);
        assert_eq!(resolve_policy(None, None).unwrap(), PolicyKind::Default);
        let err = resolve_policy(None, Some("tiling")).unwrap_err();
        assert!(matches!(err, Error::UnknownPolicy(ref name) if name == "tiling"));
    }

    #[test]
    fn args_build_config() {
        let args = Args::parse_from([
            "term-toolkit",
            "--policy",
            "classic",
            "--workspaces",
            "mail, chat,,",
            "--no-taskbar",
            "--poll-ms",
            "0",
        ]);
        let config = args.into_config().unwrap();
        assert_eq!(config.policy, PolicyKind::Classic);
        assert_eq!(config.workspaces, vec!["mail".to_string(), "chat".to_string()]);
        assert!(!config.taskbar);
        assert!(config.focus_new_windows);
        assert_eq!(config.poll_interval, Duration::from_millis(1));
    }

    #[test]
    fn defaults_match_a_plain_session() {
        let config = WmConfig::default();
        assert!(config.workspaces.is_empty());
        assert!(!config.shadows && config.taskbar);
        assert_eq!(PolicyKind::default().to_string(), "default");
    }
}

//! Slidecraft Application
//!
//! Headless driver that replays gesture scripts against a slide and reports
//! the resulting component state, history and markup.

pub mod script;

pub use script::{Replay, Script, ScriptError, ScriptResult, StateDump, Step, replay};

use slidecraft_core::EditorConfig;
use std::path::PathBuf;

/// Usage text printed for invalid arguments.
pub const USAGE: &str = "usage: slidecraft <script.json> [--config <config.json>] [--markup]";

/// Command-line options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    /// Gesture script to replay.
    pub script: PathBuf,
    /// Editor configuration file, overriding the script's own config.
    pub config: Option<PathBuf>,
    /// Print component markup after the state dump.
    pub markup: bool,
}

impl AppConfig {
    /// Parse arguments, excluding the program name. Returns None on
    /// invalid usage.
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut script = None;
        let mut config = None;
        let mut markup = false;
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config = Some(PathBuf::from(args.next()?)),
                "--markup" => markup = true,
                flag if flag.starts_with("--") => return None,
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return None,
            }
        }
        Some(Self {
            script: script?,
            config,
            markup,
        })
    }

    /// Resolve the editor configuration: the config file, then the
    /// script's own, then the defaults.
    pub fn editor_config(&self, script: &Script) -> ScriptResult<EditorConfig> {
        match &self.config {
            Some(path) => Ok(EditorConfig::load(path)?),
            None => Ok(script.config.clone().unwrap_or_default()),
        }
    }
}

/// Replay the configured script and render the report.
pub fn run(app: &AppConfig) -> ScriptResult<String> {
    let script = Script::load(&app.script)?;
    let config = app.editor_config(&script)?;
    let replay = replay(&script, config)?;

    let mut report = serde_json::to_string_pretty(&replay.dump())?;
    if app.markup {
        report.push('\n');
        report.push_str(&replay.markup()?);
    }
    Ok(report)
}

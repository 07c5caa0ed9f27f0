//! Session configuration

use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Result, search::DEFAULT_TREE_THRESHOLD, tictactoe::Symbol};

/// Output format for captured decision trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// Graphviz source only
    Dot,
    #[default]
    Pdf,
    Svg,
    Png,
    /// Nested JSON dump of the tree
    Json,
    /// Flat edge list
    Csv,
}

impl RenderFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            RenderFormat::Dot => "dot",
            RenderFormat::Pdf => "pdf",
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Json => "json",
            RenderFormat::Csv => "csv",
        }
    }

    /// Formats produced by running Graphviz
    pub fn is_image(self) -> bool {
        matches!(
            self,
            RenderFormat::Pdf | RenderFormat::Svg | RenderFormat::Png
        )
    }

    /// Pick a format from a file name's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        extension.parse()
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for RenderFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dot" | "gv" => Ok(RenderFormat::Dot),
            "pdf" => Ok(RenderFormat::Pdf),
            "svg" => Ok(RenderFormat::Svg),
            "png" => Ok(RenderFormat::Png),
            "json" => Ok(RenderFormat::Json),
            "csv" => Ok(RenderFormat::Csv),
            _ => Err(crate::Error::ParseRenderFormat {
                input: s.to_string(),
                expected: "dot, pdf, svg, png, json, csv".to_string(),
            }),
        }
    }
}

/// Configuration for a play session.
///
/// Builder-style setters mirror the CLI flags; a JSON file can provide the
/// starting values.
///
/// # Examples
///
/// ```
/// use ttt_minimax::{GameConfig, RenderFormat, tictactoe::Symbol};
///
/// let config = GameConfig::new(Symbol::O)
///     .with_ai_first(true)
///     .with_format(RenderFormat::Svg)
///     .with_tree_threshold(120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Symbol played by the human; the AI takes the other one
    pub human: Symbol,
    /// Let the AI open the game
    pub ai_first: bool,
    /// Record decision trees for AI moves (subject to `tree_threshold`)
    pub capture_trees: bool,
    /// Largest number of move orderings for which a tree is captured
    pub tree_threshold: u64,
    /// Directory receiving rendered trees
    pub output_dir: PathBuf,
    /// Format of rendered trees
    pub format: RenderFormat,
}

impl GameConfig {
    pub fn new(human: Symbol) -> Self {
        Self {
            human,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_human(path).map(|(config, _)| config)
    }

    /// Like [`GameConfig::load`], also returning the human's symbol when the
    /// file sets it explicitly
    pub fn load_with_human(path: &Path) -> Result<(Self, Option<Symbol>)> {
        let contents = fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        let human_set = value.get("human").is_some();
        let config: GameConfig = serde_json::from_value(value)?;
        config.validate()?;

        let human = human_set.then_some(config.human);
        Ok((config, human))
    }

    pub fn validate(&self) -> Result<()> {
        if self.tree_threshold == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "tree_threshold must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn ai_symbol(&self) -> Symbol {
        self.human.opponent()
    }

    pub fn with_human(mut self, human: Symbol) -> Self {
        self.human = human;
        self
    }

    pub fn with_ai_first(mut self, ai_first: bool) -> Self {
        self.ai_first = ai_first;
        self
    }

    pub fn with_capture_trees(mut self, capture: bool) -> Self {
        self.capture_trees = capture;
        self
    }

    pub fn with_tree_threshold(mut self, threshold: u64) -> Self {
        self.tree_threshold = threshold;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human: Symbol::X,
            ai_first: false,
            capture_trees: true,
            tree_threshold: DEFAULT_TREE_THRESHOLD,
            output_dir: PathBuf::from("trees"),
            format: RenderFormat::default(),
        }
    }
}

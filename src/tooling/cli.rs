//! CLI Tooling
//!
//! Builds a namespace from a path listing (one path per line; a trailing `/`
//! marks a folder, anything else is a leaf carrying the original line) and
//! runs a single inspection or mutation command against it.

use crate::config::{ConfigLoader, FolioConfig};
use crate::error::{ApiError, Outcome};
use crate::events::ChangeEvent;
use crate::tree::names::split_directories;
use crate::tree::{FileSystem, NodeRef, PathNode, SortMode};
use crate::types::{NodeId, SEPARATOR};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Folio CLI - explore and reshape a folder/leaf namespace
#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build a folder/leaf namespace from a path listing and operate on it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path listing to load ('-' reads stdin)
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,

    /// Workspace directory searched for folio.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the namespace as a tree
    Tree {
        /// Presentation order (folders-first, lexicographic)
        #[arg(long)]
        sort: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Disable colored folder names
        #[arg(long)]
        no_color: bool,
    },
    /// Resolve a path
    Find { path: String },
    /// Show node counts and depth
    Stats,
    /// Move a node into another folder
    Move { path: String, to: String },
    /// Merge one folder into another
    Merge { from: String, to: String },
    /// Rename a node in place
    Rename {
        path: String,
        name: String,
        /// Append " (N)" instead of failing when the name is taken
        #[arg(long)]
        duplicates: bool,
    },
    /// Give a node a new full path, creating folders as needed
    Relocate { path: String, new_path: String },
    /// Delete a node and everything below it
    Delete { path: String },
}

/// CLI execution context
pub struct CliContext {
    config: FolioConfig,
}

impl CliContext {
    /// Load configuration from an explicit file or the workspace.
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(&path)?,
            None => ConfigLoader::load(&workspace)?,
        };
        Ok(Self { config })
    }

    pub fn with_config(config: FolioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Fold CLI logging flags over the loaded configuration.
    pub fn apply_log_overrides(&mut self, cli: &Cli) {
        let logging = &mut self.config.logging;
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
    }

    /// Build a namespace from a path listing.
    pub fn load_namespace(&self, listing: &str) -> Result<FileSystem<String>, ApiError> {
        let mut fs = FileSystem::with_config(&self.config.namespace);
        fs.reload(|fs| -> Result<(), ApiError> {
            for line in listing.lines().map(str::trim) {
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if line.ends_with(SEPARATOR) {
                    fs.find_or_create_all_folders(line)?;
                    continue;
                }
                let segments = split_directories(line);
                let Some((name, folders)) = segments.split_last() else {
                    continue;
                };
                let parent = fs.find_or_create_all_folders(&folders.join("/"))?;
                fs.create_duplicate_leaf(parent, name, line.to_string())?;
            }
            Ok(())
        })?;
        info!(nodes = fs.len(), "Namespace loaded");
        Ok(fs)
    }

    /// Execute a command against the namespace described by `listing`.
    pub fn execute(&self, listing: &str, command: &Commands) -> Result<String, ApiError> {
        let mut fs = self.load_namespace(listing)?;
        let events = Arc::new(Mutex::new(Vec::<ChangeEvent>::new()));
        let sink = Arc::clone(&events);
        fs.subscribe(Box::new(
            move |_: &FileSystem<String>, event: &ChangeEvent| sink.lock().push(event.clone()),
        ));

        let default_sort = self.config.namespace.sort_mode;
        let output = match command {
            Commands::Tree {
                sort,
                format,
                no_color,
            } => {
                let mode = match sort {
                    Some(s) => s.parse::<SortMode>().map_err(ApiError::ConfigError)?,
                    None => default_sort,
                };
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&tree_json(fs.root(), mode))
                        .map_err(|e| ApiError::ConfigError(e.to_string()))?,
                    "text" => render_tree(&fs, mode, !no_color),
                    other => {
                        return Err(ApiError::ConfigError(format!(
                            "Invalid format: {} (must be 'text' or 'json')",
                            other
                        )))
                    }
                }
            }
            Commands::Find { path } => match fs.find(path) {
                (true, id) => format!("found: {}", describe(&fs, id)),
                (false, id) => format!("not found; resolved up to '{}'", describe(&fs, id)),
            },
            Commands::Stats => render_stats(&fs, self),
            Commands::Move { path, to } => {
                let node = resolve(&fs, path)?;
                let target = resolve(&fs, to)?;
                let outcome = fs.move_node(node, target)?;
                report(&fs, outcome, &events.lock(), default_sort)
            }
            Commands::Merge { from, to } => {
                let from = resolve(&fs, from)?;
                let to = resolve(&fs, to)?;
                let outcome = fs.merge(from, to)?;
                report(&fs, outcome, &events.lock(), default_sort)
            }
            Commands::Rename {
                path,
                name,
                duplicates,
            } => {
                let node = resolve(&fs, path)?;
                let outcome = if *duplicates {
                    fs.rename_with_duplicates(node, name)?
                } else {
                    fs.rename(node, name)?
                };
                report(&fs, outcome, &events.lock(), default_sort)
            }
            Commands::Relocate { path, new_path } => {
                let node = resolve(&fs, path)?;
                let outcome = fs.rename_and_move(node, new_path)?;
                report(&fs, outcome, &events.lock(), default_sort)
            }
            Commands::Delete { path } => {
                let node = resolve(&fs, path)?;
                fs.delete(node)?;
                report(&fs, Outcome::Done, &events.lock(), default_sort)
            }
        };
        info!(command = ?command, "Command completed");
        Ok(output)
    }
}

fn resolve(fs: &FileSystem<String>, path: &str) -> Result<NodeId, ApiError> {
    fs.get_by_path(path)
        .ok_or_else(|| ApiError::PathNotFound(path.to_string()))
}

fn describe(fs: &FileSystem<String>, id: NodeId) -> String {
    match fs.get(id) {
        Some(node) if node.is_root() => "/".to_string(),
        Some(node) if node.is_folder() => format!("{}/", node.full_name()),
        Some(node) => node.full_name(),
        None => id.to_string(),
    }
}

fn report(fs: &FileSystem<String>, outcome: Outcome, events: &[ChangeEvent], mode: SortMode) -> String {
    let mut out = format!("{:?}\n", outcome);
    for event in events {
        out.push_str(&format!("  {:?} {}\n", event.kind, event.path));
    }
    out.push('\n');
    out.push_str(&render_tree(fs, mode, false));
    out
}

/// Indented tree, one node per line, folders marked with a trailing `/`.
pub fn render_tree<T>(fs: &FileSystem<T>, mode: SortMode, color: bool) -> String {
    let mut out = String::new();
    for node in fs.root().descendants(mode) {
        let indent = "  ".repeat(node.depth() as usize);
        if node.is_folder() {
            let label = format!("{}/", node.name());
            if color {
                out.push_str(&format!("{}{}\n", indent, label.blue().bold()));
            } else {
                out.push_str(&format!("{}{}\n", indent, label));
            }
        } else {
            out.push_str(&format!("{}{}\n", indent, node.name()));
        }
    }
    out
}

/// Nested JSON view of a subtree.
pub fn tree_json(node: NodeRef<'_, String>, mode: SortMode) -> Value {
    if let Some(value) = node.value() {
        return json!({
            "name": node.name(),
            "type": "leaf",
            "value": value,
        });
    }
    let children: Vec<Value> = node.children(mode).map(|c| tree_json(c, mode)).collect();
    json!({
        "name": node.name(),
        "type": "folder",
        "descendants": node.total_descendants(),
        "leaves": node.total_leaves(),
        "children": children,
    })
}

fn render_stats(fs: &FileSystem<String>, context: &CliContext) -> String {
    let root = fs.root();
    let max_depth = root
        .descendants(SortMode::Lexicographic)
        .map(|n| n.depth() + 1)
        .max()
        .unwrap_or(0);
    let namespace = &context.config.namespace;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Folders".to_string(),
        (root.total_descendants() - root.total_leaves()).to_string(),
    ]);
    table.add_row(vec!["Leaves".to_string(), root.total_leaves().to_string()]);
    table.add_row(vec!["Total nodes".to_string(), fs.len().to_string()]);
    table.add_row(vec!["Max depth".to_string(), max_depth.to_string()]);
    table.add_row(vec!["Comparer".to_string(), format!("{:?}", namespace.comparer)]);
    table.add_row(vec!["Sort mode".to_string(), namespace.sort_mode.to_string()]);
    table.to_string()
}

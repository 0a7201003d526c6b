//! Sandboxed file tools exposed to the count agent.
//!
//! The agent can list the transcript files of one fixed directory and read
//! them by name. Names that do not resolve to a file inside that directory
//! get a plain not-found message instead of an error, so a confused model
//! can recover on its next turn.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rig::completion::ToolDefinition;
use rig::tool::{Tool, ToolSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Error type for the input tools.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ToolError {
    /// Error during tool execution.
    #[error("Execution error: {0}")]
    Execution(String),
}

/// The directory the tools are confined to.
#[derive(Debug, Clone)]
pub struct InputDir {
    root: PathBuf,
}

impl InputDir {
    /// Opens `path` as the sandbox root. The directory must exist.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = path.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// The canonical sandbox root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sorted names of the `.txt` files directly inside the root.
    pub fn list(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reads a file by bare name. `None` if it does not resolve inside the root.
    #[must_use]
    pub fn read(&self, name: &str) -> Option<String> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return None;
        }
        let path = self.root.join(name).canonicalize().ok()?;
        if !path.starts_with(&self.root) || !path.is_file() {
            return None;
        }
        std::fs::read_to_string(path).ok()
    }
}

/// Arguments for [`ListInputFiles`].
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
pub struct ListInputFilesArgs {}

/// Lists the transcript files available for reading.
pub struct ListInputFiles {
    dir: Arc<InputDir>,
}

impl ListInputFiles {
    /// Creates the tool over the given sandbox.
    #[must_use]
    pub const fn new(dir: Arc<InputDir>) -> Self {
        Self { dir }
    }
}

impl Tool for ListInputFiles {
    const NAME: &'static str = "list_input_files";
    type Error = ToolError;
    type Args = ListInputFilesArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List all conversation transcript files available for reading. \
                Returns a newline-separated list of filenames."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, _args: ListInputFilesArgs) -> Result<String, ToolError> {
        let names = self
            .dir
            .list()
            .map_err(|e| ToolError::Execution(e.to_string()))?;
        tracing::debug!(files = names.len(), "Listed input files");
        Ok(names.join("\n"))
    }
}

/// Arguments for [`ReadInputFile`].
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ReadInputFileArgs {
    /// Name of the file to read (e.g. '001.txt').
    pub filename: String,
}

/// Reads one transcript file by name.
pub struct ReadInputFile {
    dir: Arc<InputDir>,
}

impl ReadInputFile {
    /// Creates the tool over the given sandbox.
    #[must_use]
    pub const fn new(dir: Arc<InputDir>) -> Self {
        Self { dir }
    }
}

impl Tool for ReadInputFile {
    const NAME: &'static str = "read_file";
    type Error = ToolError;
    type Args = ReadInputFileArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Read the contents of a conversation transcript file.".to_string(),
            parameters: serde_json::to_value(schemars::schema_for!(ReadInputFileArgs))
                .unwrap_or_else(|_| json!({})),
        }
    }

    async fn call(&self, args: ReadInputFileArgs) -> Result<String, ToolError> {
        Ok(self.dir.read(&args.filename).unwrap_or_else(|| {
            tracing::debug!(filename = %args.filename, "Input file not found");
            format!("Error: file '{}' not found.", args.filename)
        }))
    }
}

/// Builds the capability set handed to the agent loop.
#[must_use]
pub fn input_toolset(dir: InputDir) -> ToolSet {
    let dir = Arc::new(dir);
    let mut toolset = ToolSet::default();
    toolset.add_tool(ListInputFiles::new(Arc::clone(&dir)));
    toolset.add_tool(ReadInputFile::new(dir));
    toolset
}

//! Task prompt assembly for the count agent.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Preamble given to the agent ahead of every task.
pub const AGENT_PREAMBLE: &str = "You are an autonomous agent that solves tasks by using the tools available to you. \
Respond with ONLY the final answer in the format requested by the task.";

/// Separator between the task description and the format description.
const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Failure to read one of the task description files.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", path.display())]
pub struct TaskPromptError {
    /// The file that could not be read.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Loads `task.md` and `format.md` from `spec_dir` and joins them into one prompt.
pub fn load_task_prompt(spec_dir: &Path) -> Result<String, TaskPromptError> {
    let task = read(&spec_dir.join("task.md"))?;
    let format = read(&spec_dir.join("format.md"))?;
    Ok(format!("{task}{SECTION_SEPARATOR}{format}"))
}

fn read(path: &Path) -> Result<String, TaskPromptError> {
    std::fs::read_to_string(path).map_err(|source| TaskPromptError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_task_prompt_joins_sections() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("task.md"), "Count lines.").unwrap();
        std::fs::write(dir.path().join("format.md"), "name: message").unwrap();

        let prompt = load_task_prompt(dir.path()).unwrap();
        assert_eq!(prompt, "Count lines.\n\n---\n\nname: message");
    }

    #[test]
    fn test_missing_format_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("task.md"), "Count lines.").unwrap();

        let err = load_task_prompt(dir.path()).unwrap_err();
        assert!(err.path.ends_with("format.md"));
        assert!(err.to_string().contains("format.md"));
    }
}

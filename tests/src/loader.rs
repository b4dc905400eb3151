//! Loader for operations files.
//!
//! An operations file is a sequence of steps. Each step starts with a
//! `--# step_name` marker and holds one JSON request document. Other lines
//! starting with `--` are comments.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{ScenarioError, ScenarioResult};

/// A parsed operations file.
#[derive(Debug, Clone, Default)]
pub struct Operations {
    /// Map of step name to its request document.
    pub steps: HashMap<String, String>,
    /// Steps in order of appearance.
    pub step_order: Vec<String>,
}

impl Operations {
    /// Read and parse an operations file.
    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| ScenarioError::file_read(path, e))?;
        Self::parse_named(&path.display().to_string(), &source)
    }

    /// Parse an operations file from a string.
    pub fn parse(source: &str) -> ScenarioResult<Self> {
        Self::parse_named("<inline>", source)
    }

    fn parse_named(file: &str, source: &str) -> ScenarioResult<Self> {
        let mut ops = Self::default();
        let mut current: Option<(String, String)> = None;

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(suffix) = trimmed.strip_prefix("--#") {
                if let Some((name, body)) = current.take() {
                    ops.finish_step(file, name, body)?;
                }
                let name = suffix.trim().to_string();
                if name.is_empty() {
                    return Err(ScenarioError::operations_parse(file, "empty step name after --#"));
                }
                current = Some((name, String::new()));
            } else if trimmed.starts_with("--") || trimmed.is_empty() {
                continue;
            } else if let Some((_, body)) = current.as_mut() {
                body.push_str(line);
                body.push('\n');
            } else {
                return Err(ScenarioError::operations_parse(
                    file,
                    format!("content before the first step marker: {}", trimmed),
                ));
            }
        }

        if let Some((name, body)) = current.take() {
            ops.finish_step(file, name, body)?;
        }
        Ok(ops)
    }

    fn finish_step(&mut self, file: &str, name: String, body: String) -> ScenarioResult<()> {
        if self.steps.contains_key(&name) {
            return Err(ScenarioError::operations_parse(
                file,
                format!("duplicate step '{}'", name),
            ));
        }
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ScenarioError::operations_parse(
                file,
                format!("step '{}' has no request", name),
            ));
        }
        self.step_order.push(name.clone());
        self.steps.insert(name, body);
        Ok(())
    }

    /// Get the request document of a step.
    pub fn get_step(&self, name: &str) -> Option<&str> {
        self.steps.get(name).map(String::as_str)
    }

    /// Step names in order of appearance.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.step_order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.step_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.step_order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_in_order() {
        let source = r#"
-- teams and their supplies
--# list_teams
{"field": "teams",
 "selection": ["id"]}

--# delete_tape
{"mutation": true, "field": "deleteSupply", "arguments": {"id": "tape"}}
"#;

        let ops = Operations::parse(source).unwrap();

        assert_eq!(ops.step_names().collect::<Vec<_>>(), vec!["list_teams", "delete_tape"]);
        assert_eq!(
            ops.get_step("list_teams"),
            Some("{\"field\": \"teams\",\n \"selection\": [\"id\"]}")
        );
        assert!(ops.get_step("delete_tape").unwrap().contains("deleteSupply"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Operations::parse("--#\n{}").is_err());
        assert!(Operations::parse("{}\n--# a\n{}").is_err());
        assert!(Operations::parse("--# a\n{}\n--# a\n{}").is_err());
        assert!(Operations::parse("--# a\n--# b\n{}").is_err());
    }
}

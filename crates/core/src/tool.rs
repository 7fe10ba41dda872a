//! Tool trait — the abstraction over content generators.
//!
//! A tool turns one free-text argument (the text after `Action: name:`)
//! into exactly one [`ContentElement`]. Tools are registered in the
//! [`ToolRegistry`] and dispatched by name from the build loop.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::content::ContentElement;
use crate::error::ToolError;

/// The core Tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "essay_writer").
    ///
    /// Must be a lowercase identifier so the action protocol can address it.
    fn name(&self) -> &str;

    /// What this tool adds to the page (sent to the model).
    fn description(&self) -> &str;

    /// A sample argument, shown to the model as `e.g., name: example`.
    fn example(&self) -> &str;

    /// Generate one content element from the argument.
    async fn invoke(&self, argument: &str) -> std::result::Result<ContentElement, ToolError>;
}

/// A registry of available tools.
///
/// The build loop uses this to:
/// 1. Describe the tool catalogue in the system prompt
/// 2. Look up and invoke tools when the model requests them
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Invoke a tool by name.
    pub async fn invoke(
        &self,
        name: &str,
        argument: &str,
    ) -> std::result::Result<ContentElement, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.invoke(argument).await
    }

    /// All registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Render the catalogue in the layout the system prompt expects.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for name in self.names() {
            if let Some(tool) = self.get(name) {
                out.push_str(&format!(
                    "{name}:\ne.g., {name}: {}\n{}\n\n",
                    tool.example(),
                    tool.description()
                ));
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// tool.rs - Editing tools and the pointer state they drive

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::LifeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Click to start or stop a stroke; cells under the pointer are painted alive.
    #[default]
    Brush,
    /// Each click flips one cell.
    Pen,
}

impl Tool {
    pub const ALL: [Tool; 2] = [Tool::Brush, Tool::Pen];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Pen => "pen",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brush" => Ok(Tool::Brush),
            "pen" => Ok(Tool::Pen),
            _ => Err(LifeError::UnknownTool(s.to_string())),
        }
    }
}

/// What a pointer event does to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Paint,
    Toggle,
}

/// Pointer state machine for the editor. Turns clicks and hovers into
/// cell edits according to the active tool.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    tool: Tool,
    drawing: bool,
}

impl Editor {
    pub fn new(tool: Tool) -> Self {
        Self { tool, drawing: false }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Switching tools ends any stroke in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.drawing = false;
    }

    pub fn click(&mut self) -> Option<Edit> {
        match self.tool {
            Tool::Brush => {
                let edit = (!self.drawing).then_some(Edit::Paint);
                self.drawing = !self.drawing;
                edit
            }
            Tool::Pen => Some(Edit::Toggle),
        }
    }

    pub fn hover(&self) -> Option<Edit> {
        (self.tool == Tool::Brush && self.drawing).then_some(Edit::Paint)
    }
}

impl From<Tool> for Edit {
    fn from(tool: Tool) -> Self {
        match tool {
            Tool::Brush => Edit::Paint,
            Tool::Pen => Edit::Toggle,
        }
    }
}

//! Argument of the push-then-run-commands entry point.
//!
//! The argument arrives as JSON shaped like
//!
//! ```json
//! {
//!   "commands": ["cursorTop", { "command": "cursorMove", "args": [{ "key": "to", "val": "down" }] }],
//!   "checkPosition": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::surface::CommandArg;

/// One entry of a command batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchCommand {
    /// A bare command name, run without arguments.
    Name(String),
    /// A command with arguments passed through untouched.
    WithArgs {
        command: String,
        #[serde(default)]
        args: Vec<CommandArg>,
    },
}

impl BatchCommand {
    pub fn name(&self) -> &str {
        match self {
            BatchCommand::Name(name) => name,
            BatchCommand::WithArgs { command, .. } => command,
        }
    }

    pub fn args(&self) -> &[CommandArg] {
        match self {
            BatchCommand::Name(_) => &[],
            BatchCommand::WithArgs { args, .. } => args,
        }
    }
}

/// Commands to run after capturing the current position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandBatch {
    /// `None` turns the batch into a plain push
    #[serde(default)]
    pub commands: Option<Vec<BatchCommand>>,
    /// Drop the pushed position again if the commands did not move the cursor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_position: Option<bool>,
}

impl CommandBatch {
    pub fn new(commands: Vec<BatchCommand>) -> Self {
        Self {
            commands: Some(commands),
            check_position: None,
        }
    }

    pub fn checking_position(mut self, check: bool) -> Self {
        self.check_position = Some(check);
        self
    }

    /// Decodes a batch from a host command argument.
    ///
    /// Returns `None` for an absent or null argument. A malformed argument,
    /// such as a `commands` field that is not an array, is logged and also
    /// yields `None` so the caller falls back to a plain push.
    pub fn from_json(value: Option<&Value>) -> Option<Self> {
        let value = value.filter(|value| !value.is_null())?;
        match Self::deserialize(value) {
            Ok(batch) => Some(batch),
            Err(err) => {
                warn!(%err, "ignoring malformed command batch");
                None
            }
        }
    }
}

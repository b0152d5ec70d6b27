//! Schema command implementation.
//!
//! The `searchready schema` command prints the JSON Schema of the service
//! configuration file or of the `check-readiness --json` report.

use crate::cli::args::{SchemaArgs, SchemaTarget};
use crate::config::ServiceConfig;
use crate::error::{ReadinessError, Result};
use crate::requirements::ReadinessReport;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand {
    args: SchemaArgs,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new(args: SchemaArgs) -> Self {
        Self { args }
    }

    /// Render the requested schema as pretty JSON.
    pub fn render(&self) -> Result<String> {
        let schema = match self.args.target {
            SchemaTarget::Config => schemars::schema_for!(ServiceConfig),
            SchemaTarget::Report => schemars::schema_for!(ReadinessReport),
        };
        serde_json::to_string_pretty(&schema).map_err(|e| ReadinessError::Other(e.into()))
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.message(&self.render()?);
        Ok(CommandResult::success())
    }
}

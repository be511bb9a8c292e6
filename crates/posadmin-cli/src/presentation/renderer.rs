use anyhow::Result;
use serde::Serialize;
use std::fmt::Display;

use crate::args::OutputFormat;

/// Writes view models to stdout: pretty JSON or their plain `Display` form
pub struct ConsoleRenderer {
    json_mode: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            json_mode: format == OutputFormat::Json,
        }
    }

    pub fn render<T>(&self, view: &T) -> Result<()>
    where
        T: Serialize + Display,
    {
        if self.json_mode {
            println!("{}", serde_json::to_string_pretty(view)?);
        } else {
            print!("{}", view);
        }
        Ok(())
    }
}

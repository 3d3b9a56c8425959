use std::io::stdout;

use clap::Parser;
use comfy_table::Table;
use serde::Serialize;

use crate::prelude::*;

#[derive(Copy, Clone, Parser)]
pub struct OutputArgs {
    /// Print the report as JSON instead of a table.
    #[clap(long, env = "JSON")]
    json: bool,
}

impl OutputArgs {
    pub fn print<T: Serialize + ?Sized>(
        self,
        report: &T,
        build_table: impl FnOnce(&T) -> Table,
    ) -> Result {
        if self.json {
            serde_json::to_writer_pretty(stdout().lock(), report)
                .context("failed to serialize the report")?;
            println!();
        } else {
            println!("{}", build_table(report));
        }
        Ok(())
    }
}

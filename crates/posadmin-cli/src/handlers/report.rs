use anyhow::{Context as _, Result};
use posadmin_types::{DaySalesFilter, SalesReportFilter};
use std::path::PathBuf;

use crate::args::ReportCommand;
use crate::context::ExecutionContext;
use crate::presentation::FileWrittenViewModel;
use crate::presentation::presenters::{present_day_sales, present_sales};

pub async fn handle(ctx: &ExecutionContext, command: ReportCommand) -> Result<()> {
    let renderer = ctx.renderer();

    match command {
        ReportCommand::Sales {
            from,
            to,
            client_id,
            export,
        } => {
            let filter = SalesReportFilter {
                start_date: from,
                end_date: to,
                client_id,
            };
            filter.validate()?;
            let reports = ctx.api()?.reports();
            match export {
                Some(path) => {
                    let csv = reports.export_sales(&filter).await?;
                    renderer.render(&write_export(path, csv)?)
                }
                None => renderer.render(&present_sales(reports.sales(&filter).await?)),
            }
        }
        ReportCommand::DaySales { from, to, export } => {
            let filter = DaySalesFilter {
                start_date: from,
                end_date: to,
            };
            filter.validate()?;
            let reports = ctx.api()?.reports();
            match export {
                Some(path) => {
                    let csv = reports.export_day_sales(&filter).await?;
                    renderer.render(&write_export(path, csv)?)
                }
                None => renderer.render(&present_day_sales(reports.day_sales(&filter).await?)),
            }
        }
    }
}

fn write_export(path: PathBuf, csv: Vec<u8>) -> Result<FileWrittenViewModel> {
    std::fs::write(&path, &csv).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(FileWrittenViewModel {
        path,
        bytes: csv.len(),
    })
}

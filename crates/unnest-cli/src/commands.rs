use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};
use unnest_cli::input::{load_data, load_schema};
use unnest_cli::output::{OutputFormat, render_output};
use unnest_cli::select::{compare_cells, exclude, group_key, keep_only};
use unnest_core::Unnest;

use crate::cli::{ColumnsArgs, FlattenArgs, OutputFormatArg};

pub fn run_flatten(args: &FlattenArgs) -> Result<()> {
    let span = info_span!("flatten", data = %args.data.display());
    let _guard = span.enter();

    let data = load_data(&args.data)?;
    let property = load_schema(&args.schema)?;
    info!(columns = property.column_names().len(), "schema loaded");

    let mut unnest = Unnest::from_value(&data);
    if let Some(field) = &args.group_by {
        unnest = unnest.with_key(move |item, index, _| group_key(item, field, index));
    }
    let mut table = unnest.by(&property);

    if !args.exclude.is_empty() {
        let filter = exclude(&args.exclude);
        table = table.filter(|_, _, _| filter.clone());
    }
    if !args.columns.is_empty() {
        for column in &args.columns {
            if !table.columns().contains(column) {
                warn!(column = %column, "requested column is not produced by the schema");
            }
        }
        let filter = keep_only(table.columns(), &args.columns);
        table = table.filter(|_, _, _| filter.clone());
    }
    if let Some(column) = &args.sort_by {
        table = table.sort(|a, b| compare_cells(a.cell(column), b.cell(column)));
    }
    info!(rows = table.len(), groups = table.groups().len(), "flattened");

    let columns = (!args.columns.is_empty()).then_some(args.columns.as_slice());
    let rendered = render_output(&table, output_format(args.format), columns)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered + "\n").with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let property = load_schema(&args.schema)?;
    let reused = property.reused_ancestor_names();
    if !reused.is_empty() {
        warn!(columns = ?reused, "schema reuses ancestor column names");
    }
    let shared = property.reused_names();
    if !shared.is_empty() {
        info!(columns = ?shared, "columns written by more than one field");
    }
    for column in property.column_names() {
        println!("{column}");
    }
    Ok(())
}

fn output_format(format: OutputFormatArg) -> OutputFormat {
    match format {
        OutputFormatArg::Markdown => OutputFormat::Markdown,
        OutputFormatArg::Table => OutputFormat::Table,
        OutputFormatArg::Json => OutputFormat::Json,
        OutputFormatArg::Data => OutputFormat::Data,
    }
}

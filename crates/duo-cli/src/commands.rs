use std::time::Instant;

use anyhow::{Context, Result, bail};
use duo_aggregate::{AggregateOptions, LabelFilter};
use duo_ingest::LoadOptions;
use duo_map::{load_mapping_file, parse_assignment, parse_selection};
use duo_model::SemanticLabel;
use tracing::{info, info_span};

use crate::cli::{DatasetArgs, GroupedArgs, OutputFormatArg, ShareArgs};
use crate::summary::{
    print_inspect, print_json, print_kpi, print_labels, print_rate, print_share, print_totals,
};
use duo_cli::kpi::build_kpi_report;
use duo_cli::session::Session;

pub fn run_labels(format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => print_labels(),
        OutputFormatArg::Json => {
            let labels: Vec<_> = SemanticLabel::ALL
                .iter()
                .map(|label| {
                    serde_json::json!({
                        "key": label.key(),
                        "description": label.description(),
                    })
                })
                .collect();
            print_json(&labels)?;
        }
    }
    Ok(())
}

pub fn run_inspect(args: &DatasetArgs) -> Result<()> {
    let session = open_session(args)?;
    let profile = session.profile().context("no dataset loaded")?;
    let mapping = session.mapping_report();
    match args.format {
        OutputFormatArg::Table => print_inspect(&profile, &mapping, &session.mapping().summary()),
        OutputFormatArg::Json => {
            let mapping: Vec<_> = mapping
                .iter()
                .map(|(label, column, status)| {
                    serde_json::json!({
                        "label": label,
                        "column": column,
                        "status": status.as_str(),
                    })
                })
                .collect();
            print_json(&serde_json::json!({ "profile": profile, "mapping": mapping }))?;
        }
    }
    Ok(())
}

pub fn run_rate(args: &GroupedArgs) -> Result<()> {
    let session = open_session(&args.dataset)?;
    let table = session.rate(&args.by)?;
    match args.dataset.format {
        OutputFormatArg::Table => print_rate(table.as_ref()),
        OutputFormatArg::Json => print_json(&table)?,
    }
    Ok(())
}

pub fn run_share(args: &ShareArgs) -> Result<()> {
    let session = open_session(&args.dataset)?;
    let table = session.share(args.by)?;
    match args.dataset.format {
        OutputFormatArg::Table => print_share(args.by, table.as_ref()),
        OutputFormatArg::Json => print_json(&table)?,
    }
    Ok(())
}

pub fn run_totals(args: &GroupedArgs) -> Result<()> {
    let session = open_session(&args.dataset)?;
    let table = session.totals(&args.by)?;
    match args.dataset.format {
        OutputFormatArg::Table => print_totals(table.as_ref()),
        OutputFormatArg::Json => print_json(&table)?,
    }
    Ok(())
}

pub fn run_kpi(args: &DatasetArgs) -> Result<()> {
    let session = open_session(args)?;
    let start = Instant::now();
    let report = build_kpi_report(&session)?;
    info!(duration_ms = start.elapsed().as_millis(), "kpi finished");
    match args.format {
        OutputFormatArg::Table => print_kpi(&report),
        OutputFormatArg::Json => print_json(&report)?,
    }
    Ok(())
}

/// Loads the dataset and layers the mapping file, `--map` and `--filter`
/// arguments onto a fresh session.
fn open_session(args: &DatasetArgs) -> Result<Session> {
    let span = info_span!("dataset", file = %args.file.display());
    let _guard = span.enter();

    if !args.separator.is_ascii() {
        bail!("separator must be a single ASCII character, got '{}'", args.separator);
    }
    let load_options = LoadOptions::default()
        .with_separator(args.separator as u8)
        .with_encoding(args.encoding);
    let options = if args.strict_indicator {
        AggregateOptions::strict()
    } else {
        AggregateOptions::default()
    };

    let mut session = Session::new(options);
    session.load(&args.file, &load_options)?;

    if let Some(path) = &args.mapping_file {
        let mapping = load_mapping_file(path)?;
        session.mapping_mut().apply(&mapping);
    }
    for raw in &args.map {
        let (label, choice) = parse_assignment(raw)?;
        session.mapping_mut().assign(label, choice);
    }

    let filters = args
        .filter
        .iter()
        .map(|raw| parse_selection(raw).map(|(label, values)| LabelFilter::new(label, values)))
        .collect::<Result<Vec<_>, _>>()?;
    session.set_filters(filters);
    Ok(session)
}

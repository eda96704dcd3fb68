use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use docchain_dag::ChainIndex;
use docchain_ledger::{format_signed_amount, BalanceProjection};
use docchain_panel::{InMemoryChainSource, PanelBody, PanelDriver, PanelProps, PanelView};
use docchain_registry::Registry;
use docchain_render::{
    navigate_via_registry, render_chain, ChainView, RenderConfig, Timeline, TimelineWriter,
};
use docchain_scenarios::scenarios_for;
use docchain_server::{seed_guide_chains, DocchainServer};
use docchain_types::status::normalize_status;
use docchain_types::{classify, ChainGraph, DocumentType};

use crate::cli::*;
use crate::config::DocchainConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DocchainConfig::load(&cli.config)?;
    let format = cli.format;
    let output = match cli.command {
        Command::Types => cmd_types(format)?,
        Command::Guide(args) => cmd_guide(args, &config, format)?,
        Command::Render(args) => cmd_render(args, &config, format)?,
        Command::Classify(args) => cmd_classify(args, format)?,
        Command::Inspect(args) => cmd_inspect(args, &config, format)?,
        Command::Panel(args) => cmd_panel(args, &config, format)?,
        Command::Serve(args) => return cmd_serve(args, config),
    };
    print!("{output}");
    Ok(())
}

fn writer(config: &RenderConfig) -> TimelineWriter {
    TimelineWriter {
        plain: !std::io::stdout().is_terminal(),
        show_running_balance: config.show_running_balance,
    }
}

fn read_graph(path: &Path) -> anyhow::Result<ChainGraph> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ChainGraph::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

/// A chains file holds one graph or an array of graphs.
fn read_graphs(path: &Path) -> anyhow::Result<Vec<ChainGraph>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let graphs = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(graphs)
}

fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_types(format: OutputFormat) -> anyhow::Result<String> {
    let descriptors = Registry::new().all();
    if format == OutputFormat::Json {
        return to_json(&descriptors);
    }
    let mut out = String::new();
    for d in &descriptors {
        let sign = if d.sign.factor() < 0 { "-" } else { "+" };
        out.push_str(&format!(
            "{} {:<18} {:<20} {} {}\n",
            d.icon.glyph(),
            d.doc_type.tag().bold(),
            d.label,
            sign,
            d.route.unwrap_or("-").dimmed()
        ));
    }
    Ok(out)
}

fn cmd_guide(
    args: GuideArgs,
    config: &DocchainConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let doc_type = DocumentType::from_tag(&args.doc_type);
    if doc_type.is_other() {
        bail!("unknown document type: {}", args.doc_type);
    }
    let scenarios = scenarios_for(&doc_type);
    if format == OutputFormat::Json {
        return to_json(&scenarios);
    }

    let descriptor = Registry::new().lookup(&doc_type);
    let mut out = format!("{} {}\n", descriptor.icon.glyph(), descriptor.label.bold());
    for scenario in &scenarios {
        out.push_str(&format!("\n{}\n", scenario.title.yellow().bold()));
        out.push_str(&format!("  When: {}\n", scenario.when));
        for (i, step) in scenario.steps.iter().enumerate() {
            out.push_str(&format!("  {}. {step}\n", i + 1));
        }
        if let Some(timeline) = render_chain(&ChainView::guide(&scenario.example), &config.render)
        {
            out.push('\n');
            out.push_str(&writer(&config.render).write(&timeline));
        }
    }
    Ok(out)
}

fn cmd_render(
    args: RenderArgs,
    config: &DocchainConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let graph = read_graph(&args.file)?;
    let mut render = config.render.clone();
    if let Some(currency) = args.currency {
        render.currency = currency;
    }
    let view = if args.live {
        ChainView::live(&graph)
    } else {
        ChainView::guide(&graph)
    };

    let Some(timeline) = render_chain(&view, &render) else {
        return match format {
            OutputFormat::Json => Ok("null\n".into()),
            OutputFormat::Text => Ok(format!("{}\n", "empty chain, nothing to render".dimmed())),
        };
    };

    match format {
        OutputFormat::Json => to_json(&timeline),
        OutputFormat::Text => {
            let mut out = writer(&render).write(&timeline);
            if args.live {
                out.push_str(&navigation_listing(&timeline));
            }
            Ok(out)
        }
    }
}

/// Where each live entry would navigate, resolved through the registry.
fn navigation_listing(timeline: &Timeline) -> String {
    let mut out = String::from("\nLinks:\n");
    for (i, entry) in timeline.entries.iter().enumerate() {
        let mut resolved = None;
        {
            let mut navigate = navigate_via_registry(|path: &str| resolved = Some(path.to_string()));
            timeline.activate(i, &mut navigate);
        }
        let path = resolved.unwrap_or_else(|| "(no page)".to_string());
        out.push_str(&format!("  {:<16} {}\n", entry.reference, path.cyan()));
    }
    out
}

fn cmd_classify(args: ClassifyArgs, format: OutputFormat) -> anyhow::Result<String> {
    let posture = classify(Some(&args.status));
    let normalized = normalize_status(&args.status);
    match format {
        OutputFormat::Json => to_json(&json!({
            "status": args.status,
            "normalized": normalized,
            "posture": posture,
        })),
        OutputFormat::Text => {
            let label = if posture.is_posted() {
                "posted".red().bold()
            } else {
                "editable".green().bold()
            };
            Ok(format!("{} ({normalized}) is {label}\n", args.status))
        }
    }
}

fn cmd_inspect(
    args: InspectArgs,
    config: &DocchainConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let graph = read_graph(&args.file)?;
    let report = ChainIndex::new(&graph).inspect();
    let projection = BalanceProjection::build_with_derived_summary(&graph);

    if format == OutputFormat::Json {
        return to_json(&json!({
            "report": report,
            "order": projection.order.iter().map(|n| &n.id).collect::<Vec<_>>(),
            "running": projection.running.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
            "summaryDerived": projection.summary_derived,
        }));
    }

    let currency = config.render.currency.as_str();
    let mut out = format!(
        "Root: {}\nNodes: {}  Edges: {}\n",
        report.root.as_deref().unwrap_or("-").bold(),
        graph.nodes.len(),
        graph.edges.len()
    );
    for (node, _, balance) in projection.rows() {
        out.push_str(&format!(
            "  {:<20} {:>18}  {}\n",
            node.id,
            format_signed_amount(node.amount, currency),
            format_signed_amount(balance, currency).dimmed()
        ));
    }
    if let Some(summary) = &projection.summary {
        let origin = if projection.summary_derived { " (derived)" } else { "" };
        out.push_str(&format!(
            "Balance: {}{origin}\n",
            format_signed_amount(summary.balance, currency)
        ));
    }
    if report.is_well_formed() {
        out.push_str(&format!("{} single lineage, no anomalies\n", "✓".green().bold()));
    } else {
        for finding in report.findings() {
            out.push_str(&format!("{} {finding}\n", "!".yellow().bold()));
        }
    }
    Ok(out)
}

fn cmd_panel(
    args: PanelArgs,
    config: &DocchainConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let source = InMemoryChainSource::new();
    match &args.chains {
        Some(path) => {
            for graph in read_graphs(path)? {
                source.insert_chain(graph)?;
            }
        }
        None => {
            seed_guide_chains(&source)?;
        }
    }

    let toggle = args.toggle;
    let doc_type = DocumentType::from_tag(&args.doc_type);
    let props = PanelProps {
        document_type: doc_type,
        document_id: args.doc_id,
        document_status: args.status,
        allowed_actions: Vec::new(),
        compact: false,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let view = runtime.block_on(async {
        let mut driver = PanelDriver::mount(Arc::new(source), props).await;
        if toggle {
            driver.toggle().await
        } else {
            driver.view()
        }
    });

    match format {
        OutputFormat::Json => to_json(&view),
        OutputFormat::Text => Ok(panel_text(&view, &config.render)),
    }
}

fn panel_text(view: &PanelView, config: &RenderConfig) -> String {
    let state = serde_json::to_value(view.state)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let mut out = format!("{} [{}]\n", view.title.bold(), state.dimmed());
    if let Some(notice) = &view.immutability_notice {
        out.push_str(&format!("{} {notice}\n", "🔒".yellow()));
    }
    match &view.body {
        PanelBody::Empty => {}
        PanelBody::Loading => out.push_str("Loading...\n"),
        PanelBody::Timeline { timeline } => out.push_str(&writer(config).write(timeline)),
        PanelBody::OriginalDocument { message } => out.push_str(&format!("{message}\n")),
        PanelBody::Error {
            message,
            retry_label,
        } => out.push_str(&format!("{} {message}  [{retry_label}]\n", "✗".red().bold())),
    }
    for action in &view.actions {
        out.push_str(&format!("  → {} {}\n", action.label, action.href.dimmed()));
    }
    out
}

fn cmd_serve(args: ServeArgs, config: DocchainConfig) -> anyhow::Result<()> {
    let mut server_config = config.server;
    if let Some(bind) = args.bind {
        server_config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if args.no_seed {
        server_config.seed_guide_chains = false;
    }

    let server = DocchainServer::new(server_config)?;
    println!(
        "{} docchain server on {}",
        "✓".green().bold(),
        server.config().bind_addr.to_string().bold()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

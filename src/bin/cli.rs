//! Binary entry point for the pathgraph demo CLI.
#![forbid(unsafe_code)]

#[path = "cli/config.rs"]
mod config;
#[path = "cli/scene.rs"]
mod scene;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pathgraph::{logging, NodeId, RevisitPolicy, Route};
use serde::Serialize;

use config::CliConfig;
use scene::Scene;

#[derive(Parser, Debug)]
#[command(
    name = "pathgraph",
    version,
    about = "Build a demo graph and search it with A*",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for the search report"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "PATHGRAPH_CONFIG",
        help = "CLI config file (TOML)"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        value_name = "FILTER",
        help = "tracing filter, e.g. pathgraph=debug"
    )]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long, global = true, help = "Registry capacity override")]
    capacity: Option<usize>,

    #[arg(
        long,
        global = true,
        value_enum,
        help = "Revisit rule for settled nodes"
    )]
    revisit: Option<RevisitArg>,

    #[arg(long, global = true, help = "Abort after this many expansions")]
    max_expansions: Option<usize>,

    #[arg(long, global = true, help = "Source node id (defaults to the first node)")]
    from: Option<u64>,

    #[arg(long, global = true, help = "Goal node id (defaults to the last node)")]
    to: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Search a 4-connected grid")]
    Grid {
        #[arg(long, default_value_t = 16)]
        width: u64,

        #[arg(long, default_value_t = 16)]
        height: u64,

        #[arg(
            long,
            default_value_t = 0.0,
            help = "Probability that a cell is blocked"
        )]
        blocked: f64,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },

    #[command(about = "Search random points joined by random directed links")]
    Random {
        #[arg(long, default_value_t = 64)]
        nodes: u64,

        #[arg(long, default_value_t = 256)]
        links: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum RevisitArg {
    PredecessorOnly,
    ClosedSet,
}

impl From<RevisitArg> for RevisitPolicy {
    fn from(arg: RevisitArg) -> Self {
        match arg {
            RevisitArg::PredecessorOnly => RevisitPolicy::PredecessorOnly,
            RevisitArg::ClosedSet => RevisitPolicy::ClosedSet,
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchReport {
    nodes: usize,
    links: usize,
    from: u64,
    to: u64,
    found: bool,
    path: Vec<u64>,
    cost: Option<f64>,
    expansions: Option<usize>,
}

impl SearchReport {
    fn new(scene: &Scene, from: NodeId, to: NodeId, route: Option<Route>) -> Self {
        Self {
            nodes: scene.graph.node_count(),
            links: scene.graph.link_count(),
            from: from.0,
            to: to.0,
            found: route.is_some(),
            path: route
                .as_ref()
                .map(|r| r.path.iter().map(|id| id.0).collect())
                .unwrap_or_default(),
            cost: route.as_ref().map(|r| r.cost),
            expansions: route.as_ref().map(|r| r.expansions),
        }
    }
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool, Box<dyn Error>> {
    let cli = Cli::parse();
    let cfg = CliConfig::load(cli.config.clone())?;
    if let Some(filter) = cli.log.as_deref().or(cfg.log.as_deref()) {
        logging::init_logging(filter)?;
    }
    let graph_opts = cfg.graph_options(cli.search.capacity);
    let nav_opts = cfg.navigate_options(
        cli.search.revisit.map(RevisitPolicy::from),
        cli.search.max_expansions,
    );

    let (scene, default_to) = match cli.command {
        Command::Grid {
            width,
            height,
            blocked,
            seed,
        } => {
            if !(0.0..=1.0).contains(&blocked) {
                return Err("--blocked must be within [0, 1]".into());
            }
            let cells = width
                .checked_mul(height)
                .ok_or("grid dimensions overflow the node id space")?;
            let endpoints = endpoints(&cli.search, cells);
            let scene = Scene::grid(graph_opts, width, height, blocked, seed, &endpoints)?;
            (scene, cells)
        }
        Command::Random { nodes, links, seed } => {
            (Scene::random(graph_opts, nodes, links, seed)?, nodes)
        }
    };
    let from = NodeId(cli.search.from.unwrap_or(1));
    let to = NodeId(cli.search.to.unwrap_or(default_to));
    let route = scene.navigate(from, to, nav_opts)?;
    let report = SearchReport::new(&scene, from, to, route);
    emit(&cli.format, &report, print_report_text)?;
    Ok(report.found)
}

fn endpoints(search: &SearchArgs, last: u64) -> [NodeId; 2] {
    [
        NodeId(search.from.unwrap_or(1)),
        NodeId(search.to.unwrap_or(last)),
    ]
}

fn emit<T, F>(format: &OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: serde::Serialize,
    F: Fn(&T),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(value),
    }
    Ok(())
}

fn print_report_text(report: &SearchReport) {
    println!("Graph:");
    println!("  nodes: {}", report.nodes);
    println!("  links: {}", report.links);
    println!("Search {} -> {}:", report.from, report.to);
    if !report.found {
        println!("  found: no");
        return;
    }
    let path: Vec<String> = report.path.iter().map(|id| id.to_string()).collect();
    println!("  found: yes");
    println!("  path: {}", path.join(" -> "));
    if let Some(cost) = report.cost {
        println!("  cost: {cost:.3}");
    }
    if let Some(expansions) = report.expansions {
        println!("  expansions: {expansions}");
    }
}

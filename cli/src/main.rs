use clap::Parser;
use anyhow::{Context, Result};
use gltf_inspector::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gltf-inspect")]
#[command(about = "Decodes glTF accessors and mesh primitives into a readable tree")]
struct Cli {
    /// Input .gltf or .glb file
    input: String,

    /// What to inspect, e.g. `/accessors/3` or `/meshes/0/primitives/1`
    pointer: Option<String>,

    /// Print the contents of page groups instead of collapsing them
    #[arg(long)]
    expand: bool,

    /// Print the decoded result as JSON instead of a tree
    #[arg(long)]
    json: bool,

    /// Select tree nodes by child positions below the root, e.g. `0.3` or `1.0.42`
    #[arg(long, num_args = 1.., value_parser = parse_node_path)]
    select: Vec<NodePath>,

    /// Maximum number of vertices, and separately of primitives, in a selection
    #[arg(long)]
    selection_limit: Option<usize>,

    /// List the pointers the file can be inspected at
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Debug)]
struct NodePath(Vec<usize>);

fn parse_node_path(s: &str) -> Result<NodePath, String> {
    s.split('.')
        .map(|p| p.parse::<usize>().map_err(|_| format!("`{}` is not a node path", s)))
        .collect::<Result<Vec<_>, _>>()
        .map(NodePath)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let asset = GltfAsset::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input))?;
    tracing::debug!(input = %cli.input, accessors = asset.document().accessors().len(), "loaded asset");

    if cli.list {
        for pointer in asset.pointers() {
            println!("{}", pointer);
        }
        return Ok(());
    }

    let pointer = cli.pointer.as_deref()
        .context("A pointer is required unless --list is given")?;

    if cli.json {
        let inspection = Inspection::run(&asset, pointer)?;
        println!("{}", serde_json::to_string_pretty(&inspection)?);
        return Ok(());
    }

    let mut cfg = inspect::Config::default();
    if let Some(limit) = cli.selection_limit {
        cfg.selection_limit = limit;
    }
    let mut inspector = Inspector::new(asset, cfg);
    let tree = inspector.inspect(pointer)?;
    print_node(tree, 0, cli.expand);

    if !cli.select.is_empty() {
        let paths = cli.select.into_iter().map(|p| p.0).collect::<Vec<_>>();
        let selection = inspector.select(&paths)?;
        println!();
        println!("selected vertices: {:?}", selection.vertices);
        println!("selected primitives: {:?}", selection.primitives);
        for notice in selection.notices() {
            println!("{}", notice);
        }
    }
    Ok(())
}

fn print_node(node: &InspectNode, depth: usize, expand: bool) {
    let indent = "  ".repeat(depth);
    match node.description() {
        Some(description) => println!("{}{}  {}", indent, node.label(), description),
        None => println!("{}{}", indent, node.label()),
    }

    if matches!(node, InspectNode::PageGroup(_)) && !expand {
        return;
    }
    for child in node.children().iter() {
        print_node(child, depth + 1, expand);
    }
}

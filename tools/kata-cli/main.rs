use clap::{Parser, Subcommand};
use kata::prelude::*;
use serde::Deserialize;
use std::fs;

// --- JSON Deserialization Structs (Input Format Specific) ---
// A saved editor graph: placed nodes by id, then the edges in the order the
// user drew them. Only the replay below reads this format.

#[derive(Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(alias = "typeKey", alias = "type")]
    type_key: String,
}

#[derive(Deserialize)]
struct RawEdge {
    source: String,
    #[serde(alias = "sourceHandle")]
    source_handle: String,
    target: String,
    #[serde(alias = "targetHandle")]
    target_handle: String,
}

/// Type checks node graphs against a node catalog
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a graph's edges and report which ones are accepted
    Check {
        /// Path to the node catalog JSON file
        catalog_path: String,
        /// Path to the graph JSON file
        graph_path: String,
    },
    /// Print the search documents of every searchable node type
    Tags {
        /// Path to the node catalog JSON file
        catalog_path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kata=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            catalog_path,
            graph_path,
        } => run_check(&catalog_path, &graph_path),
        Command::Tags { catalog_path } => run_tags(&catalog_path),
    }
}

fn load_registry(catalog_path: &str) -> NodeRegistry {
    let catalog = Catalog::from_file(catalog_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let mut registry = NodeRegistry::new();
    let count = catalog
        .register_into(&mut registry)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("-> Loaded {} node types from {}", count, catalog_path);
    registry
}

fn run_check(catalog_path: &str, graph_path: &str) {
    let registry = load_registry(catalog_path);

    let content = fs::read_to_string(graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Could not read graph file '{}': {}", graph_path, e))
    });
    let raw: RawGraph = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    let mut graph = GraphInstance::new();
    for node in &raw.nodes {
        graph
            .insert_node(node.id.clone(), &registry, &node.type_key)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    }

    println!("\n--- Edges ---");
    let mut rejected = 0;
    for edge in &raw.edges {
        let outcome = graph
            .propose_edge(
                &edge.source,
                &edge.source_handle,
                &edge.target,
                &edge.target_handle,
            )
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        let label = format!(
            "{}.{} -> {}.{}",
            edge.source, edge.source_handle, edge.target, edge.target_handle
        );
        match outcome {
            EdgeOutcome::Committed { resolved, .. } if resolved.is_empty() => {
                println!("  [ok]       {}", label);
            }
            EdgeOutcome::Committed { resolved, .. } => {
                println!("  [ok]       {} (resolved: {})", label, resolved.join(", "));
            }
            EdgeOutcome::Rejected(reason) => {
                rejected += 1;
                println!("  [rejected] {}: {}", label, reason);
            }
        }
    }

    println!("\n--- Nodes ---");
    for node in graph.nodes() {
        println!("  {} ({})", node.id, node.type_key);
        for slot in node.definition().inputs().chain(node.definition().outputs()) {
            println!("    {:<6} {}: {}", slot.source.to_string(), slot.name, slot.type_label());
        }
        let generics = node.definition().generic_types();
        if !generics.is_empty() {
            let names: Vec<&str> = generics.iter().map(String::as_str).collect();
            println!("    unresolved: {}", names.join(", "));
        }
    }

    println!(
        "\n-> {} of {} edges accepted",
        raw.edges.len() - rejected,
        raw.edges.len()
    );
}

fn run_tags(catalog_path: &str) {
    let registry = load_registry(catalog_path);
    let json = serde_json::to_string_pretty(&registry.documents())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize documents: {}", e)));
    println!("{}", json);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

//! Wayfind Playback Server
//!
//! Seed a demo graph and serve the playback API.

use std::env;

use wayfind_graph::{Edge, Graph, Node, NodeId};
use wayfind_search::dijkstra;
use wayfind_vis::VisServer;

/// Eight nodes on two rows with one diagonal shortcut. Weights stay at
/// or above straight-line distance so the A* heuristic is admissible.
fn demo_scene() -> (Vec<Node>, Vec<Edge>) {
    let nodes = vec![
        Node::new(NodeId(1), 0.0, 0.0),
        Node::new(NodeId(2), 3.0, 0.0),
        Node::new(NodeId(3), 6.0, 0.0),
        Node::new(NodeId(4), 9.0, 0.0),
        Node::new(NodeId(5), 0.0, 3.0),
        Node::new(NodeId(6), 3.0, 3.0),
        Node::new(NodeId(7), 6.0, 3.0),
        Node::new(NodeId(8), 9.0, 3.0),
    ];
    let edges = vec![
        Edge::new(NodeId(1), NodeId(2), 3.0),
        Edge::new(NodeId(2), NodeId(3), 3.0),
        Edge::new(NodeId(3), NodeId(4), 3.0),
        Edge::new(NodeId(5), NodeId(6), 3.0),
        Edge::new(NodeId(6), NodeId(7), 3.0),
        Edge::new(NodeId(7), NodeId(8), 3.0),
        Edge::new(NodeId(1), NodeId(5), 3.0),
        Edge::new(NodeId(2), NodeId(6), 3.0),
        Edge::new(NodeId(3), NodeId(7), 3.0),
        Edge::new(NodeId(4), NodeId(8), 3.0),
        Edge::new(NodeId(2), NodeId(7), 5.0),
    ];
    (nodes, edges)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line args
    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3000);

    let (nodes, edges) = demo_scene();
    let graph = Graph::build(&nodes, &edges, false);

    println!("Wayfind Playback Server");
    println!("=======================");
    println!();
    println!("Seeded demo graph:");
    println!("  Nodes: {}", nodes.len());
    println!("  Edges: {}", edges.len());
    println!();
    println!("Shortest distances from node 1:");
    for row in dijkstra::distance_table(&graph, NodeId(1)) {
        match row.distance {
            Some(distance) => println!("  {} -> {}", row.node, distance),
            None => println!("  {} -> unreachable", row.node),
        }
    }
    println!();
    println!("Starting playback server on http://localhost:{}", port);
    println!("POST /api/graph to replace the demo graph, /api/search/start to animate.");
    println!();

    let server = VisServer::with_scene(nodes, &edges, false);
    server.serve(port).await?;

    Ok(())
}

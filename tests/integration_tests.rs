//! Integration tests for graphpipes.
//!
//! Run with: `cargo test --test integration_tests`
//!
//! These tests validate end-to-end traversals spanning both subsystems:
//! graph scans feeding lazy pipe chains, and process networks wired from
//! source to sink over bounded channels.

use std::collections::HashSet;
use std::sync::Arc;

use graphpipes::{
    AdjacencyGraph, AggregatorPipe, Channel, ChannelReader, CopySplitPipe, CountPipe, Edge,
    EdgeVertexProcess, Endpoint, FilterPipe, Graph, IdentityProcess, Pipe, Pipeline,
    ProcessNetwork, SideEffectPipe,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The toy graph used throughout: vertex "1" has three outgoing edges to
/// "2", "3", "4"; vertex "4" has outgoing edges to "3" and "5".
fn toy_graph() -> AdjacencyGraph {
    let mut g = AdjacencyGraph::new();
    g.add_edge("1", "knows", "2");
    g.add_edge("1", "knows", "3");
    g.add_edge("1", "created", "4");
    g.add_edge("4", "created", "3");
    g.add_edge("4", "created", "5");
    g
}

#[test]
fn test_edge_to_vertex_in_endpoint_from_vertex_one() {
    init_logging();
    let graph = toy_graph();

    let edges = Arc::new(Channel::new(4));
    let vertices = Arc::new(Channel::new(4));

    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&edges), graph.out_edges(&"1".to_string()));
    network.spawn_process(
        EdgeVertexProcess::new(Endpoint::In),
        Arc::clone(&edges),
        Arc::clone(&vertices),
    );

    let mut seen = HashSet::new();
    let mut count = 0;
    while let Some(vertex) = vertices.read() {
        seen.insert(vertex);
        count += 1;
    }

    let expected: HashSet<String> =
        ["2", "3", "4"].iter().map(|s| (*s).to_string()).collect();
    assert_eq!(seen, expected);
    assert_eq!(count, 3);
    network.join().unwrap();
}

#[test]
fn test_edge_to_vertex_in_endpoint_from_vertex_four() {
    init_logging();
    let graph = toy_graph();

    let edges = Arc::new(Channel::new(4));
    let vertices = Arc::new(Channel::new(4));

    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&edges), graph.out_edges(&"4".to_string()));
    network.spawn_process(
        EdgeVertexProcess::new(Endpoint::In),
        Arc::clone(&edges),
        Arc::clone(&vertices),
    );

    let mut seen = HashSet::new();
    while let Some(vertex) = vertices.read() {
        seen.insert(vertex);
    }

    let expected: HashSet<String> = ["3", "5"].iter().map(|s| (*s).to_string()).collect();
    assert_eq!(seen, expected);
    network.join().unwrap();
}

#[test]
fn test_out_endpoint_selection() {
    init_logging();
    let graph = toy_graph();

    let edges = Arc::new(Channel::new(4));
    let vertices = Arc::new(Channel::new(4));

    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&edges), graph.out_edges(&"1".to_string()));
    network.spawn_process(
        EdgeVertexProcess::new(Endpoint::Out),
        Arc::clone(&edges),
        Arc::clone(&vertices),
    );

    // Every edge leaves vertex "1", so the OUT endpoint is always "1".
    let mut tails = Vec::new();
    while let Some(vertex) = vertices.read() {
        tails.push(vertex);
    }
    assert_eq!(tails, vec!["1".to_string(); 3]);
    network.join().unwrap();
}

#[test]
fn test_pipes_chain_feeds_process_network() {
    init_logging();
    let graph = toy_graph();

    // Lazy half: whole-graph edge scan, keep "created" edges only.
    let created = Pipeline::from_starts(graph.edges())
        .then(FilterPipe::new(|e: &graphpipes::LabeledEdge| e.label() == "created"))
        .unwrap();

    // Concurrent half: emit IN endpoints and count them.
    let edges = Arc::new(Channel::new(2));
    let vertices = Arc::new(Channel::new(2));
    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&edges), created);
    network.spawn_process(
        EdgeVertexProcess::new(Endpoint::In),
        Arc::clone(&edges),
        Arc::clone(&vertices),
    );
    let mut sink = ChannelReader::spawn(Arc::clone(&vertices));

    assert_eq!(sink.result(), 3); // 1->4, 4->3, 4->5
    network.join().unwrap();
}

#[test]
fn test_fan_out_branches_feed_independent_chains() {
    init_logging();
    let graph = toy_graph();

    let split = CopySplitPipe::new(graph.edges());
    let counting = split.branch();
    let labels = split.branch();

    let mut count = CountPipe::new();
    count.set_starts(Box::new(counting.ends())).unwrap();
    let drained: Vec<_> = (&mut count).ends().collect();
    assert_eq!(drained.len(), 5);
    assert_eq!(*count.side_effect(), 5);

    // The sibling branch still observes every edge exactly once.
    let seen: Vec<String> = labels.ends().map(|e| e.label().to_string()).collect();
    assert_eq!(seen, vec!["knows", "knows", "created", "created", "created"]);
}

#[test]
fn test_aggregator_over_graph_scan() {
    init_logging();
    let graph = toy_graph();

    let mut aggregate = AggregatorPipe::new();
    aggregate.set_starts(graph.vertices()).unwrap();

    let emitted: Vec<String> = (&mut aggregate).ends().collect();
    assert_eq!(emitted.len(), graph.vertex_count());
    assert_eq!(*aggregate.side_effect(), emitted);
}

#[test]
fn test_capacity_one_network_makes_progress() {
    init_logging();
    // Backpressure everywhere: every channel holds one item, yet the
    // network must still drain all of a large input.
    let a = Arc::new(Channel::new(1));
    let b = Arc::new(Channel::new(1));
    let c = Arc::new(Channel::new(1));

    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&a), 0..5_000);
    network.spawn_process(IdentityProcess::new(), Arc::clone(&a), Arc::clone(&b));
    network.spawn_process(IdentityProcess::new(), Arc::clone(&b), Arc::clone(&c));
    let mut sink = ChannelReader::spawn(Arc::clone(&c));

    assert_eq!(sink.result(), 5_000);
    network.join().unwrap();
}

#[test]
fn test_channel_fifo_preserved_across_network() {
    init_logging();
    let input = Arc::new(Channel::new(3));
    let output = Arc::new(Channel::new(3));

    let mut network = ProcessNetwork::new();
    network.spawn_source(Arc::clone(&input), 0..100);
    network.spawn_process(IdentityProcess::new(), Arc::clone(&input), Arc::clone(&output));

    let mut expected = 0;
    while let Some(item) = output.read() {
        assert_eq!(item, expected);
        expected += 1;
    }
    assert_eq!(expected, 100);
    network.join().unwrap();
}

use resumable_paths_core::{
    ControlPoint, ControlPointSet, DenseGraph, NullVisitor, ResumableSearch, SearchConfig,
    SearchGraph, SearchState, StepwiseSearch,
};
use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Instant;

type Graph = DenseGraph<u32>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: resumable-paths-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Edges are bidirectional with weights in 1..=100.");
        println!("Default node_count: 1000000. RUST_LOG=debug shows engine events.");
        return;
    }

    tracing::info!(mode = mode, node_count = node_count, "starting benchmark");

    println!("resumable-paths-bench");
    println!("=====================");
    println!();

    let generators: Vec<(&str, fn(usize) -> Graph)> = match mode {
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Scale-free (edge sampling)", gen_scale_free as fn(usize) -> Graph),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(err) = run_benchmark(name, generator, node_count) {
            eprintln!("{}: {}", name, err);
        }
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: fn(usize) -> Graph,
    node_count: usize,
) -> resumable_paths_core::Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Exhaustive search from node 0, the reference for the runs below
    println!();
    let t = Instant::now();
    let plain = resumable_paths_core::shortest_path_plain(&graph, 0, SearchConfig::default())?;
    let reached = (0..graph.vertex_count())
        .filter(|&v| plain.distance(v) != u32::MAX)
        .count();
    println!("Plain: {} reached in {:.1}ms", reached, ms(t));

    // Distance-bounded searches
    println!();
    println!("{:>8} {:>12} {:>10}", "bound", "finalised", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");
    for bound in [10u32, 50, 100, 250, 500, 1000] {
        let t = Instant::now();
        let state = resumable_paths_core::shortest_path_within_distance(
            &graph,
            0,
            bound,
            SearchConfig::default(),
        )?;
        let elapsed = ms(t);
        let finalised = count_finalised(&state);
        println!("{:>8} {:>12} {:>8.1}ms", bound, finalised, elapsed);
        if state.is_queue_empty() {
            println!("{:>8} (entire component reached)", "");
            break;
        }
    }

    // Point to point: node 0 to last node
    let far_node = graph.vertex_count() - 1;
    println!();
    let t = Instant::now();
    let path = resumable_paths_core::shortest_path(&graph, 0, far_node, SearchConfig::default())?;
    let elapsed = ms(t);
    match path {
        Some(p) => println!(
            "Shortest path 0 -> {}: {} hops, distance {} in {:.1}ms",
            far_node,
            p.hops(),
            p.distance,
            elapsed
        ),
        None => println!("Shortest path 0 -> {}: no path ({:.1}ms)", far_node, elapsed),
    }

    // Same exhaustive search in fixed-size chunks
    println!();
    println!("{:>10} {:>8} {:>10} {:>8}", "chunk", "calls", "time", "same");
    println!("{:->10} {:->8} {:->10} {:->8}", "", "", "", "");
    for chunk in [1_000usize, 10_000, 100_000] {
        let t = Instant::now();
        let mut search = ResumableSearch::from_graph(&graph, SearchConfig::default())?;
        search.init_from_source(0, &mut NullVisitor);
        let mut calls = 0;
        loop {
            calls += 1;
            let pops = Cell::new(0usize);
            let budget = || {
                pops.set(pops.get() + 1);
                pops.get() > chunk
            };
            if search.expand(&budget, &mut NullVisitor)? {
                break;
            }
        }
        let elapsed = ms(t);
        let same = same_distances(&plain, search.state());
        println!("{:>10} {:>8} {:>8.1}ms {:>8}", chunk, calls, elapsed, same);
    }

    // Stepwise, suspending at every finish_vertex and at every event
    println!();
    for (label, points) in [
        ("finish", ControlPointSet::only(ControlPoint::FinishVertex)),
        ("all", ControlPointSet::all()),
    ] {
        let t = Instant::now();
        let mut search =
            StepwiseSearch::from_graph(&graph, SearchConfig::default(), [0], points)?;
        let mut steps = 0usize;
        while search.advance()? {
            steps += 1;
        }
        let elapsed = ms(t);
        let same = same_distances(&plain, search.state());
        println!(
            "Stepwise ({}): {} steps in {:.1}ms, same={}",
            label, steps, elapsed, same
        );
    }
    println!();
    Ok(())
}

fn count_finalised(state: &SearchState<'_, Graph>) -> usize {
    let graph = state.graph();
    graph
        .vertices()
        .filter(|&v| state.color(v) == resumable_paths_core::Color::Black)
        .count()
}

fn same_distances(a: &SearchState<'_, Graph>, b: &SearchState<'_, Graph>) -> bool {
    a.graph().vertices().all(|v| a.distance(v) == b.distance(v))
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    fn index(&mut self, max: usize) -> usize {
        self.next(max as u64) as usize
    }
    fn weight(&mut self) -> u32 {
        self.next(100) as u32 + 1
    }
}

/// Edge list where every undirected edge is stored in both directions.
struct EdgeList(Vec<(usize, usize, u32)>);

impl EdgeList {
    fn with_capacity(edges: usize) -> Self {
        Self(Vec::with_capacity(edges * 2))
    }

    fn connect(&mut self, a: usize, b: usize, w: u32) {
        self.0.push((a, b, w));
        self.0.push((b, a, w));
    }

    fn build(self, node_count: usize) -> Graph {
        DenseGraph::from_edges(node_count, self.0)
    }
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge and connecting
/// to one of its endpoints. Nodes with more edges are more likely to be picked.
fn gen_scale_free(node_count: usize) -> Graph {
    let edges_per_node = 10usize;
    let mut edges = EdgeList::with_capacity(node_count * edges_per_node);
    let mut rng = FastRng::new(12345);

    // Edge list for O(1) preferential attachment sampling
    let mut edge_endpoints: Vec<usize> = Vec::with_capacity(node_count * edges_per_node * 2);

    // Seed: small clique
    let seed = 5usize.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.connect(i, j, rng.weight());
            edge_endpoints.push(i);
            edge_endpoints.push(j);
        }
    }

    // Grow: each new node attaches to `edges_per_node` existing nodes
    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            // proportional to degree
            let target = edge_endpoints[rng.index(edge_endpoints.len())];
            if target != new_node {
                edges.connect(new_node, target, rng.weight());
                edge_endpoints.push(new_node);
                edge_endpoints.push(target);
            }
        }
    }

    edges.build(node_count)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Start with each node connected to K nearest neighbors on a ring,
/// then rewire each edge with probability p. Produces high clustering
/// with short path lengths.
fn gen_small_world(node_count: usize) -> Graph {
    let k = 10usize; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut edges = EdgeList::with_capacity(node_count * k);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            let w = rng.weight();
            if rng.next_f64() < p {
                let rewired = rng.index(node_count);
                if rewired != i {
                    edges.connect(i, rewired, w);
                } else {
                    edges.connect(i, neighbor, w);
                }
            } else {
                edges.connect(i, neighbor, w);
            }
        }
    }

    edges.build(node_count)
}

/// Erdos-Renyi: uniform random edges, ~10 per node on average.
fn gen_random(node_count: usize) -> Graph {
    let target_edges = node_count * 10;
    let mut edges = EdgeList::with_capacity(target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.index(node_count);
        let to = rng.index(node_count);
        if from != to {
            edges.connect(from, to, rng.weight());
        }
    }

    edges.build(node_count)
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Worst case for "find path through bottleneck." Each clique has n/2 nodes
/// densely connected; they're joined by a chain of ~10 bridge nodes.
fn gen_barbell(node_count: usize) -> Graph {
    let bridge_len = 10usize;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    let mut edges = EdgeList::with_capacity(clique_size * 40 + bridge_len);
    let mut rng = FastRng::new(99999);
    if clique_size < 2 {
        return edges.build(node_count);
    }

    let b_start = clique_size + bridge_len;
    for base in [0, b_start] {
        for i in 0..clique_size {
            for _ in 0..20usize.min(clique_size - 1) {
                let target = rng.index(clique_size);
                if target != i {
                    edges.connect(base + i, base + target, rng.weight());
                }
            }
        }
    }

    // Bridge: chain from last node of A through to first node of B
    for id in clique_size - 1..b_start {
        edges.connect(id, id + 1, rng.weight());
    }

    edges.build(node_count)
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random recent "surface" node, with
/// occasional long-range jumps. Produces tree-like topology with winding paths.
fn gen_dla(node_count: usize) -> Graph {
    let mut edges = EdgeList::with_capacity(node_count * 2);
    let mut rng = FastRng::new(77777);

    // VecDeque for O(1) eviction of the oldest surface node
    let surface_max = 10000usize;
    let mut surface: VecDeque<usize> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.index(surface.len())];
        edges.connect(new_node, attach_to, rng.weight());

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.index(new_node);
            if other != attach_to {
                edges.connect(new_node, other, rng.weight());
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges.build(node_count)
}

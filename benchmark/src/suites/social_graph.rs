//! @ai:module:intent In-memory social graph workload mirroring the database suites
//! @ai:module:layer application
//! @ai:module:public_api SocialGraphBenchmark, SocialGraph, Person, generate_edges
//! @ai:module:stateless false
//!
//! Every edge of the generated dataset becomes two FRIEND relationships, one
//! in each direction, the same way the database suites load their edge list.

use crate::subject::{BenchmarkMarker, BenchmarkSubject, OperationTable};
use anyhow::{anyhow, bail, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;

pub const NODE_COUNT: u32 = 4_039;
pub const EDGE_COUNT: usize = 30_000;
const SEED: u64 = 0x5DEE_CE66_D;
const NEW_NODE_ID: u32 = 10_000;

/// @ai:intent A person node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub node_id: u32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Person {
    fn new(node_id: u32) -> Self {
        Self {
            node_id,
            first_name: None,
            last_name: None,
        }
    }
}

/// @ai:intent Directed FRIEND graph keyed by node id
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    people: BTreeMap<u32, Person>,
    outgoing: BTreeMap<u32, BTreeSet<u32>>,
    incoming: BTreeMap<u32, BTreeSet<u32>>,
}

impl SocialGraph {
    /// @ai:intent Load an undirected edge list, creating missing nodes on the way
    /// @ai:effects pure
    pub fn from_edges(edges: &[(u32, u32)]) -> Self {
        let mut graph = Self::default();

        for &(first, second) in edges {
            graph.people.entry(first).or_insert_with(|| Person::new(first));
            graph.people.entry(second).or_insert_with(|| Person::new(second));
            graph.link(first, second);
        }

        graph
    }

    pub fn node_count(&self) -> usize {
        self.people.len()
    }

    /// @ai:intent Number of directed FRIEND relationships
    /// @ai:effects pure
    pub fn relationship_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }

    pub fn find(&self, node_id: u32) -> Option<&Person> {
        self.people.get(&node_id)
    }

    pub fn in_degree(&self, node_id: u32) -> usize {
        self.incoming.get(&node_id).map_or(0, BTreeSet::len)
    }

    pub fn out_degree(&self, node_id: u32) -> usize {
        self.outgoing.get(&node_id).map_or(0, BTreeSet::len)
    }

    pub fn degree(&self, node_id: u32) -> usize {
        self.in_degree(node_id) + self.out_degree(node_id)
    }

    /// @ai:intent Node minimizing the given count; ties go to the lowest id
    /// @ai:effects pure
    pub fn least_by(&self, count: impl Fn(u32) -> usize) -> Option<(u32, usize)> {
        self.people
            .keys()
            .map(|&id| (id, count(id)))
            .min_by_key(|&(id, c)| (c, id))
    }

    /// @ai:intent Node maximizing the given count; ties go to the lowest id
    /// @ai:effects pure
    pub fn most_by(&self, count: impl Fn(u32) -> usize) -> Option<(u32, usize)> {
        self.people
            .keys()
            .map(|&id| (id, count(id)))
            .min_by_key(|&(id, c)| (std::cmp::Reverse(c), id))
    }

    /// @ai:effects pure
    pub fn friends_of(&self, node_id: u32) -> Vec<u32> {
        self.outgoing
            .get(&node_id)
            .map(|friends| friends.iter().copied().collect())
            .unwrap_or_default()
    }

    /// @ai:intent Nodes two FRIEND hops away, excluding the intermediate friend itself
    /// @ai:effects pure
    pub fn friends_of_friends(&self, node_id: u32) -> Vec<u32> {
        let mut result = Vec::new();

        for friend in self.friends_of(node_id) {
            for foaf in self.friends_of(friend) {
                if foaf != friend {
                    result.push(foaf);
                }
            }
        }

        result
    }

    /// @ai:effects state:write
    pub fn create_node(&mut self, node_id: u32) -> Result<&Person> {
        if self.people.contains_key(&node_id) {
            bail!("Node {} already exists", node_id);
        }

        Ok(self.people.entry(node_id).or_insert_with(|| Person::new(node_id)))
    }

    /// @ai:intent Create FRIEND relationships in both directions
    /// @ai:effects state:write
    pub fn create_relationship(&mut self, first: u32, second: u32) -> Result<()> {
        for id in [first, second] {
            if !self.people.contains_key(&id) {
                bail!("Node {} does not exist", id);
            }
        }

        self.link(first, second);
        Ok(())
    }

    /// @ai:effects state:write
    pub fn update_name(&mut self, node_id: u32, first_name: &str, last_name: &str) -> Result<&Person> {
        let person = self
            .people
            .get_mut(&node_id)
            .ok_or_else(|| anyhow!("Node {} does not exist", node_id))?;

        person.first_name = Some(first_name.to_string());
        person.last_name = Some(last_name.to_string());
        Ok(person)
    }

    /// @ai:intent Remove a node and every relationship touching it
    /// @ai:effects state:write
    pub fn delete_node(&mut self, node_id: u32) -> Result<Person> {
        let person = self
            .people
            .remove(&node_id)
            .ok_or_else(|| anyhow!("Node {} does not exist", node_id))?;

        for friend in self.outgoing.remove(&node_id).unwrap_or_default() {
            if let Some(set) = self.incoming.get_mut(&friend) {
                set.remove(&node_id);
            }
        }

        for follower in self.incoming.remove(&node_id).unwrap_or_default() {
            if let Some(set) = self.outgoing.get_mut(&follower) {
                set.remove(&node_id);
            }
        }

        Ok(person)
    }

    fn link(&mut self, first: u32, second: u32) {
        for (from, to) in [(first, second), (second, first)] {
            self.outgoing.entry(from).or_default().insert(to);
            self.incoming.entry(to).or_default().insert(from);
        }
    }
}

/// @ai:intent Deterministic pseudo-random edge list without self loops
/// @ai:pre nodes >= 2
/// @ai:effects pure
pub fn generate_edges(nodes: u32, edges: usize, seed: u64) -> Vec<(u32, u32)> {
    let mut state = seed.max(1);
    let mut next = move || {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut result = Vec::with_capacity(edges);

    while result.len() < edges {
        let first = (next() % u64::from(nodes)) as u32;
        let second = (next() % u64::from(nodes)) as u32;

        if first != second {
            result.push((first, second));
        }
    }

    result
}

/// @ai:intent Benchmark subject running the graph query set in memory
#[derive(Debug, Default)]
pub struct SocialGraphBenchmark {
    graph: Option<SocialGraph>,
    least_connected: u32,
    most_connected: u32,
}

impl SocialGraphBenchmark {
    fn graph(&self) -> Result<&SocialGraph> {
        self.graph.as_ref().ok_or_else(|| anyhow!("Graph is not loaded"))
    }

    fn graph_mut(&mut self) -> Result<&mut SocialGraph> {
        self.graph.as_mut().ok_or_else(|| anyhow!("Graph is not loaded"))
    }

    /// @ai:effects state:write
    fn setup(&mut self) -> Result<()> {
        tracing::info!("Loading test data");
        let graph = SocialGraph::from_edges(&generate_edges(NODE_COUNT, EDGE_COUNT, SEED));

        let (least, _) = graph
            .least_by(|id| graph.degree(id))
            .ok_or_else(|| anyhow!("Generated graph is empty"))?;
        let (most, _) = graph
            .most_by(|id| graph.degree(id))
            .ok_or_else(|| anyhow!("Generated graph is empty"))?;

        tracing::info!(
            "Loaded {} nodes and {} relationships (least connected {}, most connected {})",
            graph.node_count(),
            graph.relationship_count(),
            least,
            most
        );

        self.least_connected = least;
        self.most_connected = most;
        self.graph = Some(graph);
        Ok(())
    }

    fn tear_down(&mut self) -> Result<()> {
        self.graph = None;
        Ok(())
    }

    fn least<F: Fn(&SocialGraph, u32) -> usize>(&self, count: F) -> Result<()> {
        let graph = self.graph()?;
        black_box(graph.least_by(|id| count(graph, id)));
        Ok(())
    }

    fn most<F: Fn(&SocialGraph, u32) -> usize>(&self, count: F) -> Result<()> {
        let graph = self.graph()?;
        black_box(graph.most_by(|id| count(graph, id)));
        Ok(())
    }
}

impl BenchmarkSubject for SocialGraphBenchmark {
    fn instantiate() -> Result<Self> {
        Ok(Self::default())
    }

    fn operations() -> OperationTable<Self> {
        let query = BenchmarkMarker::new().iterations(10);

        OperationTable::new()
            .setup("setup", Self::setup)
            .teardown("closeConnection", Self::tear_down)
            .benchmark("findNodeWithLeastIngoingEdges", query, |s: &mut Self| {
                s.least(SocialGraph::in_degree)
            })
            .benchmark("findNodeWithLeastOutgoingEdges", query, |s: &mut Self| {
                s.least(SocialGraph::out_degree)
            })
            .benchmark("findNodeWithLeastIngoingAndOutgoingEdges", query, |s: &mut Self| {
                s.least(SocialGraph::degree)
            })
            .benchmark("findNodeWithMostIngoingEdges", query, |s: &mut Self| {
                s.most(SocialGraph::in_degree)
            })
            .benchmark("findNodeWithMostOutgoingEdges", query, |s: &mut Self| {
                s.most(SocialGraph::out_degree)
            })
            .benchmark("findNodeWithMostIngoingAndOutgoingEdges", query, |s: &mut Self| {
                s.most(SocialGraph::degree)
            })
            .benchmark("findFriendsOfLeastConnectedNode", query, |s: &mut Self| {
                black_box(s.graph()?.friends_of(s.least_connected));
                Ok(())
            })
            .benchmark("findFriendsOfAFriendsOfLeastConnectedNode", query, |s: &mut Self| {
                black_box(s.graph()?.friends_of_friends(s.least_connected));
                Ok(())
            })
            .benchmark("findFriendsOfMostConnectedNode", query, |s: &mut Self| {
                black_box(s.graph()?.friends_of(s.most_connected));
                Ok(())
            })
            .benchmark("findFriendsOfFriendsOfMostConnectedNode", query, |s: &mut Self| {
                black_box(s.graph()?.friends_of_friends(s.most_connected));
                Ok(())
            })
            .benchmark(
                "createNewNodeWithNodeId10000",
                BenchmarkMarker::new().priority(90),
                |s: &mut Self| {
                    black_box(s.graph_mut()?.create_node(NEW_NODE_ID)?);
                    Ok(())
                },
            )
            .benchmark(
                "createNewRelationshipBetweenMostConnectedNodeAndNodeWithNodeId10000",
                BenchmarkMarker::new().priority(80),
                |s: &mut Self| {
                    let most = s.most_connected;
                    s.graph_mut()?.create_relationship(most, NEW_NODE_ID)
                },
            )
            .benchmark(
                "findNodeWithNodeId10000",
                BenchmarkMarker::new().iterations(10).priority(70),
                |s: &mut Self| {
                    s.graph()?
                        .find(NEW_NODE_ID)
                        .map(|p| black_box(p.node_id))
                        .ok_or_else(|| anyhow!("Node {} not found", NEW_NODE_ID))?;
                    Ok(())
                },
            )
            .benchmark(
                "updateNodeWithNodeId10000",
                BenchmarkMarker::new().iterations(10).priority(60),
                |s: &mut Self| {
                    black_box(s.graph_mut()?.update_name(NEW_NODE_ID, "John", "Doe")?);
                    Ok(())
                },
            )
            .benchmark(
                "deleteNodeWithNodeId10000",
                BenchmarkMarker::new().priority(50),
                |s: &mut Self| {
                    black_box(s.graph_mut()?.delete_node(NEW_NODE_ID)?);
                    Ok(())
                },
            )
    }
}

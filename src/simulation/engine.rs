//! Coalescent-with-recombination ancestry process.
//!
//! This module implements Hudson's algorithm: a discrete-event simulation of
//! the ancestral process for a sample of genomes, running backwards in time
//! until every part of the genome has reached its most recent common
//! ancestor. The process emits the edge set of the resulting genealogy; the
//! tree-sequence layer reconstructs local trees from it afterwards.

use rayon::prelude::*;

use crate::base::{NodeId, NodeTable};
use crate::errors::{InternalError, SimulationError};
use crate::simulation::{RandomStream, SimulationParameters};
use crate::trees::{generate_mutations, Edge, EdgeStore, TreeSequence};

/// One tracked stretch of ancestral material.
///
/// `samples` is the number of sample genomes this stretch is ancestral to;
/// a stretch reaching the full sample size is fully coalesced and retired.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AncestrySegment {
    left: f64,
    right: f64,
    samples: usize,
}

/// A live lineage: a node id plus its sorted, disjoint ancestry segments.
///
/// Simulation-internal only; lineages are never part of the persisted tree
/// sequence. The segment list is always non-empty while the lineage lives.
#[derive(Debug, Clone)]
struct Lineage {
    node: NodeId,
    segments: Vec<AncestrySegment>,
}

impl Lineage {
    fn span(&self) -> (f64, f64) {
        (
            self.segments[0].left,
            self.segments[self.segments.len() - 1].right,
        )
    }
}

/// Append `seg` to `out`, extending the previous segment when the two are
/// contiguous and subtend the same samples.
fn push_segment(out: &mut Vec<AncestrySegment>, seg: AncestrySegment) {
    if let Some(prev) = out.last_mut() {
        if prev.right == seg.left && prev.samples == seg.samples {
            prev.right = seg.right;
            return;
        }
    }
    out.push(seg);
}

/// Merge two sorted disjoint segment lists into the segment list of their
/// common ancestor.
///
/// Sub-intervals covered by one list pass through with their sample count
/// unchanged; sub-intervals covered by both sum their counts. Sub-intervals
/// reaching `sample_size` are fully coalesced and dropped from further
/// tracking.
fn merge_segments(
    a: &[AncestrySegment],
    b: &[AncestrySegment],
    sample_size: usize,
) -> Vec<AncestrySegment> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut i = 0;
    let mut j = 0;
    let mut a_cur = a.first().copied();
    let mut b_cur = b.first().copied();

    while let (Some(x), Some(y)) = (a_cur, b_cur) {
        if x.right <= y.left {
            push_segment(&mut out, x);
            i += 1;
            a_cur = a.get(i).copied();
        } else if y.right <= x.left {
            push_segment(&mut out, y);
            j += 1;
            b_cur = b.get(j).copied();
        } else if x.left < y.left {
            // Leading part of x is uncovered by y.
            push_segment(
                &mut out,
                AncestrySegment {
                    left: x.left,
                    right: y.left,
                    samples: x.samples,
                },
            );
            a_cur = Some(AncestrySegment { left: y.left, ..x });
        } else if y.left < x.left {
            push_segment(
                &mut out,
                AncestrySegment {
                    left: y.left,
                    right: x.left,
                    samples: y.samples,
                },
            );
            b_cur = Some(AncestrySegment { left: x.left, ..y });
        } else {
            // Aligned overlap: counts sum; fully coalesced stretches retire.
            let right = x.right.min(y.right);
            let combined = x.samples + y.samples;
            if combined < sample_size {
                push_segment(
                    &mut out,
                    AncestrySegment {
                        left: x.left,
                        right,
                        samples: combined,
                    },
                );
            }
            a_cur = if x.right > right {
                Some(AncestrySegment { left: right, ..x })
            } else {
                i += 1;
                a.get(i).copied()
            };
            b_cur = if y.right > right {
                Some(AncestrySegment { left: right, ..y })
            } else {
                j += 1;
                b.get(j).copied()
            };
        }
    }
    while let Some(x) = a_cur {
        push_segment(&mut out, x);
        i += 1;
        a_cur = a.get(i).copied();
    }
    while let Some(y) = b_cur {
        push_segment(&mut out, y);
        j += 1;
        b_cur = b.get(j).copied();
    }
    out
}

/// Hudson's coalescent-with-recombination simulator.
///
/// Owns the growing node table and edge store for one run. The event loop
/// is strictly sequential: every event's rate and outcome depend on the
/// full current lineage state.
pub struct AncestryProcess<'a> {
    params: &'a SimulationParameters,
    lineages: Vec<Lineage>,
    time: f64,
    nodes: NodeTable,
    edges: EdgeStore,
}

impl<'a> AncestryProcess<'a> {
    /// Set up the process: one sample lineage per genome, each owning the
    /// full interval `[0, length)`.
    pub fn new(params: &'a SimulationParameters) -> Self {
        let n = params.sample_size();
        let lineages = (0..n)
            .map(|i| Lineage {
                node: NodeId::from(i),
                segments: vec![AncestrySegment {
                    left: 0.0,
                    right: params.length(),
                    samples: 1,
                }],
            })
            .collect();
        Self {
            params,
            lineages,
            time: 0.0,
            nodes: NodeTable::with_samples(n),
            edges: EdgeStore::new(params.length()),
        }
    }

    /// Run the event loop to completion and return the finalized tables.
    pub fn run(
        mut self,
        rng: &mut RandomStream,
    ) -> Result<(NodeTable, EdgeStore), SimulationError> {
        // Bound far above any plausible event count; a trigger means the
        // rate math is broken.
        let rho = 4.0 * self.params.ne() * self.params.length() * self.params.recombination_rate();
        let max_events = 10_000 + 1_000 * self.params.sample_size() + (1_000.0 * rho) as usize;
        let mut events = 0usize;

        while self.lineages.len() > 1 {
            events += 1;
            if events > max_events {
                return Err(InternalError::EventLoopExceeded { events }.into());
            }

            let k = self.lineages.len();
            let coalescence_rate = (k * (k - 1)) as f64 / (4.0 * self.params.ne());
            let recombination_rate =
                k as f64 * self.params.length() * self.params.recombination_rate();

            let coalescence_wait = rng.exponential(coalescence_rate);
            if recombination_rate > 0.0 {
                let recombination_wait = rng.exponential(recombination_rate);
                // Ties resolve to coalescence.
                if recombination_wait < coalescence_wait {
                    self.time += recombination_wait;
                    self.recombine(rng);
                    continue;
                }
            }
            self.time += coalescence_wait;
            self.coalesce(rng)?;
        }

        if let Some(lineage) = self.lineages.pop() {
            return Err(InternalError::ResidualLineage {
                node: lineage.node,
            }
            .into());
        }

        self.edges.finalize();
        Ok((self.nodes, self.edges))
    }

    /// Merge two uniformly chosen lineages under a new ancestral node.
    fn coalesce(&mut self, rng: &mut RandomStream) -> Result<(), SimulationError> {
        let (i, j) = rng.distinct_pair(self.lineages.len());
        // j > i, so removing j first leaves i in place.
        let second = self.lineages.swap_remove(j);
        let first = self.lineages.swap_remove(i);

        let parent = self.nodes.add_ancestral(self.time, 0);
        self.emit_edges(parent, &first)?;
        self.emit_edges(parent, &second)?;

        let merged = merge_segments(
            &first.segments,
            &second.segments,
            self.params.sample_size(),
        );
        if !merged.is_empty() {
            self.lineages.push(Lineage {
                node: parent,
                segments: merged,
            });
        }
        Ok(())
    }

    /// Emit one edge per contiguous run of the child's segments.
    fn emit_edges(&mut self, parent: NodeId, child: &Lineage) -> Result<(), SimulationError> {
        let mut segments = child.segments.iter();
        let head = match segments.next() {
            Some(seg) => seg,
            None => return Ok(()),
        };
        let mut left = head.left;
        let mut right = head.right;
        for seg in segments {
            if seg.left == right {
                right = seg.right;
            } else {
                self.edges
                    .append(Edge::new(parent, child.node, left, right), &self.nodes)?;
                left = seg.left;
                right = seg.right;
            }
        }
        self.edges
            .append(Edge::new(parent, child.node, left, right), &self.nodes)?;
        Ok(())
    }

    /// Split a uniformly chosen lineage at a uniform breakpoint within its
    /// span. Pure bookkeeping: no node or edge is emitted.
    fn recombine(&mut self, rng: &mut RandomStream) {
        let idx = rng.index(self.lineages.len());
        let (span_left, span_right) = self.lineages[idx].span();
        let breakpoint = rng.uniform(span_left, span_right);

        let mut head = Vec::new();
        let mut tail = Vec::new();
        for seg in &self.lineages[idx].segments {
            if seg.right <= breakpoint {
                head.push(*seg);
            } else if seg.left >= breakpoint {
                tail.push(*seg);
            } else {
                head.push(AncestrySegment {
                    right: breakpoint,
                    ..*seg
                });
                tail.push(AncestrySegment {
                    left: breakpoint,
                    ..*seg
                });
            }
        }
        // A draw landing exactly on a segment boundary would leave one side
        // empty; treat it as a no-op event.
        if head.is_empty() || tail.is_empty() {
            return;
        }
        let node = self.lineages[idx].node;
        self.lineages[idx].segments = head;
        self.lineages.push(Lineage {
            node,
            segments: tail,
        });
    }
}

/// Run one coalescent simulation and return the resulting tree sequence.
///
/// The random stream is created from `params.random_seed()`, so identical
/// parameters produce identical node, edge, and mutation tables.
///
/// # Errors
///
/// Propagates [`SimulationError`] for invariant violations or a tripped
/// event-loop bound; parameters are already validated by construction.
pub fn simulate(params: &SimulationParameters) -> Result<TreeSequence, SimulationError> {
    let mut rng = RandomStream::with_seed(params.random_seed());
    let (nodes, edges) = AncestryProcess::new(params).run(&mut rng)?;
    let mutations = if params.mutation_rate() > 0.0 {
        generate_mutations(&nodes, &edges, params.mutation_rate(), &mut rng)?
    } else {
        Vec::new()
    };
    TreeSequence::new(nodes, edges, mutations)
}

/// Run independent replicates of the same configuration in parallel.
///
/// Replicate seeds are drawn from a master stream seeded with
/// `params.random_seed()`, so the whole batch is reproducible. Replicates
/// share no mutable state; this is the only parallelism a coalescent
/// simulation admits.
pub fn run_replicates(
    params: &SimulationParameters,
    replicates: usize,
) -> Result<Vec<TreeSequence>, SimulationError> {
    let mut master = RandomStream::with_seed(params.random_seed());
    let seeds: Vec<u64> = (0..replicates).map(|_| master.fork_seed()).collect();
    seeds
        .par_iter()
        .map(|&seed| simulate(&params.with_seed(seed)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(left: f64, right: f64, samples: usize) -> AncestrySegment {
        AncestrySegment {
            left,
            right,
            samples,
        }
    }

    #[test]
    fn test_merge_disjoint_passthrough() {
        let merged = merge_segments(&[seg(0.0, 1.0, 1)], &[seg(2.0, 3.0, 1)], 5);
        assert_eq!(merged, vec![seg(0.0, 1.0, 1), seg(2.0, 3.0, 1)]);
    }

    #[test]
    fn test_merge_full_overlap_sums_counts() {
        let merged = merge_segments(&[seg(0.0, 1.0, 1)], &[seg(0.0, 1.0, 2)], 5);
        assert_eq!(merged, vec![seg(0.0, 1.0, 3)]);
    }

    #[test]
    fn test_merge_drops_fully_coalesced() {
        let merged = merge_segments(&[seg(0.0, 1.0, 2)], &[seg(0.0, 1.0, 3)], 5);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_partial_overlap() {
        // [0,2) count 1 against [1,3) count 1: overlap [1,2) sums to 2.
        let merged = merge_segments(&[seg(0.0, 2.0, 1)], &[seg(1.0, 3.0, 1)], 5);
        assert_eq!(
            merged,
            vec![seg(0.0, 1.0, 1), seg(1.0, 2.0, 2), seg(2.0, 3.0, 1)]
        );
    }

    #[test]
    fn test_merge_partial_coalescence_keeps_flanks() {
        // Overlap reaches the full sample size and retires; flanks survive.
        let merged = merge_segments(&[seg(0.0, 2.0, 1)], &[seg(1.0, 3.0, 1)], 2);
        assert_eq!(merged, vec![seg(0.0, 1.0, 1), seg(2.0, 3.0, 1)]);
    }

    #[test]
    fn test_merge_rejoins_adjacent_equal_counts() {
        let merged = merge_segments(
            &[seg(0.0, 1.0, 1)],
            &[seg(1.0, 2.0, 1)],
            5,
        );
        assert_eq!(merged, vec![seg(0.0, 2.0, 1)]);
    }

    #[test]
    fn test_kingman_run_shape() {
        // Without recombination, n samples coalesce through n - 1 events:
        // one new node and two full-span edges per event.
        let params = SimulationParameters::single_locus(5, 1000.0, 10).unwrap();
        let mut rng = RandomStream::with_seed(params.random_seed());
        let (nodes, edges) = AncestryProcess::new(&params).run(&mut rng).unwrap();
        assert_eq!(nodes.len(), 9);
        assert_eq!(edges.edge_count(), 8);
        for edge in edges.iter_sorted_by_left() {
            assert_eq!(edge.left, 0.0);
            assert_eq!(edge.right, 1.0);
        }
    }

    #[test]
    fn test_node_times_increase_with_id() {
        let params = SimulationParameters::single_locus(8, 500.0, 3).unwrap();
        let mut rng = RandomStream::with_seed(params.random_seed());
        let (nodes, _) = AncestryProcess::new(&params).run(&mut rng).unwrap();
        let times = nodes.times();
        for pair in times[nodes.sample_count()..].windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_edges_respect_time_order() {
        let params =
            SimulationParameters::new(6, 1000.0, 1e4, 2e-8, 0.0, 42).unwrap();
        let mut rng = RandomStream::with_seed(params.random_seed());
        let (nodes, edges) = AncestryProcess::new(&params).run(&mut rng).unwrap();
        for edge in edges.iter_sorted_by_left() {
            let parent_time = nodes.time(edge.parent).unwrap();
            let child_time = nodes.time(edge.child).unwrap();
            assert!(parent_time > child_time);
            assert!(edge.left < edge.right);
            assert!(edge.left >= 0.0 && edge.right <= 1e4);
        }
    }

    #[test]
    fn test_recombination_intervals_stay_in_genome() {
        let params =
            SimulationParameters::new(5, 1000.0, 1e4, 2e-7, 0.0, 7).unwrap();
        let mut rng = RandomStream::with_seed(params.random_seed());
        let (_, edges) = AncestryProcess::new(&params).run(&mut rng).unwrap();
        assert!(edges.edge_count() >= 8);
        for edge in edges.iter_sorted_by_left() {
            assert!(edge.left >= 0.0);
            assert!(edge.right <= 1e4);
            assert!(edge.left < edge.right);
        }
    }
}

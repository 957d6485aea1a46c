// SPDX-License-Identifier: Apache-2.0
//! Gate dependency graph and topological ordering.
//!
//! Gates are linked through the wires they share: the producer of each
//! gate input slot and the consumer of each gate output slot. Edges are
//! stored as identity-indexed adjacency over gate declaration ids; no
//! gate data is duplicated here.

use crate::error::CircuitError;
use crate::netlist::{Circuit, Gate};
use crate::symtab::WireKind;

fn input_slots(gate: &Gate) -> Vec<usize> {
    let mut v = Vec::new();
    gate.for_each_input(|w| v.push(w));
    v
}

fn output_slots(gate: &Gate) -> Vec<usize> {
    let mut v = Vec::new();
    gate.for_each_output(|w| v.push(w));
    v
}

/// Adjacency of the gate-level DAG.
#[derive(Debug)]
pub struct GateGraph {
    /// For each gate, for each input slot: the gate producing that
    /// wire, or `None` when the wire is a circuit input or a constant.
    pub fanin: Vec<Vec<Option<usize>>>,
    /// For each gate, for each output slot: the gate consuming that
    /// wire, or `None` when the wire is a circuit output, discarded,
    /// or a dangling temporary.
    pub fanout: Vec<Vec<Option<usize>>>,
}

impl GateGraph {
    /// Build the graph from a circuit, resolving every slot wire to
    /// its unique producer/consumer.
    ///
    /// Multiply-driven wires, temporaries read by more than one gate,
    /// undriven temporaries and gates writing into inputs or constants
    /// are all rejected here, before any evaluation.
    pub fn build(circuit: &Circuit) -> Result<GateGraph, CircuitError> {
        let num_wires = circuit.wires.len();
        let mut producer: Vec<Option<usize>> = vec![None; num_wires];
        let mut consumer: Vec<Option<usize>> = vec![None; num_wires];

        for (gid, gate) in circuit.gates.iter().enumerate() {
            for w in output_slots(gate) {
                match circuit.wires.kind(w) {
                    WireKind::Input | WireKind::Constant => {
                        return Err(CircuitError::DrivesFixedWire(
                            circuit.wires.label(w).to_string(),
                        ));
                    }
                    // any number of writers may sink to "_"
                    WireKind::Discarded => {}
                    _ => {
                        if producer[w].replace(gid).is_some() {
                            return Err(CircuitError::MultipleDrivers(
                                circuit.wires.label(w).to_string(),
                            ));
                        }
                    }
                }
            }
            for w in input_slots(gate) {
                match circuit.wires.kind(w) {
                    WireKind::Discarded => {
                        return Err(CircuitError::ReadsDiscarded);
                    }
                    // inputs, constants and declared outputs may fan
                    // out freely; out-edges never consult them.
                    WireKind::Input | WireKind::Constant | WireKind::Output => {}
                    WireKind::Temp => match consumer[w] {
                        // a gate may read the same wire in several of
                        // its own slots; only a second gate conflicts
                        Some(prev) if prev != gid => {
                            return Err(CircuitError::MultipleReaders(
                                circuit.wires.label(w).to_string(),
                            ));
                        }
                        _ => consumer[w] = Some(gid),
                    },
                }
            }
        }

        let mut fanin = Vec::with_capacity(circuit.gates.len());
        let mut fanout = Vec::with_capacity(circuit.gates.len());
        for gate in &circuit.gates {
            let mut in_edges = Vec::new();
            for w in input_slots(gate) {
                in_edges.push(match circuit.wires.kind(w) {
                    WireKind::Input | WireKind::Constant => None,
                    _ => Some(producer[w].ok_or_else(|| {
                        CircuitError::UndrivenWire(
                            circuit.wires.label(w).to_string(),
                        )
                    })?),
                });
            }
            let mut out_edges = Vec::new();
            for w in output_slots(gate) {
                out_edges.push(match circuit.wires.kind(w) {
                    WireKind::Output | WireKind::Discarded => None,
                    _ => consumer[w],
                });
            }
            fanin.push(in_edges);
            fanout.push(out_edges);
        }

        Ok(GateGraph { fanin, fanout })
    }

    /// Topologically order the gates for evaluation: every producer of
    /// a gate's inputs lands strictly before the gate itself.
    ///
    /// Postorder DFS over output edges, started from every unvisited
    /// gate in descending declaration order, read back in reverse.
    /// Runs on an explicit work stack, with in-stack coloring turning
    /// feedback into an error instead of a wrong order.
    pub fn eval_order(&self) -> Result<Vec<usize>, CircuitError> {
        let num_gates = self.fanout.len();
        let mut vis = vec![false; num_gates];
        let mut instack = vec![false; num_gates];
        let mut post = Vec::with_capacity(num_gates);
        // (gate, next output slot to explore)
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for root in (0..num_gates).rev() {
            if vis[root] {
                continue;
            }
            vis[root] = true;
            instack[root] = true;
            frames.push((root, 0));
            while let Some(&mut (g, ref mut slot)) = frames.last_mut() {
                if *slot < self.fanout[g].len() {
                    let s = *slot;
                    *slot += 1;
                    if let Some(c) = self.fanout[g][s] {
                        if instack[c] {
                            return Err(CircuitError::CombinationalLoop(c));
                        }
                        if !vis[c] {
                            vis[c] = true;
                            instack[c] = true;
                            frames.push((c, 0));
                        }
                    }
                } else {
                    frames.pop();
                    instack[g] = false;
                    post.push(g);
                }
            }
        }

        post.reverse();
        Ok(post)
    }
}

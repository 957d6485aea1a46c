// SPDX-License-Identifier: Apache-2.0
//! Truth-table evaluation.
//!
//! Replays the topologically ordered gate list once per input
//! assignment against a flat wire-value store. Assignments are swept
//! in ascending numeric order; the first-declared input is the most
//! significant bit of the assignment value.

use crate::error::CircuitError;
use crate::graph::GateGraph;
use crate::netlist::{Circuit, Gate};
use crate::symtab::WireKind;
use rayon::prelude::*;
use std::fmt;

/// One truth-table row: the input assignment bits and the resulting
/// output bits, both in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub inputs: Vec<u8>,
    pub outputs: Vec<u8>,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.inputs {
            write!(f, "{} ", b)?;
        }
        // the separator keeps its trailing space even with no outputs
        write!(f, "| ")?;
        for (i, b) in self.outputs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}

/// A lazy sweep over all `2^num_inputs` rows of a circuit.
///
/// Building one resolves the dependency graph and the evaluation
/// order, so every malformed-circuit and feedback error surfaces here,
/// before the first row. Iterate it for the rows in ascending
/// assignment order; clone it (or build it again) to restart.
#[derive(Debug, Clone)]
pub struct TruthTable<'c> {
    circuit: &'c Circuit,
    order: Vec<usize>,
    consts: Vec<(usize, u8)>,
    next: u64,
    total: u64,
}

impl<'c> TruthTable<'c> {
    pub fn build(circuit: &'c Circuit) -> Result<TruthTable<'c>, CircuitError> {
        // the assignment value is a u64; keeping the sweep tractable
        // below that is still the caller's business
        if circuit.num_inputs >= 64 {
            return Err(CircuitError::TooManyInputs(circuit.num_inputs));
        }
        let graph = GateGraph::build(circuit)?;
        let order = graph.eval_order()?;
        let consts = circuit
            .wires
            .iter()
            .filter(|&(_, _, kind)| kind == WireKind::Constant)
            .map(|(id, _, _)| (id, circuit.wires.constant_value(id)))
            .collect();
        Ok(TruthTable {
            circuit,
            order,
            consts,
            next: 0,
            total: 1u64 << circuit.num_inputs,
        })
    }

    /// Total number of rows, `2^num_inputs`.
    pub fn num_rows(&self) -> u64 {
        self.total
    }

    /// The gate evaluation order in use (declaration ids).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Evaluate a single assignment against a private wire store.
    fn eval(&self, v: u64) -> Row {
        let nin = self.circuit.num_inputs;
        let mut vals = vec![0u8; self.circuit.wires.len()];
        for &(w, b) in &self.consts {
            vals[w] = b;
        }
        let mut inputs = vec![0u8; nin];
        for (i, inp) in inputs.iter_mut().enumerate() {
            // first-declared input is the most significant bit
            let bit = ((v >> (nin - 1 - i)) & 1) as u8;
            *inp = bit;
            vals[i] = bit;
        }

        for &g in &self.order {
            match &self.circuit.gates[g] {
                Gate::And { a, b, y } => vals[*y] = vals[*a] & vals[*b],
                Gate::Or { a, b, y } => vals[*y] = vals[*a] | vals[*b],
                Gate::Nand { a, b, y } => vals[*y] = (vals[*a] & vals[*b]) ^ 1,
                Gate::Nor { a, b, y } => vals[*y] = (vals[*a] | vals[*b]) ^ 1,
                Gate::Xor { a, b, y } => vals[*y] = vals[*a] ^ vals[*b],
                Gate::Not { a, y } => vals[*y] = vals[*a] ^ 1,
                Gate::Pass { a, y } => vals[*y] = vals[*a],
                Gate::Decoder { sel, outs } => {
                    let mut s = 0usize;
                    for &w in sel {
                        s = (s << 1) | vals[w] as usize;
                    }
                    for (k, &o) in outs.iter().enumerate() {
                        vals[o] = (k == s) as u8;
                    }
                }
                Gate::Mux { data, sel, y } => {
                    let mut s = 0usize;
                    for &w in sel {
                        s = (s << 1) | vals[w] as usize;
                    }
                    vals[*y] = vals[data[s]];
                }
            }
        }

        let outputs = (0..self.circuit.num_outputs)
            .map(|i| vals[nin + i])
            .collect();
        Row { inputs, outputs }
    }

    /// Evaluate every row on the rayon pool, each with its own store.
    ///
    /// Rows come back in ascending assignment order, independent of
    /// the iterator's current position.
    pub fn par_rows(&self) -> Vec<Row> {
        (0..self.total)
            .into_par_iter()
            .map(|v| self.eval(v))
            .collect()
    }
}

impl Iterator for TruthTable<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next == self.total {
            return None;
        }
        let row = self.eval(self.next);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total - self.next) as usize;
        (left, Some(left))
    }
}

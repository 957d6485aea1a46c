// SPDX-License-Identifier: Apache-2.0
//! Netlist data model and parser.
//!
//! A netlist is a whitespace-delimited token stream: INPUT/OUTPUT port
//! declarations followed by gate statements, terminated by `END` or end
//! of input. Every wire token is resolved through the [`WireTable`] the
//! first time it is seen, so gates may reference wires in any order.

use crate::error::CircuitError;
use crate::symtab::{WireKind, WireTable};

/// Longest accepted wire token.
pub const MAX_LABEL_LEN: usize = 16;

/// Largest accepted DECODER/MULTIPLEXER size field.
///
/// The slot lists grow as `2^n`; anything beyond this is a typo, not
/// a circuit.
pub const MAX_GATE_SIZE: usize = 24;

/// A gate operation over wire identities.
///
/// Each variant carries exactly the slots its operation needs. Slot
/// order (inputs first, then outputs) defines the input/output slot
/// numbering used by the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    And { a: usize, b: usize, y: usize },
    Or { a: usize, b: usize, y: usize },
    Nand { a: usize, b: usize, y: usize },
    Nor { a: usize, b: usize, y: usize },
    Xor { a: usize, b: usize, y: usize },
    Not { a: usize, y: usize },
    Pass { a: usize, y: usize },
    /// `sel.len() == n`, `outs.len() == 2^n`, one-hot outputs.
    Decoder { sel: Vec<usize>, outs: Vec<usize> },
    /// `data.len() == 2^n`, `sel.len() == n`, single output.
    Mux { data: Vec<usize>, sel: Vec<usize>, y: usize },
}

impl Gate {
    /// Enumerate the gate's input-slot wires in slot order.
    pub fn for_each_input(&self, mut f: impl FnMut(usize)) {
        match self {
            Gate::And { a, b, .. }
            | Gate::Or { a, b, .. }
            | Gate::Nand { a, b, .. }
            | Gate::Nor { a, b, .. }
            | Gate::Xor { a, b, .. } => {
                f(*a);
                f(*b);
            }
            Gate::Not { a, .. } | Gate::Pass { a, .. } => f(*a),
            Gate::Decoder { sel, .. } => sel.iter().for_each(|&w| f(w)),
            Gate::Mux { data, sel, .. } => {
                data.iter().for_each(|&w| f(w));
                sel.iter().for_each(|&w| f(w));
            }
        }
    }

    /// Enumerate the gate's output-slot wires in slot order.
    pub fn for_each_output(&self, mut f: impl FnMut(usize)) {
        match self {
            Gate::And { y, .. }
            | Gate::Or { y, .. }
            | Gate::Nand { y, .. }
            | Gate::Nor { y, .. }
            | Gate::Xor { y, .. }
            | Gate::Not { y, .. }
            | Gate::Pass { y, .. }
            | Gate::Mux { y, .. } => f(*y),
            Gate::Decoder { outs, .. } => outs.iter().for_each(|&w| f(w)),
        }
    }
}

/// A parsed combinational circuit: the wire table plus the gate list
/// in declaration order. Immutable once built.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Circuit {
    pub wires: WireTable,
    pub gates: Vec<Gate>,
    pub num_inputs: usize,
    pub num_outputs: usize,
}

struct Tokens<'s> {
    iter: std::str::SplitWhitespace<'s>,
}

impl<'s> Tokens<'s> {
    fn next(&mut self) -> Option<&'s str> {
        self.iter.next()
    }

    fn demand(&mut self) -> Result<&'s str, CircuitError> {
        self.next().ok_or(CircuitError::UnexpectedEof)
    }

    fn count(&mut self) -> Result<usize, CircuitError> {
        let tok = self.demand()?;
        tok.parse()
            .map_err(|_| CircuitError::BadCount(tok.to_string()))
    }

    fn wire(
        &mut self,
        wires: &mut WireTable,
        fallback: WireKind,
    ) -> Result<usize, CircuitError> {
        let tok = self.demand()?;
        if tok.len() > MAX_LABEL_LEN {
            return Err(CircuitError::TokenTooLong(tok.to_string()));
        }
        Ok(wires.lookup_or_insert(tok, fallback))
    }
}

impl Circuit {
    /// Parse a full netlist. Any error aborts the build; no partial
    /// circuit escapes.
    pub fn parse(src: &str) -> Result<Circuit, CircuitError> {
        let mut tk = Tokens {
            iter: src.split_whitespace(),
        };
        let mut circuit = Circuit::default();

        while let Some(tok) = tk.next() {
            match tok {
                "END" => break,
                "INPUT" => {
                    let n = tk.count()?;
                    for _ in 0..n {
                        let id = tk.wire(&mut circuit.wires, WireKind::Input)?;
                        // ports must occupy the lowest identities, in
                        // declaration order: the evaluator indexes rows
                        // by input identity.
                        if id != circuit.num_inputs
                            || circuit.wires.kind(id) != WireKind::Input
                        {
                            return Err(CircuitError::PortLayout(
                                circuit.wires.label(id).to_string(),
                            ));
                        }
                        circuit.num_inputs += 1;
                    }
                }
                "OUTPUT" => {
                    let n = tk.count()?;
                    for _ in 0..n {
                        let id = tk.wire(&mut circuit.wires, WireKind::Output)?;
                        if id != circuit.num_inputs + circuit.num_outputs
                            || circuit.wires.kind(id) != WireKind::Output
                        {
                            return Err(CircuitError::PortLayout(
                                circuit.wires.label(id).to_string(),
                            ));
                        }
                        circuit.num_outputs += 1;
                    }
                }
                "AND" | "OR" | "NAND" | "NOR" | "XOR" => {
                    let a = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    let b = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    let y = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    circuit.gates.push(match tok {
                        "AND" => Gate::And { a, b, y },
                        "OR" => Gate::Or { a, b, y },
                        "NAND" => Gate::Nand { a, b, y },
                        "NOR" => Gate::Nor { a, b, y },
                        _ => Gate::Xor { a, b, y },
                    });
                }
                "NOT" | "PASS" => {
                    let a = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    let y = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    circuit.gates.push(match tok {
                        "NOT" => Gate::Not { a, y },
                        _ => Gate::Pass { a, y },
                    });
                }
                "DECODER" => {
                    let n = tk.count()?;
                    if n > MAX_GATE_SIZE {
                        return Err(CircuitError::SizeTooLarge(n));
                    }
                    let sel = (0..n)
                        .map(|_| tk.wire(&mut circuit.wires, WireKind::Temp))
                        .collect::<Result<Vec<_>, _>>()?;
                    let outs = (0..1usize << n)
                        .map(|_| tk.wire(&mut circuit.wires, WireKind::Temp))
                        .collect::<Result<Vec<_>, _>>()?;
                    circuit.gates.push(Gate::Decoder { sel, outs });
                }
                "MULTIPLEXER" => {
                    let n = tk.count()?;
                    if n > MAX_GATE_SIZE {
                        return Err(CircuitError::SizeTooLarge(n));
                    }
                    let data = (0..1usize << n)
                        .map(|_| tk.wire(&mut circuit.wires, WireKind::Temp))
                        .collect::<Result<Vec<_>, _>>()?;
                    let sel = (0..n)
                        .map(|_| tk.wire(&mut circuit.wires, WireKind::Temp))
                        .collect::<Result<Vec<_>, _>>()?;
                    let y = tk.wire(&mut circuit.wires, WireKind::Temp)?;
                    circuit.gates.push(Gate::Mux { data, sel, y });
                }
                _ => return Err(CircuitError::UnknownToken(tok.to_string())),
            }
        }

        Ok(circuit)
    }
}

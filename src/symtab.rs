// SPDX-License-Identifier: Apache-2.0
//! Wire symbol table.
//!
//! Maps textual wire labels to dense integer identities assigned in
//! first-seen order. The identity layout matters downstream: the
//! evaluator indexes truth-table rows by input identity and output
//! rows by `identity - num_inputs`, so circuit inputs must occupy the
//! lowest identities, followed by outputs, then temporaries.

use compact_str::CompactString;
use indexmap::IndexMap;

/// Classification of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    /// A declared circuit input.
    Input,
    /// A declared circuit output.
    Output,
    /// An internal signal between two gates.
    Temp,
    /// The literal `"0"` or `"1"`.
    Constant,
    /// The placeholder `"_"`: a gate output wired nowhere.
    Discarded,
}

/// The label -> identity mapping for all wires of a circuit.
///
/// Backed by an insertion-ordered map, so a wire's identity is simply
/// its slot index: both directions of lookup are O(1) and the table
/// grows with the number of distinct labels.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WireTable {
    wires: IndexMap<CompactString, WireKind>,
}

impl WireTable {
    pub fn new() -> WireTable {
        WireTable::default()
    }

    /// Resolve a wire token to its identity, allocating the next dense
    /// identity on first sight.
    ///
    /// `"0"`/`"1"` are forced to [`WireKind::Constant`] and `"_"` to
    /// [`WireKind::Discarded`] regardless of `fallback`. A label seen
    /// before keeps both its identity and its original kind.
    pub fn lookup_or_insert(&mut self, label: &str, fallback: WireKind) -> usize {
        let kind = match label {
            "0" | "1" => WireKind::Constant,
            "_" => WireKind::Discarded,
            _ => fallback,
        };
        let entry = self.wires.entry(label.into());
        let id = entry.index();
        entry.or_insert(kind);
        id
    }

    /// Identity of a known label, if any.
    pub fn id_of(&self, label: &str) -> Option<usize> {
        self.wires.get_index_of(label)
    }

    pub fn kind(&self, id: usize) -> WireKind {
        *self.wires.get_index(id).unwrap().1
    }

    pub fn label(&self, id: usize) -> &str {
        self.wires.get_index(id).unwrap().0
    }

    /// Whether the constant wire with this identity is the literal one.
    ///
    /// Only meaningful for [`WireKind::Constant`] wires.
    pub fn constant_value(&self, id: usize) -> u8 {
        (self.label(id) == "1") as u8
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// Iterate wires in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, WireKind)> {
        self.wires
            .iter()
            .enumerate()
            .map(|(id, (label, &kind))| (id, label.as_str(), kind))
    }
}

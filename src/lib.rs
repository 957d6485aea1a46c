// SPDX-License-Identifier: Apache-2.0
pub mod error;

pub mod symtab;

pub mod netlist;

pub mod graph;

pub mod eval;

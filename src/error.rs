// SPDX-License-Identifier: Apache-2.0
//! Error types shared by all circuit build stages.
//!
//! Every error here is terminal for the run: a failed parse or a
//! malformed circuit never reaches the evaluator.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CircuitError {
    // parse errors
    #[error("unknown token {0:?}")]
    UnknownToken(String),

    #[error("expected a non-negative integer, got {0:?}")]
    BadCount(String),

    #[error("unexpected end of netlist")]
    UnexpectedEof,

    #[error("wire label {0:?} exceeds 16 characters")]
    TokenTooLong(String),

    #[error("gate size {0} is too large")]
    SizeTooLarge(usize),

    #[error("{0} declared inputs exceed the assignment sweep limit")]
    TooManyInputs(usize),

    #[error("wire {0:?} is not laid out as a declared port; \
             INPUT/OUTPUT statements must precede any use of their wires")]
    PortLayout(String),

    // malformed circuit errors
    #[error("wire {0:?} is driven by more than one gate")]
    MultipleDrivers(String),

    #[error("wire {0:?} is read by more than one gate")]
    MultipleReaders(String),

    #[error("wire {0:?} is used as a gate input but nothing drives it")]
    UndrivenWire(String),

    #[error("wire {0:?} cannot be driven by a gate")]
    DrivesFixedWire(String),

    #[error("the discarded wire \"_\" is used as a gate input")]
    ReadsDiscarded,

    // cycle error
    #[error("combinational loop through gate #{0}")]
    CombinationalLoop(usize),
}

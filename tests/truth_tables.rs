// SPDX-License-Identifier: Apache-2.0
//! End-to-end truth tables over full netlists.

use truthtab::error::CircuitError;
use truthtab::eval::{Row, TruthTable};
use truthtab::netlist::Circuit;

fn rows(src: &str) -> Vec<Row> {
    let circuit = Circuit::parse(src).unwrap();
    TruthTable::build(&circuit).unwrap().collect()
}

fn lines(src: &str) -> Vec<String> {
    rows(src).iter().map(|r| r.to_string()).collect()
}

#[test]
fn half_adder() {
    assert_eq!(
        lines("INPUT 2 A B\nOUTPUT 2 S C\nXOR A B S\nAND A B C\nEND\n"),
        vec!["0 0 | 0 0", "0 1 | 1 0", "1 0 | 1 0", "1 1 | 0 1"],
    );
}

#[test]
fn full_adder() {
    // inputs fan out freely; temporaries are single-reader, so A^B is
    // computed once per consumer
    let rows = rows(
        "INPUT 3 A B Cin OUTPUT 2 S Cout \
         XOR A B T1 XOR T1 Cin S \
         XOR A B T2 AND T2 Cin T3 \
         AND A B T4 OR T3 T4 Cout END",
    );
    assert_eq!(rows.len(), 8);
    for row in rows {
        let (a, b, cin) = (row.inputs[0], row.inputs[1], row.inputs[2]);
        assert_eq!(row.outputs[0], a ^ b ^ cin);
        assert_eq!(row.outputs[1], (a & b) | (cin & (a ^ b)));
    }
}

#[test]
fn one_to_two_decoder() {
    assert_eq!(
        lines("INPUT 1 A OUTPUT 2 O0 O1 DECODER 1 A O0 O1 END"),
        vec!["0 | 1 0", "1 | 0 1"],
    );
}

#[test]
fn decoder_outputs_are_one_hot() {
    let rows = rows(
        "INPUT 3 A B C OUTPUT 8 O0 O1 O2 O3 O4 O5 O6 O7 \
         DECODER 3 A B C O0 O1 O2 O3 O4 O5 O6 O7 END",
    );
    for (v, row) in rows.iter().enumerate() {
        assert_eq!(row.outputs.iter().map(|&b| b as usize).sum::<usize>(), 1);
        // inputs arrive MSB-first, so the asserted index is the row value
        assert_eq!(row.outputs[v], 1);
    }
}

#[test]
fn two_to_one_multiplexer() {
    let rows = rows("INPUT 3 D0 D1 S OUTPUT 1 O MULTIPLEXER 1 D0 D1 S O END");
    assert_eq!(rows.len(), 8);
    for row in &rows {
        let (d0, d1, s) = (row.inputs[0], row.inputs[1], row.inputs[2]);
        assert_eq!(row.outputs[0], if s == 1 { d1 } else { d0 });
    }
    // D0=1, D1=0, S=1 selects D1
    assert_eq!(rows[0b101].to_string(), "1 0 1 | 0");
}

#[test]
fn four_to_one_multiplexer_selects_by_msb_first_selector() {
    let rows = rows(
        "INPUT 6 D0 D1 D2 D3 S1 S0 OUTPUT 1 O \
         MULTIPLEXER 2 D0 D1 D2 D3 S1 S0 O END",
    );
    for row in rows {
        let sel = ((row.inputs[4] as usize) << 1) | row.inputs[5] as usize;
        assert_eq!(row.outputs[0], row.inputs[sel]);
    }
}

#[test]
fn binary_operator_columns() {
    let rows = rows(
        "INPUT 2 A B OUTPUT 7 Oand Oor Onand Onor Oxor Onot Opass \
         AND A B Oand OR A B Oor NAND A B Onand NOR A B Onor \
         XOR A B Oxor NOT A Onot PASS B Opass END",
    );
    assert_eq!(rows.len(), 4);
    for row in rows {
        let (a, b) = (row.inputs[0], row.inputs[1]);
        assert_eq!(
            row.outputs,
            vec![a & b, a | b, (a & b) ^ 1, (a | b) ^ 1, a ^ b, a ^ 1, b],
        );
    }
}

#[test]
fn temp_feeding_two_slots_of_one_gate() {
    // AND of a wire with itself is the wire: O = !A
    assert_eq!(
        lines("INPUT 1 A OUTPUT 1 O NOT A T AND T T O END"),
        vec!["0 | 1", "1 | 0"],
    );
}

#[test]
fn constant_wires() {
    assert_eq!(
        lines("INPUT 1 A OUTPUT 2 X Y AND A 0 X OR A 1 Y END"),
        vec!["0 | 0 1", "1 | 0 1"],
    );
}

#[test]
fn declaration_order_does_not_matter() {
    // the driver of T is declared after its consumer
    assert_eq!(
        lines("INPUT 1 A OUTPUT 1 O NOT T O NOT A T END"),
        vec!["0 | 0", "1 | 1"],
    );
}

#[test]
fn row_count_is_two_to_the_inputs() {
    let rows = rows(
        "INPUT 5 A B C D E OUTPUT 1 O \
         AND A B T1 AND T1 C T2 AND T2 D T3 AND T3 E O END",
    );
    assert_eq!(rows.len(), 32);
    assert_eq!(rows.iter().filter(|r| r.outputs[0] == 1).count(), 1);
}

#[test]
fn gateless_netlist_still_sweeps_all_assignments() {
    let circuit = Circuit::parse("INPUT 3 A B C END").unwrap();
    let tt = TruthTable::build(&circuit).unwrap();
    assert_eq!(tt.num_rows(), 8);
    let rows: Vec<Row> = tt.collect();
    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|r| r.outputs.is_empty()));
    assert_eq!(rows[6].inputs, vec![1, 1, 0]);
}

#[test]
fn parallel_rows_match_serial_rows() {
    let src = "INPUT 4 A B C D OUTPUT 2 X Y \
               XOR A B T1 XOR C D T2 AND T1 T2 X OR A D Y END";
    let circuit = Circuit::parse(src).unwrap();
    let tt = TruthTable::build(&circuit).unwrap();
    let parallel = tt.par_rows();
    let serial: Vec<Row> = tt.collect();
    assert_eq!(parallel, serial);
}

#[test]
fn feedback_fails_before_any_row() {
    let circuit = Circuit::parse("INPUT 1 A AND A Y X PASS X Y END").unwrap();
    assert!(matches!(
        TruthTable::build(&circuit),
        Err(CircuitError::CombinationalLoop(_)),
    ));
}

#[test]
fn multiply_driven_wire_fails_before_any_row() {
    let circuit =
        Circuit::parse("INPUT 2 A B OUTPUT 1 O NOT A T NOT B T PASS T O END").unwrap();
    assert_eq!(
        TruthTable::build(&circuit).err(),
        Some(CircuitError::MultipleDrivers("T".to_string())),
    );
}

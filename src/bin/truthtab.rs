// SPDX-License-Identifier: Apache-2.0
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;

use itertools::Itertools;
use truthtab::eval::TruthTable;
use truthtab::netlist::Circuit;
use truthtab::symtab::WireKind;

#[derive(clap::Parser, Debug)]
struct TruthTableArgs {
    /// Netlist path. Reads standard input when omitted.
    netlist: Option<PathBuf>,
    /// Evaluate rows on the rayon worker pool.
    ///
    /// Rows are still printed in ascending assignment order.
    #[clap(long)]
    parallel: bool,
}

fn run(args: &TruthTableArgs) -> Result<(), String> {
    let src = match &args.netlist {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read standard input: {}", e))?;
            buf
        }
    };

    let circuit = Circuit::parse(&src).map_err(|e| e.to_string())?;
    clilog::info!(
        "netlist: {} wires, {} gates, inputs [{}], outputs [{}]",
        circuit.wires.len(),
        circuit.gates.len(),
        circuit
            .wires
            .iter()
            .filter(|&(_, _, k)| k == WireKind::Input)
            .map(|(_, label, _)| label)
            .format(", "),
        circuit
            .wires
            .iter()
            .filter(|&(_, _, k)| k == WireKind::Output)
            .map(|(_, label, _)| label)
            .format(", ")
    );

    let table = TruthTable::build(&circuit).map_err(|e| e.to_string())?;

    fn emit(out: &mut impl Write, row: &truthtab::eval::Row) -> Result<(), String> {
        writeln!(out, "{}", row).map_err(|e| format!("cannot write row: {}", e))
    }
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.parallel {
        for row in table.par_rows() {
            emit(&mut out, &row)?;
        }
    } else {
        for row in table {
            emit(&mut out, &row)?;
        }
    }
    out.flush()
        .map_err(|e| format!("cannot write rows: {}", e))?;
    Ok(())
}

fn main() {
    clilog::init_stderr_color_debug();
    let args = <TruthTableArgs as clap::Parser>::parse();
    if let Err(msg) = run(&args) {
        clilog::error!("{}", msg);
        std::process::exit(1);
    }
}

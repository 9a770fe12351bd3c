//! Thin binary: loads a TOML config, runs the placer, prints the report
//! lines, and hands the final assignment to the writer stub.

use std::path::PathBuf;
use std::process::ExitCode;

use ioplace_core::config::Parameters;
use ioplace_core::io::{parse_def, write_report};
use ioplace_core::orchestrator;

fn main() -> ExitCode {
    env_logger::init();

    let Some(config_path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: ioplace <config.toml>");
        return ExitCode::FAILURE;
    };

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &std::path::Path) -> Result<(), String> {
    let parms = Parameters::from_file(config_path)?;
    let design = parse_def(&parms.input_def_file)?;

    let report = orchestrator::run(&design.core, design.netlist, &parms)?;

    if let Some(before) = report.hpwl_before {
        println!("***HPWL before IOPlacement: {before}***");
    }
    if let Some(after) = report.hpwl_after {
        println!("***HPWL after IOPlacement: {after}***");
    }

    write_report(&parms.output_def_file, &report.assignment, &parms)?;
    Ok(())
}

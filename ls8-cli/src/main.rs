//! LS-8 command-line runner

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ls8_loader::{FileSource, ProgramSource, SourceFormat};
use ls8_runtime::{ExecutionResult, HaltReason, IOHandler, VM, VMConfig};
use ls8_spec::Register;

/// LS-8 virtual CPU
#[derive(Debug, Parser)]
#[command(name = "ls8", version, about)]
struct Args {
    /// Program file to execute
    program: PathBuf,

    /// Program file format, inferred from the extension when omitted
    #[arg(long, value_name = "binary|hex|raw")]
    format: Option<SourceFormat>,

    /// Stop after this many cycles
    #[arg(long, value_name = "N")]
    max_cycles: Option<u64>,

    /// Log every executed instruction to stderr
    #[arg(long)]
    trace: bool,

    /// Print a listing of the program instead of running it
    #[arg(long)]
    disassemble: bool,

    /// Print registers, PC and flags to stderr after the run
    #[arg(long)]
    dump_state: bool,
}

fn init_tracing(trace: bool) {
    let default = if trace { "warn,ls8_runtime=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn source_for(args: &Args) -> FileSource {
    match args.format {
        Some(format) => FileSource::with_format(&args.program, format),
        None => FileSource::new(&args.program),
    }
}

/// Program output goes straight to stdout and is not kept
fn console() -> IOHandler {
    IOHandler::streaming(std::io::stdout())
}

fn dump_state(result: &ExecutionResult) -> String {
    let mut out = format!(
        "PC={:#04x} FL={:#010b} cycles={}",
        result.pc, result.flags, result.cycles
    );
    for reg in Register::ALL {
        out.push_str(&format!(" {}={:#04x}", reg, result.registers[reg.index()]));
    }
    out
}

fn run(args: &Args) -> Result<ExitCode> {
    let program = source_for(args)
        .load()
        .with_context(|| format!("failed to load {}", args.program.display()))?;

    if args.disassemble {
        tracing::debug!(bytes = program.len(), "disassembling");
        print!("{}", ls8_disassembler::disassemble(&program));
        return Ok(ExitCode::SUCCESS);
    }

    let config = VMConfig {
        max_cycles: args.max_cycles,
        trace: args.trace,
        enable_execution_trace: false,
    };

    let vm = VM::with_io(&program, config, console());
    let result = vm.run().context("execution failed")?;

    if args.dump_state {
        eprintln!("{}", dump_state(&result));
    }

    let code = match result.halt_reason {
        HaltReason::Halt => ExitCode::SUCCESS,
        HaltReason::Fault(fault) => {
            eprintln!("fault: {}", fault);
            ExitCode::FAILURE
        }
        HaltReason::CycleLimit => {
            eprintln!("stopped after reaching the cycle limit ({} cycles)", result.cycles);
            ExitCode::FAILURE
        }
    };

    Ok(code)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.trace);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

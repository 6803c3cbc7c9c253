//! Conformance-test runner.
//!
//! Loads a RISC-V ELF executable, runs it to completion, and classifies the
//! outcome using the riscv-tests completion protocol: an ECALL with
//! `a7 == 93` (the exit syscall) signals completion, `a0` carries the exit
//! status, and `gp` holds the number of the failing test case. Exit code 0
//! means the test passed; anything else is reported with the faulting PC
//! and, on request, a full state dump.

use clap::{Parser, ValueEnum};
use rvrun_core::config::{Config, ExtensionSet, Xlen};
use rvrun_core::isa::privileged::opcodes::SYS_EXIT;
use rvrun_core::sim::{RunState, Simulator, loader};
use std::path::PathBuf;
use std::{fs, process};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum XlenArg {
    /// 32-bit registers and address space.
    Rv32,
    /// 64-bit registers and address space.
    Rv64,
}

#[derive(Parser, Debug)]
#[command(
    name = "rvrun",
    version,
    about = "Functional RISC-V simulator and conformance-test runner",
    long_about = "Run a RISC-V ELF executable in a functional (untimed) simulator.\n\n\
        The run ends when the program executes ECALL with a7 == 93: a0 == 0 is a\n\
        pass (exit code 0), anything else reports the failing test number from gp.\n\n\
        Examples:\n  rvrun rv64ui-p-add\n  rvrun --isa imac --steps 1000000 my-test.elf"
)]
struct Cli {
    /// ELF executable to run.
    elf: PathBuf,

    /// Enabled ISA extensions, -march style.
    #[arg(long, default_value = "imafdc_zba_zbb_zbc_zbs_zfh")]
    isa: String,

    /// Override the word width taken from the ELF class.
    #[arg(long, value_enum)]
    xlen: Option<XlenArg>,

    /// Step budget; the run fails if the program has not completed by then.
    #[arg(long)]
    steps: Option<u64>,

    /// Initial stack pointer.
    #[arg(long, default_value_t = 64 * 1024 * 1024)]
    stack_addr: u64,

    /// Dump the final architectural state on failure.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    process::exit(run(&Cli::parse()));
}

fn run(cli: &Cli) -> i32 {
    let ext: ExtensionSet = match cli.isa.parse() {
        Ok(ext) => ext,
        Err(e) => {
            eprintln!("error: invalid --isa '{}': {e}", cli.isa);
            return 2;
        }
    };
    let bytes = match fs::read(&cli.elf) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", cli.elf.display());
            return 2;
        }
    };
    let image = match loader::load_elf(&bytes) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}: {e}", cli.elf.display());
            return 2;
        }
    };

    let xlen = match cli.xlen {
        Some(XlenArg::Rv32) => Xlen::Rv32,
        Some(XlenArg::Rv64) => Xlen::Rv64,
        None => image.xlen,
    };
    info!(entry = image.entry, ?xlen, isa = %ext, "loaded image");
    let mut config = Config::new(xlen, ext);
    config.stack_addr = cli.stack_addr;

    let mut sim = Simulator::new(image.mem, image.entry, config);
    let _ = sim.run(cli.steps);
    let state = sim.state();
    debug!(run_state = ?sim.run_state(), "run finished");

    if sim.run_state() == RunState::HaltedBudget {
        eprintln!(
            "FAIL: step budget exhausted at pc {:#x}",
            state.read_register("ip").unwrap_or(0)
        );
        if cli.verbose {
            eprint!("{state}");
        }
        return 1;
    }

    // Completion protocol: ECALL with a7 == 93 ends the test; a0 == 0 passes.
    if state.is_ecall() && state.read_register("a7") == Some(SYS_EXIT) {
        if state.read_register("a0") == Some(0) {
            println!("PASS");
            return 0;
        }
        eprintln!(
            "FAIL: test {} (a0 = {:#x}, ip = {:#x})",
            state.read_register("gp").unwrap_or(0),
            state.read_register("a0").unwrap_or(0),
            state.read_register("ip").unwrap_or(0),
        );
        if cli.verbose {
            eprint!("{state}");
        }
        return 1;
    }

    eprintln!(
        "FAIL: halted ({:?}) at ip {:#x}",
        state.halt_cause(),
        state.read_register("ip").unwrap_or(0),
    );
    if cli.verbose {
        eprint!("{state}");
    }
    1
}

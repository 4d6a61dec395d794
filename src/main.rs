use clap::Parser;
use lc3_vm::emulator::Emulator;
use lc3_vm::errors::ExecutionError;
use lc3_vm::hardware::keyboard::TerminalInputProvider;
use lc3_vm::hardware::memory::Memory;
use lc3_vm::terminal::{self, RawModeWriter};
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Runs an LC-3 object file until it halts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to the object file: big-endian words, the first one being the load address
    rom: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(emu: &mut Emulator<'_>) -> Result<(), ExecutionError> {
    let stdout = io::stdout();
    let _lock = terminal::set_terminal_raw(stdout.lock());
    let mut stdout = RawModeWriter::new(stdout.lock());
    emu.execute(&mut stdout)?;
    write!(stdout, "\nShutting down LC-3 VM...\n")
        .and_then(|()| stdout.flush())
        .map_err(|e| ExecutionError::IOInputOutputError(e.to_string()))
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let mut memory = Memory::new(Box::new(TerminalInputProvider::new()));
    match memory.load_rom_image(&cli.rom) {
        Ok(origin) => tracing::debug!(origin = format_args!("{origin:#06X}"), "program loaded"),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    }
    let mut emu = Emulator::new(&mut memory);
    match run(&mut emu) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(registers = ?emu.registers(), "{e}");
            ExitCode::FAILURE
        }
    }
}

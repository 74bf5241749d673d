use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cs241_mips::debugger::Debugger;
use cs241_mips::{RegisterFile, Session};
use std::io::{Stdin, Stdout};
use std::path::PathBuf;

mod payload;
use payload::{load_program, parse_u32};

const DEFAULT_MEMORY_SIZE: u32 = 16 * 1024 * 1024; // 16 MiB

#[derive(Parser, Debug)]
#[command(
    name = "cs241-session",
    about = "Load a CS241 MIPS program and dump the initial session state"
)]
struct Cli {
    /// Memory size in bytes, decimal or 0x-prefixed hex
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE, value_parser = parse_u32)]
    memory_size: u32,

    /// Program image loaded at address 0
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    #[command(subcommand)]
    convention: Convention,
}

#[derive(Subcommand, Debug)]
enum Convention {
    /// Pass two integers in $1 and $2
    Twoints {
        #[arg(allow_negative_numbers = true)]
        a: i32,
        #[arg(allow_negative_numbers = true)]
        b: i32,
    },
    /// Store an array after the program, its address in $1 and length in $2
    Array {
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<i32>,
    },
}

fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let program = load_program(&cli.program)?;

    let session: Session<Stdin, Stdout> = match &cli.convention {
        Convention::Twoints { a, b } => Session::two_ints(
            cli.memory_size,
            &program,
            *a,
            *b,
            std::io::stdin(),
            std::io::stdout(),
        ),
        Convention::Array { values } => Session::array(
            cli.memory_size,
            &program,
            values,
            std::io::stdin(),
            std::io::stdout(),
        ),
    }
    .context("Failed to set up session")?;

    let (registers, memory): (RegisterFile, _) = session.into_parts();
    let (mut backing, _, _) = memory.into_parts();

    // Dump the program image plus the array that follows it.
    let array_words = match &cli.convention {
        Convention::Array { values } => values.len(),
        Convention::Twoints { .. } => 0,
    };
    let words = program.len().div_ceil(4) + array_words;
    Debugger::default().print_debug_info(&registers, &mut backing, words as u64)?;

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

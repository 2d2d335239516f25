//! MIPS pipeline simulator CLI.
//!
//! Single entry point around the core engine. It performs:
//! 1. **Assembly:** Reads a source file and assembles it.
//! 2. **Simulation:** Runs the program to completion under the configured
//!    cycle limit, optionally printing a per-cycle pipeline trace.
//! 3. **Reporting:** Prints the counter summary (or JSON) and the final
//!    register/memory state.

use std::path::PathBuf;
use std::{fs, process};

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use mipsim_core::{assemble, Config, Engine};

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "Cycle-level simulator of a classic 5-stage MIPS pipeline",
    long_about = "Assembles a MIPS source file and simulates it cycle by cycle, modeling \
load-use stalls, operand forwarding, and branch flush timing.\n\nExamples:\n  \
mipsim program.s\n  mipsim program.s --trace\n  mipsim program.s --config sim.json --json"
)]
struct Cli {
    /// Assembly source file to simulate.
    file: PathBuf,

    /// JSON configuration file (cycle limit, forwarding switch).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable operand forwarding (stalls still apply).
    #[arg(long)]
    no_forwarding: bool,

    /// Override the cycle safety limit.
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Print the pipeline occupants every cycle.
    #[arg(short, long)]
    trace: bool,

    /// Emit the final counters as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        error!("{message}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = fs::read_to_string(&cli.file)
        .map_err(|e| format!("cannot read {}: {e}", cli.file.display()))?;
    let program = assemble(&source).map_err(|e| e.to_string())?;

    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Config::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => Config::default(),
    };
    if cli.no_forwarding {
        config.forwarding = false;
    }
    if let Some(limit) = cli.max_cycles {
        config.max_cycles = limit;
    }

    let mut engine = Engine::new(program, config).map_err(|e| e.to_string())?;

    let result = if cli.trace {
        run_traced(&mut engine)
    } else {
        engine.run()
    };
    if let Err(e) = result {
        // Still dump what we know; a hung program's last state is the
        // interesting part.
        print_state(&engine);
        return Err(e.to_string());
    }

    if cli.json {
        let text = serde_json::to_string_pretty(&engine.stats).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        print!("{}", engine.stats);
        print_state(&engine);
    }
    Ok(())
}

/// Like [`Engine::run`] but renders each cycle as it completes.
fn run_traced(engine: &mut Engine) -> Result<(), mipsim_core::SimError> {
    while !engine.is_done() {
        engine.run_one()?;
        let snap = engine.snapshot();
        let occupant = |slot: &Option<String>| {
            slot.clone().unwrap_or_else(|| "---".to_string())
        };
        println!(
            "cycle {:03} | IF: {:<24} ID: {:<24} EX: {:<24} MEM: {:<24} WB: {}",
            snap.cycle,
            occupant(&snap.pipeline.fetch),
            occupant(&snap.pipeline.decode),
            occupant(&snap.pipeline.execute),
            occupant(&snap.pipeline.memory),
            occupant(&snap.pipeline.writeback),
        );
    }
    Ok(())
}

fn print_state(engine: &Engine) {
    let registers: Vec<(String, i32)> = engine.regs.nonzero().collect();
    if !registers.is_empty() {
        println!("registers:");
        for (name, value) in registers {
            println!("  {name:>5} = {value} ({:#010x})", value as u32);
        }
    }
    if engine.regs.hi != 0 || engine.regs.lo != 0 {
        println!("  hi/lo = {} / {}", engine.regs.hi, engine.regs.lo);
    }
    if !engine.mem.is_empty() {
        println!("memory:");
        for (addr, value) in engine.mem.iter() {
            println!("  [{addr:#010x}] = {value} ({:#010x})", value as u32);
        }
    }
}

//! The simulation engine.
//!
//! Owns all architectural and pipeline state and advances it one cycle per
//! [`Engine::tick`], in the fixed order the model requires:
//! 1. Snapshot the execute, memory, and writeback occupants; fix the
//!    forwarding tags for the instruction about to execute.
//! 2. Commit writeback, then advance MEM -> WB and EX -> MEM, running each
//!    stage as its occupant moves.
//! 3. Evaluate the load-use stall against the pre-advance occupants. A stall
//!    freezes decode, fetch, and the program counter for this cycle and
//!    leaves a bubble in execute.
//! 4. Otherwise advance ID -> EX with branch resolution (a taken branch
//!    rewrites the program counter so the next fetch uses it), then
//!    IF -> ID, then fetch unless a fetch bubble is armed.
//!
//! The write-before-read ordering across stages is carried entirely by this
//! sequence; no stage ever observes a slot written later in the same cycle.

use serde::Serialize;
use tracing::trace;

use crate::asm::Program;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::memory::Memory;
use crate::core::pipeline::{hazards, stages, InFlight, Pipeline};
use crate::core::regfile::RegFile;
use crate::stats::SimStats;

/// Cycle-level simulator for the five-stage pipeline.
#[derive(Debug)]
pub struct Engine {
    /// Architectural register file (plus Hi/Lo).
    pub regs: RegFile,
    /// Data memory.
    pub mem: Memory,
    /// Performance counters for this run.
    pub stats: SimStats,
    program: Program,
    config: Config,
    pipeline: Pipeline,
    pc: u32,
    stall_next_fetch: bool,
}

impl Engine {
    /// Builds an engine over an assembled program and performs the first
    /// fetch, so the cycle count reported by [`SimStats`] equals the number
    /// of [`Engine::tick`] calls.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UndefinedLabel`] if any branch or jump references
    /// a label the program never defines. This is checked up front so the
    /// failure cannot surface mid-run.
    pub fn new(program: Program, config: Config) -> Result<Self, SimError> {
        for inst in &program.instructions {
            if let Some(label) = inst.op.uses_label().then(|| inst.label()).flatten() {
                if !program.labels.contains_key(label) {
                    return Err(SimError::UndefinedLabel {
                        label: label.to_string(),
                        pc: inst.pc,
                    });
                }
            }
        }
        let mut engine = Self {
            regs: RegFile::new(),
            mem: Memory::new(),
            stats: SimStats::default(),
            program,
            config,
            pipeline: Pipeline::default(),
            pc: 0,
            stall_next_fetch: false,
        };
        engine.fetch_into_pipeline();
        Ok(engine)
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// True once the instruction store is exhausted and the pipeline has
    /// drained.
    pub fn is_done(&self) -> bool {
        self.pc >= self.program.end_pc() && self.pipeline.is_empty()
    }

    /// Advances the pipeline by one cycle.
    pub fn tick(&mut self) {
        self.stats.cycles += 1;

        // Pre-advance occupants: forwarding and hazard sources for this
        // cycle, cloned before the slots are overwritten.
        let ex_snap = self.pipeline.execute.clone();
        let near_src = self.pipeline.memory.clone();
        let far_src = self.pipeline.writeback.clone();

        if let Some(ex) = self.pipeline.execute.as_mut() {
            ex.fwd_rs = hazards::forward_select(near_src.as_ref(), far_src.as_ref(), ex.inst.rs);
            ex.fwd_rt = hazards::forward_select(near_src.as_ref(), far_src.as_ref(), ex.inst.rt);
        }

        if let Some(done) = self.pipeline.writeback.take() {
            stages::writeback::commit(&done, &mut self.regs, &mut self.stats);
        }

        self.pipeline.writeback = self.pipeline.memory.take();
        if let Some(slot) = self.pipeline.writeback.as_mut() {
            stages::memory::access(slot, &mut self.mem);
        }

        self.pipeline.memory = self.pipeline.execute.take();
        if let Some(slot) = self.pipeline.memory.as_mut() {
            let near = self.pipeline.writeback.as_ref().and_then(|i| i.result);
            let far = far_src.as_ref().and_then(|i| i.result);
            stages::execute::execute(
                slot,
                &mut self.regs,
                near,
                far,
                self.config.forwarding,
                &mut self.stats,
            );
        }

        if hazards::load_use_stall(
            ex_snap.as_ref(),
            near_src.as_ref(),
            self.pipeline.decode.as_ref(),
        ) {
            // Execute already holds a bubble; decode, fetch, and the program
            // counter are untouched until the load clears the memory stage.
            self.stats.stalls_data += 1;
            trace!(cycle = self.stats.cycles, "load-use stall");
            return;
        }

        self.pipeline.execute = self.pipeline.decode.take();
        if let Some(slot) = self.pipeline.execute.as_mut() {
            let outcome = stages::decode::decode(
                slot,
                &mut self.regs,
                &self.program.labels,
                self.pipeline.memory.as_ref(),
                self.pipeline.writeback.as_ref(),
                self.config.forwarding,
            );
            if outcome.taken {
                self.stats.branches_taken += 1;
                if let Some(target) = outcome.target {
                    self.pc = target;
                }
            }
            if outcome.is_jr {
                self.stall_next_fetch = true;
            }
        }

        self.pipeline.decode = self.pipeline.fetch.take();
        if self.stall_next_fetch {
            self.pipeline.fetch = None;
            self.stall_next_fetch = false;
            if self.pc < self.program.end_pc() {
                self.stats.stalls_control += 1;
            }
        } else {
            self.fetch_into_pipeline();
        }
    }

    /// Advances one cycle under the cycle safety limit.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimitExceeded`] without ticking if the limit
    /// has been reached. The engine state is left intact so the caller can
    /// still render the last known pipeline, registers, and memory.
    pub fn run_one(&mut self) -> Result<(), SimError> {
        if self.stats.cycles >= self.config.max_cycles {
            return Err(SimError::CycleLimitExceeded {
                limit: self.config.max_cycles,
                pc: self.pc,
            });
        }
        self.tick();
        Ok(())
    }

    /// Runs to completion or the cycle safety limit.
    ///
    /// # Errors
    ///
    /// See [`Engine::run_one`].
    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.is_done() {
            self.run_one()?;
        }
        Ok(())
    }

    /// Read-only view of the current cycle, sufficient to render a trace
    /// line plus register and memory dumps.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cycle: self.stats.cycles,
            pc: self.pc,
            pipeline: PipelineView {
                fetch: render(self.pipeline.fetch.as_ref()),
                decode: render(self.pipeline.decode.as_ref()),
                execute: render(self.pipeline.execute.as_ref()),
                memory: render(self.pipeline.memory.as_ref()),
                writeback: render(self.pipeline.writeback.as_ref()),
            },
            registers: self.regs.nonzero().collect(),
            memory: self.mem.iter().collect(),
        }
    }

    fn fetch_into_pipeline(&mut self) {
        let outcome = stages::fetch::fetch(self.pc, &self.program, &mut self.stats);
        if outcome.slot.is_some() {
            self.pc = self.pc.wrapping_add(4);
            if outcome.control_flow {
                self.stall_next_fetch = true;
            }
        }
        self.pipeline.fetch = outcome.slot;
    }
}

fn render(slot: Option<&InFlight>) -> Option<String> {
    slot.map(|s| s.inst.to_string())
}

/// Stage occupants rendered for display; `None` is a bubble.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineView {
    /// Occupant of the fetch slot.
    pub fetch: Option<String>,
    /// Occupant of the decode slot.
    pub decode: Option<String>,
    /// Occupant of the execute slot.
    pub execute: Option<String>,
    /// Occupant of the memory slot.
    pub memory: Option<String>,
    /// Occupant of the writeback slot.
    pub writeback: Option<String>,
}

/// One cycle's externally visible state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Cycle number (number of completed ticks).
    pub cycle: u64,
    /// Program counter after this cycle.
    pub pc: u32,
    /// Rendered stage occupants.
    pub pipeline: PipelineView,
    /// Non-zero registers as `(name, value)` pairs, in index order.
    pub registers: Vec<(String, i32)>,
    /// Written memory words in address order.
    pub memory: Vec<(u32, i32)>,
}

//! The LC-3 CPU: fetch, decode and execute on top of [`Memory`].
pub mod instruction;
pub mod opcodes;
#[cfg(test)]
pub(crate) mod test_helpers;
pub mod trap_routines;

use crate::emulator::instruction::{Instruction, Operation};
use crate::errors::ExecutionError;
use crate::hardware::memory::Memory;
use crate::hardware::registers::Registers;
use std::io::Write;
use std::ops::ControlFlow;

/// Externally visible state of the machine, `Halted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted,
}

/// The public facing emulator used to run LC-3 programs.
///
/// Owns the register file and borrows the memory it operates on for its whole lifetime.
/// Running a program again requires a new instance.
pub struct Emulator<'m> {
    registers: Registers,
    memory: &'m mut Memory,
    state: RunState,
}

impl<'m> Emulator<'m> {
    /// Constructor method, registers are in reset state with PC at `0x3000`.
    pub fn new(memory: &'m mut Memory) -> Self {
        Self {
            registers: Registers::new(),
            memory,
            state: RunState::Running,
        }
    }
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }
    #[must_use]
    pub fn memory(&self) -> &Memory {
        &*self.memory
    }
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Executes one instruction.
    ///
    /// The PC is incremented before the instruction executes, so PC relative addressing is
    /// based on the address of the following instruction.
    ///
    /// Returns `Continue` while the machine keeps running, `Break(Ok(()))` once it halted and
    /// `Break(Err(_))` on a fatal error. A halted machine does not fetch any further instruction.
    pub fn step(&mut self, stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
        if self.state == RunState::Halted {
            return ControlFlow::Break(Ok(()));
        }
        let pc = self.registers.pc().as_binary();
        let instruction = Instruction::from(self.memory.read(pc));
        self.registers.inc_pc();
        tracing::trace!(pc = format_args!("{pc:#06X}"), ?instruction, "execute");

        let res = self.execute_instruction(instruction, stdout);
        match res {
            ControlFlow::Break(Ok(())) => self.state = RunState::Halted,
            ControlFlow::Continue(()) if self.memory.is_interrupted() => {
                return ControlFlow::Break(Err(ExecutionError::Interrupted));
            }
            _ => {}
        }
        res
    }

    fn execute_instruction(
        &mut self,
        i: Instruction,
        stdout: &mut impl Write,
    ) -> ControlFlow<Result<(), ExecutionError>> {
        let r = &mut self.registers;
        let memory = &mut *self.memory;
        match i.operation() {
            Operation::Br => opcodes::br(i, r),
            Operation::Add => opcodes::add(i, r),
            Operation::Ld => opcodes::ld(i, r, memory),
            Operation::St => opcodes::st(i, r, memory),
            Operation::Jsr => opcodes::jsr(i, r),
            Operation::And => opcodes::and(i, r),
            Operation::Ldr => opcodes::ldr(i, r, memory),
            Operation::Str => opcodes::str(i, r, memory),
            Operation::Not => opcodes::not(i, r),
            Operation::Ldi => opcodes::ldi(i, r, memory),
            Operation::Jmp => opcodes::jmp_or_ret(i, r),
            Operation::Lea => opcodes::lea(i, r),
            Operation::Trap => return opcodes::trap(i, r, memory, stdout),
            op @ (Operation::Rti | Operation::Sti | Operation::Res) => {
                return opcodes::unimplemented(op, r);
            }
        }
        ControlFlow::Continue(())
    }

    /// Runs the program until it halts.
    ///
    /// # Errors
    /// - See [`ExecutionError`]
    pub fn execute(&mut self, stdout: &mut impl Write) -> Result<(), ExecutionError> {
        loop {
            if let ControlFlow::Break(res) = self.step(stdout) {
                return res;
            }
        }
    }
}

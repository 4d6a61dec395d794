use crate::emulator::instruction::Operation;
use crate::emulator::trap_routines::TrapVector;
use std::error::Error;

/// Errors while loading a ROM image into memory.
#[derive(Debug, displaydoc::Display, PartialEq, Eq)]
pub enum LoadProgramError {
    /// Program {path} could not be read: {message}
    ProgramNotReadable { path: String, message: String },
    /// Program is missing valid .ORIG header, got {actual_bytes} bytes while at least 2 are needed
    ProgramMissingOrigHeader { actual_bytes: usize },
    /// Program has an odd number of bytes ({actual_bytes}), expected whole u16 words
    ProgramOddByteCount { actual_bytes: usize },
    /// Program too long, got {actual_instructions} u16 instructions at origin {origin:#06X} while limit is {maximum_instructions}
    ProgramTooLong {
        origin: u16,
        actual_instructions: usize,
        maximum_instructions: usize,
    },
}
impl Error for LoadProgramError {}

/// Fatal errors while executing a program. A regular HALT is not an error.
#[derive(Debug, displaydoc::Display, PartialEq, Eq)]
pub enum ExecutionError {
    /// Opcode {operation} at address {address:#06X} is not implemented
    UnimplementedOpcode { operation: Operation, address: u16 },
    /// Trap routine {trap} at address {address:#06X} is not implemented
    UnimplementedTrap { trap: TrapVector, address: u16 },
    /// Unknown trap vector {vector:#04X} at address {address:#06X}
    UnknownTrapVector { vector: u8, address: u16 },
    /// Execution interrupted by CTRL-C
    Interrupted,
    /// Error during reading Stdin or writing program output to Stdout: {0}
    IOInputOutputError(String),
}
impl Error for ExecutionError {}

#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;

    #[gtest]
    pub fn test_messages() {
        expect_that!(
            ExecutionError::UnimplementedOpcode {
                operation: Operation::Sti,
                address: 0x3000
            }
            .to_string(),
            eq("Opcode STI at address 0x3000 is not implemented")
        );
        expect_that!(
            ExecutionError::UnknownTrapVector {
                vector: 0x30,
                address: 0x3010
            }
            .to_string(),
            eq("Unknown trap vector 0x30 at address 0x3010")
        );
        expect_that!(
            LoadProgramError::ProgramMissingOrigHeader { actual_bytes: 1 }.to_string(),
            eq("Program is missing valid .ORIG header, got 1 bytes while at least 2 are needed")
        );
    }
}

//! Trap routines, the LC-3 system calls for console I/O.
use crate::errors::ExecutionError;
use crate::hardware::keyboard::KeyboardInputProvider;
use crate::hardware::memory::{MEMORY_SIZE_U16, Memory};
use crate::hardware::registers::{Registers, from_binary};
use std::io;
use std::io::Write;
use std::ops::ControlFlow;

/// Trap vectors as given in the low 8 bits of a `TRAP` instruction.
#[repr(u8)]
#[derive(enumn::N, displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapVector {
    /// GETC
    GetC = 0x20,
    /// OUT
    Out = 0x21,
    /// PUTS
    PutS = 0x22,
    /// IN
    In = 0x23,
    /// PUTSP
    PutSp = 0x24,
    /// HALT
    Halt = 0x25,
}

/// GETC: Read a single character from the keyboard. The character is not echoed onto the console.
///
/// Its key code is copied into R0, zero extended.
pub fn get_c(
    regs: &mut Registers,
    keyboard: &mut dyn KeyboardInputProvider,
) -> ControlFlow<Result<(), ExecutionError>> {
    match keyboard.read_key() {
        Ok(key) => {
            regs.set(0, from_binary(key));
            ControlFlow::Continue(())
        }
        Err(e) if e.kind() == io::ErrorKind::Interrupted => {
            ControlFlow::Break(Err(ExecutionError::Interrupted))
        }
        Err(e) => wrap_io_error_in_cf(&e),
    }
}

/// OUT: Write the character with the code in R0 to the console display.
pub fn out(regs: &Registers, stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
    let c = char_from_code(regs.get(0).as_binary());
    write_str_out(c.encode_utf8(&mut [0; 4]), stdout)
}

fn char_from_code(code: u16) -> char {
    char::from_u32(u32::from(code)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// PUTS: print the null-terminated string starting at the address in R0, one character per
/// memory cell.
pub fn put_s(
    regs: &Registers,
    mem: &Memory,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    let mut address = regs.get(0).as_binary();
    let mut s = String::with_capacity(120);
    // a memory without any 0 cell would loop forever
    for _ in 0..MEMORY_SIZE_U16 {
        let code = mem[address];
        if code == 0 {
            break;
        }
        s.push(char_from_code(code));
        address = address.wrapping_add(1);
    }
    write_str_out(s.as_str(), stdout)
}

/// HALT: End program and print a notice.
pub fn halt(stdout: &mut impl Write) -> ControlFlow<Result<(), ExecutionError>> {
    write_str_out("HALT\n", stdout)?;
    tracing::info!("program halted");
    ControlFlow::Break(Ok(()))
}

fn write_str_out(
    message: &str,
    stdout: &mut impl Write,
) -> ControlFlow<Result<(), ExecutionError>> {
    match write!(stdout, "{message}").and_then(|()| stdout.flush()) {
        Ok(()) => ControlFlow::Continue(()),
        Err(e) => wrap_io_error_in_cf(&e),
    }
}

fn wrap_io_error_in_cf(error: &io::Error) -> ControlFlow<Result<(), ExecutionError>, ()> {
    ControlFlow::Break(Err(ExecutionError::IOInputOutputError(error.to_string())))
}

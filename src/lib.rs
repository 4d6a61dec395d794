//! # LC-3 Virtual Machine.
//!
//! `lc3-vm` emulates the LC-3, a 16-bit educational computer with 8 general purpose registers,
//! 16 opcodes and trap routines for console I/O.
//! Usage starts with loading a program into [`hardware::memory::Memory`] and handing the memory
//! to an [`emulator::Emulator`].
//!
//!  # Example
//! ```
//! use lc3_vm::emulator::Emulator;
//! use lc3_vm::hardware::keyboard::ScriptedInputProvider;
//! use lc3_vm::hardware::memory::Memory;
//!
//! let mut memory = Memory::new(Box::new(ScriptedInputProvider::new("")));
//! let origin = memory
//!     .load_rom_bytes(&[
//!         0x30, 0x00, // .ORIG x3000
//!         0xE0, 0x02, // LEA R0, msg
//!         0xF0, 0x22, // PUTS
//!         0xF0, 0x25, // HALT
//!         0x00, 0x48, // msg: 'H'
//!         0x00, 0x49, // 'I'
//!         0x00, 0x00,
//!     ])
//!     .unwrap();
//! assert_eq!(origin, 0x3000);
//! let mut emu = Emulator::new(&mut memory);
//! let mut stdout = Vec::new();
//! emu.execute(&mut stdout).unwrap();
//! assert_eq!(String::from_utf8(stdout).unwrap(), "HIHALT\n");
//! ```
//! # Errors
//! - Loading: program is missing valid .ORIG header, has an odd number of bytes or is too long
//! - Execution: unimplemented opcodes (`STI`, `RTI`, reserved) and traps (`IN`, `PUTSP`),
//!   unknown trap vectors, I/O errors and CTRL-C

pub mod emulator;
pub mod errors;
pub mod hardware;
pub(crate) mod numbers;
pub mod terminal;

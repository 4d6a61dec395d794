//! Machine state the emulator operates on: memory with its mapped devices, the register file
//! and the keyboard feeding the memory-mapped keyboard registers.
pub mod keyboard;
pub mod memory;
pub mod registers;

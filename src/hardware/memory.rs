use crate::errors::LoadProgramError;
use crate::hardware::keyboard::KeyboardInputProvider;
use std::fmt::{Debug, Formatter};
use std::ops::Index;
use std::path::Path;

/// Address programs start at and where the PC points after reset.
pub const PROGRAM_SECTION_START: u16 = 0x3000;
/// Number of addressable `u16` cells.
pub const MEMORY_SIZE_U16: usize = 1 << 16;

/// Memory regions mapped to IO functionality.
#[repr(u16)]
#[derive(enumn::N, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryMappedIOLocations {
    /// Keyboard Status Register
    Kbsr = 0xFE00,
    /// Keyboard Data Register
    Kbdr = 0xFE02,
}

/// An abstraction for the whole LC-3 address space of 65536 `u16` cells.
///
/// Reading [`MemoryMappedIOLocations::Kbsr`] polls the keyboard and latches a pending key into
/// the keyboard registers, every other address is plain storage.
pub struct Memory {
    /// Index equals memory address
    data: Box<[u16]>,
    keyboard: Box<dyn KeyboardInputProvider>,
}

impl Debug for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let used = self.data.iter().filter(|cell| **cell != 0).count();
        write!(f, "Memory {{ non-zero cells: {used} }}")
    }
}

/// Raw access to a cell, without any device side effects.
impl Index<u16> for Memory {
    type Output = u16;
    fn index(&self, index: u16) -> &Self::Output {
        &self.data[usize::from(index)]
    }
}

impl Memory {
    const KEYBOARD_STATUS_REGISTER_SET: u16 = 1 << 15;
    const KEYBOARD_STATUS_REGISTER_UNSET: u16 = 0;

    #[must_use]
    pub fn new(keyboard: Box<dyn KeyboardInputProvider>) -> Self {
        Self {
            data: vec![0x0u16; MEMORY_SIZE_U16].into_boxed_slice(),
            keyboard,
        }
    }

    /// Reads the cell at `address`.
    ///
    /// A read of the keyboard status register first polls the keyboard: a pending key sets the
    /// status register to `0x8000` and the data register to the key code, otherwise the status
    /// register is cleared and the data register keeps its value.
    pub fn read(&mut self, address: u16) -> u16 {
        if MemoryMappedIOLocations::n(address) == Some(MemoryMappedIOLocations::Kbsr) {
            self.poll_keyboard();
        }
        self.data[usize::from(address)]
    }

    pub fn write(&mut self, address: u16, value: u16) {
        self.data[usize::from(address)] = value;
    }

    fn poll_keyboard(&mut self) {
        if let Some(key) = self.keyboard.check_key() {
            tracing::debug!(key, "keyboard latched key");
            self.write(
                MemoryMappedIOLocations::Kbsr as u16,
                Self::KEYBOARD_STATUS_REGISTER_SET,
            );
            self.write(MemoryMappedIOLocations::Kbdr as u16, key);
        } else {
            self.write(
                MemoryMappedIOLocations::Kbsr as u16,
                Self::KEYBOARD_STATUS_REGISTER_UNSET,
            );
        }
    }

    pub(crate) fn keyboard(&mut self) -> &mut dyn KeyboardInputProvider {
        self.keyboard.as_mut()
    }

    pub(crate) fn is_interrupted(&self) -> bool {
        self.keyboard.is_interrupted()
    }

    /// Sets every cell to 0.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copies `program` into memory starting at `origin`.
    ///
    /// # Errors
    /// - Program too long, it would run past the last address `0xFFFF`
    pub fn load_program(&mut self, origin: u16, program: &[u16]) -> Result<(), LoadProgramError> {
        let start = usize::from(origin);
        let maximum_instructions = MEMORY_SIZE_U16 - start;
        if program.len() > maximum_instructions {
            return Err(LoadProgramError::ProgramTooLong {
                origin,
                actual_instructions: program.len(),
                maximum_instructions,
            });
        }
        self.data[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Clears memory and loads an LC-3 object file: big-endian `u16` words, the first of which
    /// is the origin address the rest is loaded to.
    ///
    /// Returns the origin.
    ///
    /// # Errors
    /// - Program is missing valid .ORIG header (because it is shorter than one `u16` word)
    /// - Program has an odd number of bytes
    /// - Program too long
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<u16, LoadProgramError> {
        if bytes.len() < 2 {
            return Err(LoadProgramError::ProgramMissingOrigHeader {
                actual_bytes: bytes.len(),
            });
        }
        if bytes.len() % 2 != 0 {
            return Err(LoadProgramError::ProgramOddByteCount {
                actual_bytes: bytes.len(),
            });
        }
        let words: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let (header, program) = words.split_at(1);
        let origin = header[0];
        self.clear();
        self.load_program(origin, program)?;
        tracing::debug!(
            origin = format_args!("{origin:#06X}"),
            words = program.len(),
            "loaded program"
        );
        Ok(origin)
    }

    /// Reads the object file at `path` and loads it with [`Memory::load_rom_bytes`].
    ///
    /// # Errors
    /// - File could not be read
    /// - all errors of [`Memory::load_rom_bytes`]
    pub fn load_rom_image(&mut self, path: impl AsRef<Path>) -> Result<u16, LoadProgramError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LoadProgramError::ProgramNotReadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.load_rom_bytes(&bytes)
    }
}

use crate::hardware::memory::PROGRAM_SECTION_START;
use std::fmt::{Debug, Formatter};

/// A single 16-bit register value, readable as unsigned bits or as 2's complement number.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct Register(u16);

impl Register {
    #[must_use]
    pub const fn from_binary(value: u16) -> Self {
        Self(value)
    }
    #[must_use]
    pub const fn from_decimal(value: i16) -> Self {
        Self(value.cast_unsigned())
    }
    #[must_use]
    pub const fn as_binary(self) -> u16 {
        self.0
    }
    #[must_use]
    pub const fn as_decimal(self) -> i16 {
        self.0.cast_signed()
    }
}

impl Debug for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06X} ({})", self.0, self.as_decimal())
    }
}

#[must_use]
pub const fn from_binary(value: u16) -> Register {
    Register::from_binary(value)
}
#[must_use]
pub const fn from_decimal(value: i16) -> Register {
    Register::from_decimal(value)
}

/// The register file: `R0`..`R7`, the program counter and the condition register.
#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    general_purpose: [Register; 8],
    pc: Register,
    cond: ConditionFlag,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub const GENERAL_PURPOSE_COUNT: u8 = 8;

    /// Registers after machine reset: PC at the program section start, everything else cleared,
    /// so no condition flag is set until the first register write.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            general_purpose: [Register(0); 8],
            pc: Register(PROGRAM_SECTION_START),
            cond: ConditionFlag::Unset,
        }
    }

    /// # Panics
    /// - `r` is not a general purpose register index (0..=7)
    #[must_use]
    pub fn get(&self, r: u8) -> Register {
        assert!(
            r < Self::GENERAL_PURPOSE_COUNT,
            "Invalid general purpose register get"
        );
        self.general_purpose[usize::from(r)]
    }
    /// # Panics
    /// - `r` is not a general purpose register index (0..=7)
    pub fn set(&mut self, r: u8, value: Register) {
        assert!(
            r < Self::GENERAL_PURPOSE_COUNT,
            "Invalid general purpose register set"
        );
        self.general_purpose[usize::from(r)] = value;
    }
    #[must_use]
    pub const fn pc(&self) -> Register {
        self.pc
    }
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = Register(value);
    }
    pub const fn inc_pc(&mut self) {
        self.pc = Register(self.pc.0.wrapping_add(1));
    }
    #[must_use]
    pub const fn get_conditional_register(&self) -> ConditionFlag {
        self.cond
    }
    /// Sets the condition register from the current value of general purpose register `r`.
    pub fn update_conditional_register(&mut self, r: u8) {
        self.cond = ConditionFlag::from(self.get(r).as_binary());
    }
    /// All 10 registers as raw values: `R0`..`R7`, `PC`, `COND`.
    #[must_use]
    pub fn as_array(&self) -> [u16; 10] {
        let mut res = [0u16; 10];
        for (slot, reg) in res.iter_mut().zip(self.general_purpose) {
            *slot = reg.as_binary();
        }
        res[8] = self.pc.as_binary();
        res[9] = self.cond.bits();
        res
    }
}

impl Debug for Registers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (idx, reg) in self.general_purpose.iter().enumerate() {
            write!(f, "R{idx}: {reg:?}, ")?;
        }
        write!(f, "PC: {:#06X}, COND: {:?}", self.pc.0, self.cond)
    }
}

/// Outcome of the last write to a general purpose register.
///
/// `Unset` only exists between reset and the first flag update, afterwards exactly one of
/// `Pos`, `Zero` and `Neg` is set.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionFlag {
    Unset = 0,
    Pos = 1 << 0, // Positive
    Zero = 1 << 1,
    Neg = 1 << 2, // Negative
}

impl ConditionFlag {
    /// Bit representation as used by the `nzp` bits of `BR`.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

impl From<u16> for ConditionFlag {
    fn from(value: u16) -> Self {
        if value == 0 {
            Self::Zero
        } else if value >> 15 == 1 {
            // leftmost bit is 1 for negative numbers
            Self::Neg
        } else {
            Self::Pos
        }
    }
}

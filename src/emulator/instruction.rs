use crate::numbers;
use std::fmt::{Debug, Formatter};

/// The 16 LC-3 operations, selected by the top 4 bits of an instruction.
#[repr(u8)]
#[derive(enumn::N, displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// BR
    Br = 0b0000,
    /// ADD
    Add = 0b0001,
    /// LD
    Ld = 0b0010,
    /// ST
    St = 0b0011,
    /// JSR
    Jsr = 0b0100,
    /// AND
    And = 0b0101,
    /// LDR
    Ldr = 0b0110,
    /// STR
    Str = 0b0111,
    /// RTI
    Rti = 0b1000,
    /// NOT
    Not = 0b1001,
    /// LDI
    Ldi = 0b1010,
    /// STI
    Sti = 0b1011,
    /// JMP
    Jmp = 0b1100,
    /// RES
    Res = 0b1101,
    /// LEA
    Lea = 0b1110,
    /// TRAP
    Trap = 0b1111,
}

/// Wrapper for LC-3 u16 instruction.
/// format is: `OOOO_DDD_P_PPPP_PPPP`
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Instruction(u16);

impl Instruction {
    /// Gives the value of only the specified bit range.
    ///
    /// # Parameters
    /// - `from`: starting index
    /// - `to`: end index (inclusive), mut be greater or equal to `from`
    ///
    /// # Panics
    /// - asserts that to is greater or equal from and both are valid indexes
    #[must_use]
    pub fn get_bit_range(self, from: u8, to: u8) -> u16 {
        debug_assert!(
            to >= from,
            "wrong direction of from: {from:?} and to: {to:?}"
        );
        debug_assert!(
            (0..u16::BITS).contains(&u32::from(to)),
            "index: {to:?} to u16 is greater than maximum value {:?}",
            u16::BITS - 1
        );
        let width = u32::from(to - from) + 1;
        (self.0 >> from) & (u16::MAX >> (u16::BITS - width))
    }
    /// Gives a bit range of at most 8 bits as u8. See [`Instruction::get_bit_range()`]
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "range is at most 8 bits")]
    pub fn get_bit_range_u8(self, from: u8, to: u8) -> u8 {
        debug_assert!(to - from < 8, "bit range too wide for u8");
        self.get_bit_range(from, to) as u8
    }
    #[must_use]
    pub fn get_bit(self, index: u8) -> bool {
        self.get_bit_range(index, index) & 1 != 0
    }
    #[must_use]
    pub fn op_code(self) -> u8 {
        self.get_bit_range_u8(12, 15)
    }
    /// The operation selected by the op code, every 4-bit value maps to one.
    #[must_use]
    pub fn operation(self) -> Operation {
        Operation::n(self.op_code())
            .unwrap_or_else(|| unreachable!("all 16 op codes are mapped"))
    }
    /// Destination register, or source register for the store operations.
    #[must_use]
    pub fn dr_number(self) -> u8 {
        self.get_bit_range_u8(9, 11)
    }
    /// First source register, also `BaseR`.
    #[must_use]
    pub fn sr1_number(self) -> u8 {
        self.get_bit_range_u8(6, 8)
    }
    #[must_use]
    pub fn sr2_number(self) -> u8 {
        self.get_bit_range_u8(0, 2)
    }
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self.get_bit(5)
    }
    /// Sign extended `imm5`.
    #[must_use]
    pub fn get_immediate(self) -> u16 {
        numbers::sign_extend(self.get_bit_range(0, 4), 5)
    }
    /// Sign extended offset of the lowest `len` bits, to be added with 16-bit wraparound.
    #[must_use]
    pub fn offset(self, len: u8) -> u16 {
        numbers::sign_extend(self.get_bit_range(0, len - 1), len)
    }
    /// `nzp` condition bits of `BR`.
    #[must_use]
    pub fn condition_bits(self) -> u16 {
        self.get_bit_range(9, 11)
    }
    #[must_use]
    pub fn trap_vector(self) -> u8 {
        self.get_bit_range_u8(0, 7)
    }
}

impl Debug for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:#06X} (Op: {}, DR: {:03b}, PC_Off: {:09b})",
            self.0,
            self.operation(),
            self.dr_number(),
            self.get_bit_range(0, 8)
        )
    }
}

impl From<u16> for Instruction {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

#[expect(clippy::unusual_byte_groupings)]
#[cfg(test)]
mod tests {
    use super::*;
    use googletest::prelude::*;

    #[gtest]
    pub fn test_instr_get_bit_range_valid() {
        let sut = Instruction::from(0b1010_101_001010101);
        expect_that!(sut.op_code(), eq(0b1010));
        expect_that!(sut.operation(), eq(Operation::Ldi));
        expect_that!(sut.dr_number(), eq(0b101));
        expect_that!(sut.offset(9), eq(0b0_0101_0101));

        // Add: DR: 3, SR1: 2, Immediate: false, SR2: 1
        let sut = Instruction::from(0b0001_011_010_0_00_001);
        expect_that!(sut.operation(), eq(Operation::Add));
        expect_that!(sut.dr_number(), eq(3));
        expect_that!(sut.sr1_number(), eq(2));
        expect_that!(sut.sr2_number(), eq(1));
        expect_that!(sut.is_immediate(), eq(false));

        // Add: DR: 7, SR1: 0, Immediate: true, imm5: 14
        let sut = Instruction::from(0b0001_111_000_1_01110);
        expect_that!(sut.dr_number(), eq(7));
        expect_that!(sut.sr1_number(), eq(0));
        expect_that!(sut.is_immediate(), eq(true));
        expect_that!(sut.get_immediate(), eq(14));

        // Add: imm5: -2
        let sut = Instruction::from(0b0001_111_000_1_11110);
        expect_that!(sut.get_immediate(), eq(0xFFFE));
    }
    #[gtest]
    pub fn test_instr_full_width_range() {
        let sut = Instruction::from(0xF025);
        expect_that!(sut.get_bit_range(0, 15), eq(0xF025));
        expect_that!(sut.operation(), eq(Operation::Trap));
        expect_that!(sut.trap_vector(), eq(0x25));
    }
    #[gtest]
    pub fn test_every_op_code_is_mapped() {
        for op_code in 0u16..16 {
            let sut = Instruction::from(op_code << 12);
            expect_that!(sut.operation() as u16, eq(op_code));
        }
    }
    #[gtest]
    pub fn test_instr_debug() {
        let sut = Instruction::from(0b1110_011_0_0101_0101);
        expect_that!(
            format!("{sut:?}"),
            eq("0xE655 (Op: LEA, DR: 011, PC_Off: 001010101)")
        );
    }
    #[gtest]
    #[should_panic(expected = "wrong direction of from: 2 and to: 1")]
    pub fn test_instr_get_bit_range_wrong_order() {
        let sut = Instruction::from(0b1010_101_101010101);
        let _ = sut.get_bit_range(2, 1);
    }
    #[gtest]
    #[should_panic(expected = "index: 16 to u16 is greater than maximum value 15")]
    pub fn test_instr_get_bit_range_index_too_large() {
        let sut = Instruction::from(0b1010_101_101010101);
        let _ = sut.get_bit_range(2, 16);
    }
}

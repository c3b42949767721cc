use crate::constants;
use crate::Word;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt;

// Instruction layout
//
//          +------+---------+-------+-------+---------------+
//          |31  30|29     24|23   16|15    8|7             0|
//          +------+---------+-------+-------+---------------+
// common   |  eu  | subtype |  dst  |  op2  | op1 / imm8    |
// imm16    |  eu  | subtype |  dst  |      imm16            |
//          +------+---------+-------+-------+---------------+
//
// `op1` holds a register id or an 8-bit unsigned immediate depending on the
// subtype; branches reinterpret it as a signed displacement in instruction
// units. LDI and LDP pack a 16-bit immediate into the op2/op1 fields.

/// Execution unit tag, encoded in the top two bits of every word.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum ExecUnit {
    IU = 0,
    LSU = 1,
    BRU = 2,
    FPU = 3,
}

/// Integer unit subtypes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum IUSubtype {
    //  Mnemonic   | Effect
    //-------------+---------------------------------------------
    // Special sources
    TID = 0x00,    // dst = thread index within the warp
    WID = 0x01,    // dst = warp id (always 0, single warp model)
    BID = 0x02,    // dst = thread block id
    TBID = 0x03,   // dst = tb_id * warp_width + thread index
    DPA = 0x04,    // dst = data parameter address
    //-------------+---------------------------------------------
    // Register-register ALU
    ADD = 0x05,    // dst = op2 + op1
    SUB = 0x06,    // dst = op2 - op1
    AND = 0x07,    // dst = op2 & op1
    OR = 0x08,     // dst = op2 | op1
    XOR = 0x09,    // dst = op2 ^ op1
    SHL = 0x0A,    // dst = op2 << (op1 & 31)
    SHR = 0x0B,    // dst = op2 >> (op1 & 31), arithmetic
    MUL = 0x0C,    // dst = op2 * op1
    //-------------+---------------------------------------------
    // Immediate forms (op1 is an 8-bit unsigned immediate)
    LDI = 0x0D,    // dst = zero-extended 16-bit immediate
    ADDI = 0x0E,
    SUBI = 0x0F,
    ANDI = 0x10,
    ORI = 0x11,
    XORI = 0x12,
    SHLI = 0x13,
    SHRI = 0x14,
    MULI = 0x15,
    //-------------+---------------------------------------------
    // Comparisons and late additions
    CMPLT = 0x16,  // dst = (op2 < op1) ? 1 : 0, signed
    CMPLTI = 0x17,
    CMPNE = 0x18,  // dst = (op2 != op1) ? 1 : 0
    CMPNEI = 0x19,
    MAX = 0x1A,    // dst = max(op2, op1), signed
    MAXI = 0x1B,
    DIV = 0x1C,    // dst = op2 / op1, signed; x / 0 = 0
    DIVI = 0x1D,
}

/// Load/store unit subtypes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum LSUSubtype {
    LB = 0x00,  // dst = zero-extended byte at regs[op2]
    LH = 0x01,  // dst = zero-extended half at regs[op2]
    LW = 0x02,  // dst = word at regs[op2]
    SB = 0x03,  // byte at regs[dst] = regs[op1]; regs[dst] = 0
    SH = 0x04,  // half at regs[dst] = regs[op1]; regs[dst] = 0
    SW = 0x05,  // word at regs[dst] = regs[op1]; regs[dst] = 0
    LDP = 0x06, // dst = word at dp_addr + imm16 * 4
}

/// Branch unit subtypes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum BRUSubtype {
    BRNZ = 0x00, // pc += (sext8(op1) + 1) * 4 if regs[op2] != 0
    BRZ = 0x01,  // pc += (sext8(op1) + 1) * 4 if regs[op2] == 0
    SYNC = 0x02, // warp-wide barrier over the thread block
    STOP = 0x3F, // thread is done; pc stays put
}

/// Floating point unit subtypes. Sources are reinterpreted as IEEE-754
/// binary32 bit patterns; unary operations carry their source in both
/// operand fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum FPUSubtype {
    FADD = 0x00,
    FSUB = 0x01,
    FMUL = 0x02,
    FMAX = 0x03,
    FEXP2 = 0x04,  // dst = 2^op1
    FLOG2 = 0x05,  // dst = log2(op1)
    FRECIP = 0x06, // dst = 1 / op1
    FCMPLT = 0x07, // dst = (op2 < op1) ? 1 : 0, integer result
    ITOF = 0x08,   // dst = float(op1 as int32)
    FTOI = 0x09,   // dst = int32(op1), rounding toward zero
}

#[inline]
fn enum_to_u32<T: ToPrimitive>(val: T) -> u32 {
    ToPrimitive::to_u32(&val).unwrap()
}

macro_rules! impl_enum_display {
    ($e:ty) => {
        impl fmt::Display for $e {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_enum_display!(ExecUnit);
impl_enum_display!(IUSubtype);
impl_enum_display!(LSUSubtype);
impl_enum_display!(BRUSubtype);
impl_enum_display!(FPUSubtype);

/// The raw field projection of an instruction word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InstructionParts {
    pub eu: ExecUnit,
    pub subtype: u8,
    pub dst: u8,
    pub op2: u8,
    pub op1: u8,
}

impl InstructionParts {
    /// The 16-bit immediate formed by the op2/op1 fields (LDI, LDP).
    #[inline]
    pub fn imm16(&self) -> u16 {
        (u16::from(self.op2) << 8) | u16::from(self.op1)
    }

    pub fn encode(&self) -> Word {
        make_instruction(self.eu, u32::from(self.subtype), self.dst, self.op2, self.op1)
    }
}

/// Splits a word into its fields. The two eu bits always name a valid unit;
/// whether the subtype is defined for that unit is decided by the consumer.
pub fn decode_parts(word: Word) -> InstructionParts {
    let eu = ExecUnit::from_u32((word & constants::EU_MASK) >> constants::EU_OFFSET).unwrap();
    InstructionParts {
        eu,
        subtype: ((word & constants::SUBTYPE_MASK) >> constants::SUBTYPE_OFFSET) as u8,
        dst: ((word & constants::DST_MASK) >> constants::DST_OFFSET) as u8,
        op2: ((word & constants::OP2_MASK) >> constants::OP2_OFFSET) as u8,
        op1: ((word & constants::OP1_MASK) >> constants::OP1_OFFSET) as u8,
    }
}

#[inline]
pub fn make_instruction(eu: ExecUnit, subtype: u32, dst: u8, op2: u8, op1: u8) -> Word {
    ((enum_to_u32(eu) << constants::EU_OFFSET) & constants::EU_MASK)
        | ((subtype << constants::SUBTYPE_OFFSET) & constants::SUBTYPE_MASK)
        | ((u32::from(dst) << constants::DST_OFFSET) & constants::DST_MASK)
        | ((u32::from(op2) << constants::OP2_OFFSET) & constants::OP2_MASK)
        | ((u32::from(op1) << constants::OP1_OFFSET) & constants::OP1_MASK)
}

#[inline]
pub fn make_imm16_instruction(eu: ExecUnit, subtype: u32, dst: u8, imm: u16) -> Word {
    ((enum_to_u32(eu) << constants::EU_OFFSET) & constants::EU_MASK)
        | ((subtype << constants::SUBTYPE_OFFSET) & constants::SUBTYPE_MASK)
        | ((u32::from(dst) << constants::DST_OFFSET) & constants::DST_MASK)
        | ((u32::from(imm) << constants::IMM16_OFFSET) & constants::IMM16_MASK)
}

#[inline]
pub fn make_iu_instruction(subtype: IUSubtype, dst: u8, op2: u8, op1: u8) -> Word {
    make_instruction(ExecUnit::IU, enum_to_u32(subtype), dst, op2, op1)
}

#[inline]
pub fn make_lsu_instruction(subtype: LSUSubtype, dst: u8, op2: u8, op1: u8) -> Word {
    make_instruction(ExecUnit::LSU, enum_to_u32(subtype), dst, op2, op1)
}

#[inline]
pub fn make_bru_instruction(subtype: BRUSubtype, dst: u8, op2: u8, op1: u8) -> Word {
    make_instruction(ExecUnit::BRU, enum_to_u32(subtype), dst, op2, op1)
}

#[inline]
pub fn make_fpu_instruction(subtype: FPUSubtype, dst: u8, op2: u8, op1: u8) -> Word {
    make_instruction(ExecUnit::FPU, enum_to_u32(subtype), dst, op2, op1)
}

/// `mov.ri` form: load a zero-extended 16-bit immediate.
#[inline]
pub fn make_ldi(dst: u8, imm: u16) -> Word {
    make_imm16_instruction(ExecUnit::IU, enum_to_u32(IUSubtype::LDI), dst, imm)
}

/// `ldparam` form: load the `index`-th kernel parameter word.
#[inline]
pub fn make_ldparam(dst: u8, index: u16) -> Word {
    make_imm16_instruction(ExecUnit::LSU, enum_to_u32(LSUSubtype::LDP), dst, index)
}

/// Sign extension of the 8-bit branch displacement field.
#[inline]
pub fn sext8(value: u8) -> i32 {
    i32::from(value as i8)
}

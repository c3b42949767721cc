use super::*;
use crate::instructions::{Modifier, Operand};
use bgpu::IUSubtype;

pub struct IntegerUnit;

impl ExecutionUnit for IntegerUnit {
    fn name(&self) -> &'static str {
        "IU"
    }

    fn tag(&self) -> ExecUnit {
        ExecUnit::IU
    }

    fn instructions(&self) -> &'static [InstructionDef] {
        &TABLE
    }
}

macro_rules! alu_encoder {
    ($fn_name:ident, $rr:ident, $ri:ident) => {
        fn $fn_name(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
            let dst = encode_dst(inst, 0);
            let src1 = encode_reg(inst, 1, 1);
            if inst.is_rr() {
                Ok(dst | src1 | encode_reg(inst, 2, 0) | encode_subtype(IUSubtype::$rr))
            } else {
                Ok(dst | src1 | encode_imm8(inst, 2)? | encode_subtype(IUSubtype::$ri))
            }
        }
    };
}

alu_encoder!(encode_add, ADD, ADDI);
alu_encoder!(encode_sub, SUB, SUBI);
alu_encoder!(encode_and, AND, ANDI);
alu_encoder!(encode_or, OR, ORI);
alu_encoder!(encode_xor, XOR, XORI);
alu_encoder!(encode_shl, SHL, SHLI);
alu_encoder!(encode_shr, SHR, SHRI);
alu_encoder!(encode_mul, MUL, MULI);
alu_encoder!(encode_cmplt, CMPLT, CMPLTI);
alu_encoder!(encode_cmpne, CMPNE, CMPNEI);
alu_encoder!(encode_max, MAX, MAXI);
alu_encoder!(encode_div, DIV, DIVI);

/// A `mov` that survives expansion is the register-immediate form with a
/// 16-bit value: it encodes as a single LDI.
fn encode_mov(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    if !inst.is_ri() {
        return Err(new_parser_error(
            inst.span.clone(),
            "register-register mov has no direct encoding".to_owned(),
        ));
    }
    Ok(encode_dst(inst, 0) | encode_imm16(inst, 1)? | encode_subtype(IUSubtype::LDI))
}

/// `special rd, %name` reads a per-thread or per-block scalar.
fn encode_special(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    let subtype = match inst.operands[1] {
        Operand::Special("l") => IUSubtype::TID,
        Operand::Special("g") => IUSubtype::BID,
        Operand::Special("param") => IUSubtype::DPA,
        ref op => {
            return Err(new_parser_error(
                inst.span.clone(),
                format!("unknown special source: {}", op),
            ));
        }
    };
    Ok(encode_dst(inst, 0) | encode_subtype(subtype))
}

/// Rewrites `mov` into encodable shapes:
///
/// - register-register becomes `add.ri dst, src, 0`;
/// - a float immediate is reinterpreted as its int32 bit pattern;
/// - an immediate that fits 16 unsigned bits stays a single instruction;
/// - anything wider becomes a five-instruction sequence building the
///   constant out of 8-bit lanes.
fn expand_mov<'i>(inst: &ParsedInstruction<'i>) -> Result<Vec<ParsedInstruction<'i>>> {
    if inst.is_rr() {
        return Ok(vec![ParsedInstruction {
            mnemonic: "add",
            modifiers: vec![Modifier::new("ri"), Modifier::new("int32")],
            operands: vec![inst.operands[0], inst.operands[1], Operand::IntImmediate(0)],
            span: inst.span.clone(),
            label: inst.label,
        }]);
    }

    let dtype = match inst.operands[1] {
        // reinterpret the bit pattern, the register ends up type-agnostic
        Operand::FloatImmediate(_) => Modifier::new("int32"),
        _ => *inst.data_type().ok_or_else(|| {
            new_parser_error(inst.span.clone(), "mov needs a data type modifier".to_owned())
        })?,
    };

    let value = match inst.operands[1] {
        Operand::FloatImmediate(f) => f.to_bits(),
        Operand::IntImmediate(v) => {
            if v < i64::from(i32::min_value()) || v > i64::from(u32::max_value()) {
                return Err(new_parser_error(
                    inst.span.clone(),
                    format!("mov immediate {} does not fit in 32 bits", v),
                ));
            }
            v as u32
        }
        _ => unreachable!(),
    };

    let dst = inst.operands[0];
    let mods = || vec![Modifier::new("ri"), dtype];

    if value <= 0xFFFF {
        return Ok(vec![ParsedInstruction {
            mnemonic: "mov",
            modifiers: mods(),
            operands: vec![dst, Operand::IntImmediate(i64::from(value))],
            span: inst.span.clone(),
            label: inst.label,
        }]);
    }

    let step = |mnemonic, operands| ParsedInstruction {
        mnemonic,
        modifiers: mods(),
        operands,
        span: inst.span.clone(),
        label: None,
    };

    let mut sequence = vec![ParsedInstruction {
        label: inst.label,
        ..step(
            "mov",
            vec![dst, Operand::IntImmediate(i64::from(value >> 16))],
        )
    }];
    sequence.push(step("shl", vec![dst, dst, Operand::IntImmediate(8)]));
    sequence.push(step(
        "or",
        vec![dst, dst, Operand::IntImmediate(i64::from((value >> 8) & 0xFF))],
    ));
    sequence.push(step("shl", vec![dst, dst, Operand::IntImmediate(8)]));
    sequence.push(step(
        "or",
        vec![dst, dst, Operand::IntImmediate(i64::from(value & 0xFF))],
    ));
    Ok(sequence)
}

const MOV_SRC: &[OperandKind] = &[
    OperandKind::Register,
    OperandKind::IntImmediate,
    OperandKind::FloatImmediate,
];

macro_rules! alu_def {
    ($mnemonic:expr, $encode:ident) => {
        InstructionDef {
            mnemonic: $mnemonic,
            modifier_groups: &[RR_OR_RI, INT_TYPE],
            operands: &[REG, REG, REG_OR_IMM],
            encode: $encode,
            expand: None,
        }
    };
}

static TABLE: [InstructionDef; 14] = [
    InstructionDef {
        mnemonic: "mov",
        modifier_groups: &[RR_OR_RI, DATA_TYPE],
        operands: &[REG, MOV_SRC],
        encode: encode_mov,
        expand: Some(expand_mov),
    },
    alu_def!("add", encode_add),
    alu_def!("sub", encode_sub),
    alu_def!("and", encode_and),
    alu_def!("or", encode_or),
    alu_def!("xor", encode_xor),
    alu_def!("shl", encode_shl),
    alu_def!("shr", encode_shr),
    alu_def!("mul", encode_mul),
    alu_def!("cmplt", encode_cmplt),
    alu_def!("cmpne", encode_cmpne),
    alu_def!("max", encode_max),
    alu_def!("div", encode_div),
    InstructionDef {
        mnemonic: "special",
        modifier_groups: &[],
        operands: &[REG, SPECIAL],
        encode: encode_special,
        expand: None,
    },
];

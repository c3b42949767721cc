mod bru;
mod fpu;
mod iu;
mod lsu;

pub use self::bru::BranchUnit;
pub use self::fpu::FloatUnit;
pub use self::iu::IntegerUnit;
pub use self::lsu::LoadStoreUnit;

use crate::instructions::{ModifierKind, Operand, OperandKind, ParsedInstruction};
use crate::{new_parser_error, Result};
use bgpu::constants::{DST_OFFSET, EU_OFFSET, SUBTYPE_OFFSET};
use bgpu::ExecUnit;
use log::debug;
use num_traits::ToPrimitive;
use std::collections::HashMap;

/// Link-phase inputs an encoder may need: the resolved label addresses and
/// the address (in instruction units) of the instruction being encoded.
pub struct LinkContext<'a> {
    pub labels: &'a HashMap<&'a str, u32>,
    pub addr: u32,
}

pub type EncodeFn = for<'i, 'a> fn(&ParsedInstruction<'i>, &LinkContext<'a>) -> Result<u32>;
pub type ExpandFn = for<'i> fn(&ParsedInstruction<'i>) -> Result<Vec<ParsedInstruction<'i>>>;

/// One valid shape of one mnemonic: the modifiers and operands it accepts,
/// how it encodes, and optionally how it expands into simpler
/// instructions.
pub struct InstructionDef {
    pub mnemonic: &'static str,
    /// Modifier groups; a matching instruction carries exactly one
    /// modifier out of each group. Modifiers outside every group are
    /// ignored here (branches smuggle their target label this way).
    pub modifier_groups: &'static [&'static [ModifierKind]],
    /// Accepted operand kinds, position by position.
    pub operands: &'static [&'static [OperandKind]],
    pub encode: EncodeFn,
    pub expand: Option<ExpandFn>,
}

impl InstructionDef {
    pub fn matches(&self, inst: &ParsedInstruction) -> bool {
        if inst.mnemonic != self.mnemonic {
            return false;
        }
        for group in self.modifier_groups {
            let found = inst
                .modifiers
                .iter()
                .filter(|m| group.contains(&m.kind))
                .count();
            if found != 1 {
                return false;
            }
        }
        if inst.operands.len() != self.operands.len() {
            return false;
        }
        inst.operands
            .iter()
            .zip(self.operands.iter())
            .all(|(op, kinds)| kinds.contains(&op.kind()))
    }
}

/// One execution unit of the device, owning the descriptors of every
/// instruction it encodes.
pub trait ExecutionUnit: Sync {
    fn name(&self) -> &'static str;
    fn tag(&self) -> ExecUnit;
    fn instructions(&self) -> &'static [InstructionDef];
}

static UNITS: [&dyn ExecutionUnit; 4] = [&IntegerUnit, &LoadStoreUnit, &BranchUnit, &FloatUnit];

/// Finds the first descriptor, in unit order, whose mnemonic and shape
/// accept the instruction.
fn find_def<'i>(
    inst: &ParsedInstruction<'i>,
) -> Result<(&'static dyn ExecutionUnit, &'static InstructionDef)> {
    let mut name_seen = false;
    for unit in UNITS.iter() {
        for def in unit.instructions() {
            if def.mnemonic == inst.mnemonic {
                name_seen = true;
                if def.matches(inst) {
                    return Ok((*unit, def));
                }
            }
        }
    }

    let message = if name_seen {
        format!(
            "no form of `{}` accepts these modifiers and operands",
            inst.mnemonic
        )
    } else {
        format!("unknown instruction: {}", inst.mnemonic)
    };
    Err(new_parser_error(inst.span.clone(), message))
}

/// Expansion pass: pseudo-instructions are replaced by their encodable
/// sequences. Replacements are final and are not expanded again.
pub fn expand_program<'i>(
    parsed: Vec<ParsedInstruction<'i>>,
) -> Result<Vec<ParsedInstruction<'i>>> {
    let mut expanded = Vec::with_capacity(parsed.len());
    for inst in &parsed {
        let (_, def) = find_def(inst)?;
        match def.expand {
            Some(expand) => {
                let replacement = expand(inst)?;
                debug!("expanded `{}` into {} instructions", inst, replacement.len());
                expanded.extend(replacement);
            }
            None => expanded.push(inst.clone()),
        }
    }
    Ok(expanded)
}

/// Encodes one placed instruction, or-ing the owning unit's tag into the
/// top bits.
pub fn encode_instruction<'i>(
    inst: &ParsedInstruction<'i>,
    labels: &HashMap<&str, u32>,
    addr: u32,
) -> Result<u32> {
    let (unit, def) = find_def(inst)?;
    let ctx = LinkContext { labels, addr };
    let low = (def.encode)(inst, &ctx)?;
    Ok(((unit.tag() as u32) << EU_OFFSET) | low)
}

// Operand field encoders shared by the unit tables. Register operands have
// been shape-checked by the match, immediates still need range checks.

fn encode_subtype<T: ToPrimitive>(subtype: T) -> u32 {
    (subtype.to_u32().unwrap() & 0x3F) << SUBTYPE_OFFSET
}

fn encode_dst(inst: &ParsedInstruction, index: usize) -> u32 {
    u32::from(inst.reg(index)) << DST_OFFSET
}

/// Encodes a register operand into field position 1 (op2) or 0 (op1).
fn encode_reg(inst: &ParsedInstruction, index: usize, position: u32) -> u32 {
    u32::from(inst.reg(index)) << (position * 8)
}

fn int_immediate(inst: &ParsedInstruction, index: usize) -> Result<i64> {
    match inst.operands[index] {
        Operand::IntImmediate(value) => Ok(value),
        ref op => Err(new_parser_error(
            inst.span.clone(),
            format!("operand {} must be an integer immediate, got {}", index, op),
        )),
    }
}

fn encode_imm16(inst: &ParsedInstruction, index: usize) -> Result<u32> {
    let value = int_immediate(inst, index)?;
    if value < 0 || value > 0xFFFF {
        return Err(new_parser_error(
            inst.span.clone(),
            format!("immediate {} does not fit in 16 unsigned bits", value),
        ));
    }
    Ok(value as u32)
}

fn encode_imm8(inst: &ParsedInstruction, index: usize) -> Result<u32> {
    let value = int_immediate(inst, index)?;
    if value < 0 || value > 0xFF {
        return Err(new_parser_error(
            inst.span.clone(),
            format!("immediate {} does not fit in 8 unsigned bits", value),
        ));
    }
    Ok(value as u32)
}

// Operand patterns shared by the unit tables.

const REG: &[OperandKind] = &[OperandKind::Register];
const REG_OR_IMM: &[OperandKind] = &[OperandKind::Register, OperandKind::IntImmediate];
const INT_IMM: &[OperandKind] = &[OperandKind::IntImmediate];
const SPECIAL: &[OperandKind] = &[OperandKind::Special];

// Modifier groups shared by the unit tables.

const RR_OR_RI: &[ModifierKind] = &[ModifierKind::RegReg, ModifierKind::RegImm];
const RR: &[ModifierKind] = &[ModifierKind::RegReg];
const INT_TYPE: &[ModifierKind] = &[ModifierKind::IntType];
const FLOAT_TYPE: &[ModifierKind] = &[ModifierKind::FloatType];
const DATA_TYPE: &[ModifierKind] = &[ModifierKind::IntType, ModifierKind::FloatType];
const MEMORY: &[ModifierKind] = &[ModifierKind::MemoryType];
const CONDITION: &[ModifierKind] = &[ModifierKind::Condition];
const TARGET: &[ModifierKind] = &[ModifierKind::Label];
const SYNC_DOMAIN: &[ModifierKind] = &[ModifierKind::SyncDomain];

use super::*;
use bgpu::BRUSubtype;

pub struct BranchUnit;

impl ExecutionUnit for BranchUnit {
    fn name(&self) -> &'static str {
        "BRU"
    }

    fn tag(&self) -> ExecUnit {
        ExecUnit::BRU
    }

    fn instructions(&self) -> &'static [InstructionDef] {
        &TABLE
    }
}

fn encode_stop(_inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    Ok(encode_subtype(BRUSubtype::STOP))
}

fn encode_sync(_inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    Ok(encode_subtype(BRUSubtype::SYNC))
}

/// `br.<cond>.<target> rGuard`: the displacement is relative to the next
/// instruction and must fit the signed 8-bit op1 field.
fn encode_br(inst: &ParsedInstruction, ctx: &LinkContext) -> Result<u32> {
    let target = inst.find_modifiers(ModifierKind::Label)[0].text;
    let subtype = match inst.find_modifiers(ModifierKind::Condition)[0].text {
        "nz" => BRUSubtype::BRNZ,
        _ => BRUSubtype::BRZ,
    };

    let dest = *ctx.labels.get(target).ok_or_else(|| {
        new_parser_error(inst.span.clone(), format!("unresolved label: {}", target))
    })?;
    let offset = i64::from(dest) - (i64::from(ctx.addr) + 1);
    if offset < i64::from(i8::min_value()) || offset > i64::from(i8::max_value()) {
        return Err(new_parser_error(
            inst.span.clone(),
            format!("branch to `{}` is {} instructions away, out of range", target, offset),
        ));
    }

    Ok(encode_subtype(subtype) | encode_reg(inst, 0, 1) | u32::from(offset as i8 as u8))
}

static TABLE: [InstructionDef; 3] = [
    InstructionDef {
        mnemonic: "stop",
        modifier_groups: &[],
        operands: &[],
        encode: encode_stop,
        expand: None,
    },
    InstructionDef {
        mnemonic: "sync",
        modifier_groups: &[SYNC_DOMAIN],
        operands: &[],
        encode: encode_sync,
        expand: None,
    },
    InstructionDef {
        mnemonic: "br",
        modifier_groups: &[CONDITION, TARGET],
        operands: &[REG],
        encode: encode_br,
        expand: None,
    },
];

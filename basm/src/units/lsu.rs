use super::*;
use bgpu::LSUSubtype;

pub struct LoadStoreUnit;

impl ExecutionUnit for LoadStoreUnit {
    fn name(&self) -> &'static str {
        "LSU"
    }

    fn tag(&self) -> ExecUnit {
        ExecUnit::LSU
    }

    fn instructions(&self) -> &'static [InstructionDef] {
        &TABLE
    }
}

/// Width routing shared by loads and stores; `float32` data moves through
/// the word form.
fn access_width(inst: &ParsedInstruction) -> Result<u32> {
    inst.data_type()
        .and_then(|m| m.data_width())
        .ok_or_else(|| {
            new_parser_error(
                inst.span.clone(),
                "memory access needs a sized data type modifier".to_owned(),
            )
        })
}

fn encode_ld(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    let subtype = match access_width(inst)? {
        1 => LSUSubtype::LB,
        2 => LSUSubtype::LH,
        _ => LSUSubtype::LW,
    };
    // the address register is mirrored into both source fields
    let addr = encode_reg(inst, 1, 1) | encode_reg(inst, 1, 0);
    Ok(encode_dst(inst, 0) | addr | encode_subtype(subtype))
}

/// Stores put the address register in the dst field (which the hardware
/// clears) and the value register in op1.
fn encode_st(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    let subtype = match access_width(inst)? {
        1 => LSUSubtype::SB,
        2 => LSUSubtype::SH,
        _ => LSUSubtype::SW,
    };
    let addr = encode_dst(inst, 0) | encode_reg(inst, 0, 1);
    Ok(addr | encode_reg(inst, 1, 0) | encode_subtype(subtype))
}

fn encode_ldparam(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
    Ok(encode_dst(inst, 0) | encode_imm16(inst, 1)? | encode_subtype(LSUSubtype::LDP))
}

static TABLE: [InstructionDef; 3] = [
    // a data-type modifier on ldparam is accepted and ignored
    InstructionDef {
        mnemonic: "ldparam",
        modifier_groups: &[],
        operands: &[REG, INT_IMM],
        encode: encode_ldparam,
        expand: None,
    },
    InstructionDef {
        mnemonic: "ld",
        modifier_groups: &[DATA_TYPE, MEMORY],
        operands: &[REG, REG],
        encode: encode_ld,
        expand: None,
    },
    InstructionDef {
        mnemonic: "st",
        modifier_groups: &[DATA_TYPE, MEMORY],
        operands: &[REG, REG],
        encode: encode_st,
        expand: None,
    },
];

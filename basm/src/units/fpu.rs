use super::*;
use bgpu::FPUSubtype;

pub struct FloatUnit;

impl ExecutionUnit for FloatUnit {
    fn name(&self) -> &'static str {
        "FPU"
    }

    fn tag(&self) -> ExecUnit {
        ExecUnit::FPU
    }

    fn instructions(&self) -> &'static [InstructionDef] {
        &TABLE
    }
}

macro_rules! binary_encoder {
    ($fn_name:ident, $subtype:ident) => {
        fn $fn_name(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
            Ok(encode_dst(inst, 0)
                | encode_reg(inst, 1, 1)
                | encode_reg(inst, 2, 0)
                | encode_subtype(FPUSubtype::$subtype))
        }
    };
}

// unary operations mirror their source into both fields for decoder
// symmetry
macro_rules! unary_encoder {
    ($fn_name:ident, $subtype:ident) => {
        fn $fn_name(inst: &ParsedInstruction, _ctx: &LinkContext) -> Result<u32> {
            Ok(encode_dst(inst, 0)
                | encode_reg(inst, 1, 1)
                | encode_reg(inst, 1, 0)
                | encode_subtype(FPUSubtype::$subtype))
        }
    };
}

binary_encoder!(encode_fadd, FADD);
binary_encoder!(encode_fsub, FSUB);
binary_encoder!(encode_fmul, FMUL);
binary_encoder!(encode_fmax, FMAX);
binary_encoder!(encode_fcmplt, FCMPLT);
unary_encoder!(encode_fexp2, FEXP2);
unary_encoder!(encode_flog2, FLOG2);
unary_encoder!(encode_frecip, FRECIP);
unary_encoder!(encode_itof, ITOF);
unary_encoder!(encode_ftoi, FTOI);

macro_rules! binary_def {
    ($mnemonic:expr, $encode:ident) => {
        InstructionDef {
            mnemonic: $mnemonic,
            modifier_groups: &[RR, FLOAT_TYPE],
            operands: &[REG, REG, REG],
            encode: $encode,
            expand: None,
        }
    };
}

macro_rules! unary_def {
    ($mnemonic:expr, $encode:ident) => {
        InstructionDef {
            mnemonic: $mnemonic,
            modifier_groups: &[RR, FLOAT_TYPE],
            operands: &[REG, REG],
            encode: $encode,
            expand: None,
        }
    };
}

static TABLE: [InstructionDef; 10] = [
    binary_def!("add", encode_fadd),
    binary_def!("sub", encode_fsub),
    binary_def!("mul", encode_fmul),
    binary_def!("max", encode_fmax),
    binary_def!("cmplt", encode_fcmplt),
    unary_def!("exp2", encode_fexp2),
    unary_def!("log2", encode_flog2),
    unary_def!("recip", encode_frecip),
    unary_def!("itof", encode_itof),
    unary_def!("ftoi", encode_ftoi),
];

use pest::Span;
use std::fmt;

/// What a modifier token means. Any token that is not one of the fixed
/// spellings is a label reference, which only branches make use of.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModifierKind {
    /// Integer data type: `int32`, `uint32`, `int16`, `uint16`, `int8`,
    /// `uint8`, `long`.
    IntType,
    /// Float data type: `float32`.
    FloatType,
    /// `bool`.
    BoolType,
    /// `rr`: both sources are registers.
    RegReg,
    /// `ri`: the last source is an immediate.
    RegImm,
    /// Address space: `global` or `param`.
    MemoryType,
    /// Branch condition: `ez` or `nz`.
    Condition,
    /// `threads`.
    SyncDomain,
    /// Anything else: a branch target name.
    Label,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Modifier<'i> {
    pub text: &'i str,
    pub kind: ModifierKind,
}

impl<'i> Modifier<'i> {
    pub fn new(text: &'i str) -> Modifier<'i> {
        let kind = match text {
            "int32" | "uint32" | "int16" | "uint16" | "int8" | "uint8" | "long" => {
                ModifierKind::IntType
            }
            "float32" => ModifierKind::FloatType,
            "bool" => ModifierKind::BoolType,
            "rr" => ModifierKind::RegReg,
            "ri" => ModifierKind::RegImm,
            "global" | "param" => ModifierKind::MemoryType,
            "ez" | "nz" => ModifierKind::Condition,
            "threads" => ModifierKind::SyncDomain,
            _ => ModifierKind::Label,
        };
        Modifier { text, kind }
    }

    /// Access width in bytes of a data-type modifier.
    pub fn data_width(&self) -> Option<u32> {
        match self.text {
            "int32" | "uint32" | "long" | "float32" => Some(4),
            "int16" | "uint16" => Some(2),
            "int8" | "uint8" => Some(1),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    Register,
    IntImmediate,
    FloatImmediate,
    Special,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Operand<'i> {
    /// `rN`.
    Register(u8),
    /// Decimal integer, optionally negative or `U`-suffixed.
    IntImmediate(i64),
    /// `1.5` or `0fXXXXXXXX`.
    FloatImmediate(f32),
    /// `%name`.
    Special(&'i str),
}

impl<'i> Operand<'i> {
    pub fn kind(&self) -> OperandKind {
        match *self {
            Operand::Register(_) => OperandKind::Register,
            Operand::IntImmediate(_) => OperandKind::IntImmediate,
            Operand::FloatImmediate(_) => OperandKind::FloatImmediate,
            Operand::Special(_) => OperandKind::Special,
        }
    }
}

impl<'i> fmt::Display for Operand<'i> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operand::Register(index) => write!(f, "r{}", index),
            Operand::IntImmediate(value) => write!(f, "{}", value),
            Operand::FloatImmediate(value) => write!(f, "{}", value),
            Operand::Special(name) => write!(f, "%{}", name),
        }
    }
}

/// One source instruction after tokenization, before the assembler has
/// judged it. Expansion rewrites these into more of the same shape.
#[derive(Clone, Debug)]
pub struct ParsedInstruction<'i> {
    pub mnemonic: &'i str,
    pub modifiers: Vec<Modifier<'i>>,
    pub operands: Vec<Operand<'i>>,
    /// Source range, kept for error reporting through every phase.
    pub span: Span<'i>,
    /// Label attached to this instruction, if any.
    pub label: Option<&'i str>,
}

impl<'i> ParsedInstruction<'i> {
    pub fn has_modifier(&self, kind: ModifierKind) -> bool {
        self.modifiers.iter().any(|m| m.kind == kind)
    }

    pub fn find_modifiers(&self, kind: ModifierKind) -> Vec<&Modifier<'i>> {
        self.modifiers.iter().filter(|m| m.kind == kind).collect()
    }

    /// The data-type modifier, when exactly one is present.
    pub fn data_type(&self) -> Option<&Modifier<'i>> {
        let mods: Vec<_> = self
            .modifiers
            .iter()
            .filter(|m| {
                m.kind == ModifierKind::IntType
                    || m.kind == ModifierKind::FloatType
                    || m.kind == ModifierKind::BoolType
            })
            .collect();
        match mods.len() {
            1 => Some(mods[0]),
            _ => None,
        }
    }

    pub fn is_ri(&self) -> bool {
        self.has_modifier(ModifierKind::RegImm)
    }

    pub fn is_rr(&self) -> bool {
        self.has_modifier(ModifierKind::RegReg)
    }

    /// The register index at operand position `index`. Only valid after
    /// the instruction matched a descriptor that requires a register
    /// there.
    pub fn reg(&self, index: usize) -> u8 {
        match self.operands[index] {
            Operand::Register(r) => r,
            ref op => panic!("operand {} is not a register: {}", index, op),
        }
    }
}

impl<'i> fmt::Display for ParsedInstruction<'i> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(label) = self.label {
            write!(f, "{}: ", label)?;
        }
        f.write_str(self.mnemonic)?;
        for modifier in &self.modifiers {
            write!(f, ".{}", modifier.text)?;
        }
        for (i, operand) in self.operands.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { " " } else { ", " }, operand)?;
        }
        Ok(())
    }
}

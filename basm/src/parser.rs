use crate::instructions::{Modifier, Operand, ParsedInstruction};
use crate::{new_parser_error, Result};
use log::trace;
use matches::debug_assert_matches;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "bgpu.pest"]
pub struct BASMParser;

/// Parses a whole source text into the flat instruction sequence the
/// assembler works on. A pending label is attached to the instruction that
/// follows it; the grammar rejects a label that is not followed by an
/// instruction.
pub fn parse_program(input: &str) -> Result<Vec<ParsedInstruction>> {
    let program = BASMParser::parse(Rule::program, input)?.next().unwrap();

    let mut instructions = Vec::new();
    for statement in program.into_inner() {
        match statement.as_rule() {
            Rule::statement => {
                let mut label = None;
                for part in statement.into_inner() {
                    match part.as_rule() {
                        Rule::label => {
                            label = Some(part.into_inner().next().unwrap().as_str());
                        }
                        Rule::instruction => {
                            instructions.push(process_instruction(part, label.take())?);
                        }
                        _ => unreachable!(),
                    }
                }
            }
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    Ok(instructions)
}

fn process_instruction<'i>(
    pair: Pair<'i, Rule>,
    label: Option<&'i str>,
) -> Result<ParsedInstruction<'i>> {
    debug_assert_matches!(pair.as_rule(), Rule::instruction);
    let span = pair.as_span();
    let mut pairs = pair.into_inner();

    let opcode = pairs.next().unwrap();
    let mut opcode_parts = opcode.into_inner();
    let mnemonic = opcode_parts.next().unwrap().as_str();
    let modifiers = opcode_parts.map(|m| Modifier::new(m.as_str())).collect();

    let mut operands = Vec::new();
    if let Some(list) = pairs.next() {
        for operand in list.into_inner() {
            operands.push(process_operand(operand)?);
        }
    }

    let parsed = ParsedInstruction {
        mnemonic,
        modifiers,
        operands,
        span,
        label,
    };
    trace!("parsed {}", parsed);
    Ok(parsed)
}

fn process_operand(pair: Pair<Rule>) -> Result<Operand> {
    let inner = pair.into_inner().next().unwrap();
    let span = inner.as_span();
    match inner.as_rule() {
        Rule::register => {
            let index_pair = inner.into_inner().next().unwrap();
            let index: u32 = index_pair
                .as_str()
                .parse()
                .map_err(|_| new_parser_error(span.clone(), "invalid register".to_owned()))?;
            if index > 0xFF {
                return Err(new_parser_error(
                    span,
                    format!("register r{} out of range, registers go up to r255", index),
                ));
            }
            Ok(Operand::Register(index as u8))
        }
        Rule::int_literal => {
            // a trailing `U` marks the literal unsigned; the value itself
            // is kept as written
            let digits = inner.into_inner().next().unwrap();
            digits
                .as_str()
                .parse::<i64>()
                .map(Operand::IntImmediate)
                .map_err(|err| new_parser_error(span, format!("invalid integer: {}", err)))
        }
        Rule::float_literal => inner
            .as_str()
            .parse::<f32>()
            .map(Operand::FloatImmediate)
            .map_err(|err| new_parser_error(span, format!("invalid float: {}", err))),
        Rule::hex_float => {
            let bits_pair = inner.into_inner().next().unwrap();
            let bits = u32::from_str_radix(bits_pair.as_str(), 16)
                .map_err(|err| new_parser_error(span, format!("invalid float pattern: {}", err)))?;
            Ok(Operand::FloatImmediate(f32::from_bits(bits)))
        }
        Rule::special => {
            let name = inner.into_inner().next().unwrap().as_str();
            Ok(Operand::Special(name))
        }
        _ => unreachable!(),
    }
}

//! Assembler for the [bgpu](../bgpu/index.html) compute device.
//!
//! [`assemble`](fn.assemble.html) takes a program in BGPU assembly and
//! returns the packed little-endian instruction stream, ready to be placed
//! at offset 0 of a kernel region, together with a [`SourceMap`](type.SourceMap.html)
//! associating every emitted word with its source line.
//!
//! Parsing is implemented with [pest], and the crate's [`Error`](type.Error.html)
//! type is an alias of `pest::error::Error`, so every failure (including
//! the assembler's own type checks and link errors) renders the offending
//! source line with a caret.
//!
//! # Language
//!
//! One instruction per line; `#` starts a comment; a token ending in `:`
//! is a label for the following instruction. A mnemonic carries its
//! modifiers as `.`-separated suffixes, e.g. `add.ri.int32 r1, r0, 4`.
//! Operands are registers (`r0`–`r255`), decimal integers (optionally
//! `U`-suffixed), floats (`1.5` or a `0f`-prefixed hexadecimal IEEE-754
//! bit pattern) and `%`-prefixed special sources.
//!
//! Mnemonic | Forms | Meaning
//! ---------|-------|--------
//! `mov`     | `.rr`/`.ri` + dtype | copy or load constant; wide constants expand to five words
//! `add` `sub` `and` `or` `xor` `shl` `shr` `mul` | `.rr`/`.ri` + int dtype | integer ALU
//! `cmplt` `cmpne` `max` `div` | `.rr`/`.ri` + int dtype | comparisons, max, division
//! `special` | none | `special rd, %l` (thread id), `%g` (block id), `%param` (parameter address)
//! `ld` `st` | dtype + `global`/`param` | memory access through an address register
//! `ldparam` | optional dtype | load the n-th kernel parameter word
//! `br`      | `.ez`/`.nz` + target label | conditional branch on a guard register
//! `sync`    | `.threads` | warp-wide barrier
//! `stop`    | none | end of kernel for this thread
//! `add` `sub` `mul` `max` `cmplt` | `.rr.float32` | float ALU
//! `exp2` `log2` `recip` `itof` `ftoi` | `.rr.float32` | unary float operations
//!
//! [pest]: https://docs.rs/pest/

mod instructions;
mod labels;
mod parser;
mod source_map;
mod units;


pub use instructions::{Modifier, ModifierKind, Operand, OperandKind, ParsedInstruction};
pub use labels::{collect_labels, LabelMap};
pub use parser::{parse_program, BASMParser, Rule};
pub use source_map::{SourceMap, SourceMapItem};
pub use units::{encode_instruction, expand_program};

use bgpu::constants::WORD_BYTES;
use bgpu::Endian;
use byteorder::ByteOrder;
use log::debug;
use pest::Span;

pub type Error = pest::error::Error<Rule>;

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn new_parser_error(span: Span, message: String) -> Error {
    Error::new_from_span(pest::error::ErrorVariant::CustomError { message }, span)
}

/// Assembles a source text into the packed instruction stream and its
/// source map. All errors are reported before any bytes are produced.
pub fn assemble(input: &str) -> Result<(Vec<u8>, SourceMap)> {
    let words = assemble_words(input)?;

    let mut code = vec![0; words.len() * WORD_BYTES as usize];
    let mut source_map = Vec::with_capacity(words.len());
    for (i, (word, item)) in words.into_iter().enumerate() {
        let start = i * WORD_BYTES as usize;
        Endian::write_u32(&mut code[start..start + WORD_BYTES as usize], word);
        source_map.push(item);
    }

    Ok((code, source_map))
}

/// Like [`assemble`](fn.assemble.html) but yields the words before
/// packing, paired with their source lines. Used by the listing output.
pub fn assemble_words(input: &str) -> Result<Vec<(u32, SourceMapItem)>> {
    let parsed = parser::parse_program(input)?;
    let expanded = units::expand_program(parsed)?;
    let labels = labels::collect_labels(&expanded)?;
    debug!(
        "{} instructions after expansion, {} labels",
        expanded.len(),
        labels.len()
    );

    let mut words = Vec::with_capacity(expanded.len());
    for (addr, inst) in expanded.iter().enumerate() {
        let word = units::encode_instruction(inst, &labels, addr as u32)?;
        let (start_line, _) = inst.span.start_pos().line_col();
        let (end_line, _) = inst.span.end_pos().line_col();
        words.push((
            word,
            SourceMapItem {
                start_line: start_line as u32,
                line_count: (end_line - start_line) as u32 + 1,
            },
        ));
    }
    Ok(words)
}

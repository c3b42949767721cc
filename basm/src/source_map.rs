#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceMapItem {
    pub start_line: u32,
    pub line_count: u32,
}

/// One item per emitted instruction word, pointing back at the source
/// line(s) it came from. Instructions produced by expansion all map to the
/// line of the pseudo-instruction.
pub type SourceMap = Vec<SourceMapItem>;

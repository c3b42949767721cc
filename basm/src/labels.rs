use crate::instructions::ParsedInstruction;
use crate::{new_parser_error, Result};
use log::debug;
use std::collections::HashMap;

/// Label name → address in instruction units.
pub type LabelMap<'i> = HashMap<&'i str, u32>;

/// Collects the label addresses of a placed (post-expansion) program. A
/// label attached to an expanded pseudo-instruction names the first
/// instruction of its expansion.
pub fn collect_labels<'i>(instructions: &[ParsedInstruction<'i>]) -> Result<LabelMap<'i>> {
    let mut labels = HashMap::new();
    for (addr, inst) in instructions.iter().enumerate() {
        if let Some(name) = inst.label {
            debug!("label {} at {}", name, addr);
            if labels.insert(name, addr as u32).is_some() {
                return Err(new_parser_error(
                    inst.span.clone(),
                    format!("duplicate label: {}", name),
                ));
            }
        }
    }
    Ok(labels)
}

use super::lexer::find_amd_model;
use super::{CpuInfo, Missing};

/// AMD dumps carry a `model name` line with the cpu, every other line is taken as
/// the product name, so the last one wins.
pub fn parse_line(info: &mut CpuInfo, line: &str) -> Result<(), Missing> {
    if line.contains("model name") {
        info.cpu_name = find_amd_model(line)
            .ok_or(Missing("\"AMD\" followed by two words"))?
            .to_string();
    } else {
        // TODO: this overwrites the product name on every line, narrow it down to the
        // product line once there are AMD dumps with more than two lines to check against
        info.product_name = line.to_string();
    }
    Ok(())
}

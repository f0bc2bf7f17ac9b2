use super::lexer::{first_digits, underscore_tokens, value_after_colon};
use super::{CpuInfo, Missing};

/// IBM dumps are `prtconf` output from AIX:
///
/// ```text
/// Processor Type: PowerPC_POWER8
/// Number Of Processors: 4
/// Processor Clock Speed: 3500 MHz
/// ```
pub fn parse_line(info: &mut CpuInfo, line: &str) -> Result<(), Missing> {
    if line.contains("Processor Type") {
        let processor_type =
            value_after_colon(line).ok_or(Missing("processor type after \": \""))?;
        // `PowerPC_POWER8`, the part after the family is the interesting bit
        let tokens = underscore_tokens(processor_type);
        info.cpu_name = tokens
            .get(1)
            .ok_or(Missing("second part of the processor type"))?
            .to_string();
    }
    if line.contains("Number Of Processors") {
        let processors = first_digits(line).map_err(|_| Missing("number of processors"))?;
        info.cpu_count = processors
            .parse()
            .map_err(|_| Missing("number of processors that fits in 64 bits"))?;
    }
    if line.contains("Processor Clock Speed") {
        info.cpu_speed = first_digits(line)
            .map_err(|_| Missing("processor clock speed"))?
            .to_string();
    }
    Ok(())
}

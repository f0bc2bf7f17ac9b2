use super::lexer::word_tokens;
use super::{CpuInfo, Missing};

#[derive(Debug, Default)]
pub struct SunState {
    initialized: bool,
}

/// Sun dumps are `psrinfo -v` output, one paragraph per virtual processor:
///
/// ```text
/// Status of virtual processor 0 as of: 09/17/2024 10:20:12
///   on-line since 01/02/2024 08:00:00.
///   The sparcv9 processor operates at 1165 MHz,
///         and has a sparcv9 floating point processor.
/// ```
///
/// The first line seen under this vendor names the cpu and its clock speed, and
/// every `operates` line is one processor.
pub fn parse_line(state: &mut SunState, info: &mut CpuInfo, line: &str) -> Result<(), Missing> {
    if !state.initialized {
        state.initialized = true;
        info.cpu_count = 0;
        let tokens = word_tokens(line);
        info.cpu_name = tokens
            .get(1)
            .ok_or(Missing("cpu name as the second word"))?
            .to_string();
        info.cpu_speed = tokens
            .get(5)
            .ok_or(Missing("clock speed as the sixth word"))?
            .to_string();
    }
    if line.contains("operates") {
        info.cpu_count += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_psrinfo() {
        let mut state = SunState::default();
        let mut info = CpuInfo::default();
        for line in [
            "  The sparcv9 processor operates at 1165 MHz,\n",
            "        and has a sparcv9 floating point processor.\n",
            "Status of virtual processor 1 as of: 09/17/2024 10:20:12\n",
            "  The sparcv9 processor operates at 1165 MHz,\n",
        ] {
            parse_line(&mut state, &mut info, line).unwrap();
        }
        assert_eq!(info.cpu_name, "sparcv9");
        assert_eq!(info.cpu_speed, "1165");
        assert_eq!(info.cpu_count, 2);
    }

    #[test]
    fn first_line_without_operates_resets_count() {
        let mut state = SunState::default();
        let mut info = CpuInfo::default();
        parse_line(
            &mut state,
            &mut info,
            "The UltraSparcT2 is a 64-bit 1200 MHz sparc chip\n",
        )
        .unwrap();
        assert_eq!(info.cpu_name, "UltraSparcT2");
        assert_eq!(info.cpu_speed, "1200");
        assert_eq!(info.cpu_count, 0);
        // later lines never re-run the first line handling
        parse_line(&mut state, &mut info, "x\n").unwrap();
        parse_line(&mut state, &mut info, "it operates\n").unwrap();
        assert_eq!(info.cpu_name, "UltraSparcT2");
        assert_eq!(info.cpu_count, 1);
    }

    #[test]
    fn short_first_line_is_an_error() {
        let mut state = SunState::default();
        let mut info = CpuInfo::default();
        assert_eq!(
            parse_line(&mut state, &mut info, "sparc\n"),
            Err(Missing("cpu name as the second word"))
        );
        let mut state = SunState::default();
        assert_eq!(
            parse_line(&mut state, &mut info, "a sparc b c d\n"),
            Err(Missing("clock speed as the sixth word"))
        );
    }
}

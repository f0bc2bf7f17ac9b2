use super::lexer::{model_tokens, number_after_at, value_after_colon, value_before_at};
use super::{CpuInfo, Missing};

/// Tokens of the model name that carry no information, eg the `R` in `Intel(R)`
const NOISE_TOKENS: [&str; 4] = ["Intel", "CPU", "R", "0"];

#[derive(Debug, Default)]
pub struct IntelState {
    /// Set by a `model name` line, the line after it is the product name
    lookahead: bool,
}

/// Intel dumps look like this:
///
/// ```text
/// model name	: Intel(R) Xeon(R) CPU E5-2690 0 @ 2.90GHz
/// ProLiant DL380p Gen8
/// ```
pub fn parse_line(state: &mut IntelState, info: &mut CpuInfo, line: &str) -> Result<(), Missing> {
    if state.lookahead {
        info.product_name = line.to_string();
        state.lookahead = false;
    }
    if !line.contains("model name") {
        return Ok(());
    }
    state.lookahead = true;

    let model = if line.contains('@') {
        value_before_at(line).ok_or(Missing("model name between \": \" and \" @\""))?
    } else if line.contains(':') {
        value_after_colon(line).ok_or(Missing("model name after \": \""))?
    } else {
        line
    };
    info.cpu_name = model_tokens(model)
        .into_iter()
        .filter(|t| !NOISE_TOKENS.contains(t))
        .collect();

    info.cpu_speed = if line.contains('@') {
        let ghz = number_after_at(line).ok_or(Missing("clock speed after \"@ \""))?;
        let ghz: f64 = ghz
            .parse()
            .map_err(|_| Missing("clock speed in GHz after \"@ \""))?;
        // truncated, not rounded
        ((ghz * 1000.0) as i64).to_string()
    } else {
        String::from("0")
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(lines: &[&str]) -> Result<CpuInfo, Missing> {
        let mut state = IntelState::default();
        let mut info = CpuInfo::default();
        for line in lines {
            parse_line(&mut state, &mut info, line)?;
        }
        Ok(info)
    }

    #[test]
    fn basic_model_name() {
        let info = feed(&[
            "model name : Intel(R) Xeon(R) CPU E5-2690 @ 2.60GHz\n",
            "Some Product Line\n",
        ])
        .unwrap();
        assert_eq!(info.cpu_name, "XeonE5-2690");
        assert_eq!(info.cpu_speed, "2600");
        assert_eq!(info.product_name, "Some Product Line\n");
    }

    #[test]
    fn basic_stray_zero_token() {
        let info = feed(&["model name\t: Intel(R) Xeon(R) CPU E5-2690 0 @ 2.90GHz\n"]).unwrap();
        assert_eq!(info.cpu_name, "XeonE5-2690");
        assert_eq!(info.cpu_speed, "2900");
    }

    #[test]
    fn basic_no_clock_speed() {
        let info = feed(&["model name : Intel(R) Core(TM) i7-8700\n"]).unwrap();
        assert_eq!(info.cpu_name, "CoreTMi7-8700");
        assert_eq!(info.cpu_speed, "0");
        // the whole line is used when there's no colon at all
        let info = feed(&["model name Intel Pentium-M\n"]).unwrap();
        assert_eq!(info.cpu_name, "modelnamePentium-M");
    }

    #[test]
    fn lookahead_only_covers_one_line() {
        let info = feed(&[
            "Intel box\n",
            "model name : Intel(R) Xeon(R) Gold 6130 CPU @ 2.10GHz\n",
            "PowerEdge R740\n",
            "Serial Number: abc\n",
        ])
        .unwrap();
        assert_eq!(info.product_name, "PowerEdge R740\n");
        assert_eq!(info.cpu_name, "XeonGold6130");
        assert_eq!(info.cpu_speed, "2100");
    }

    #[test]
    fn lines_before_model_name_are_ignored() {
        let info = feed(&["GenuineIntel\n", "vendor_id: Intel\n"]).unwrap();
        assert_eq!(info.product_name, " ");
        assert_eq!(info.cpu_name, " ");
    }

    #[test]
    fn missing_patterns_are_errors() {
        assert!(feed(&["model name Intel @ 2.6GHz\n"]).is_err());
        assert!(feed(&["model name:Intel Xeon\n"]).is_err());
        assert!(feed(&["model name : Intel Xeon @ GHz\n"]).is_err());
        assert!(feed(&["model name : Intel Xeon @2.6GHz\n"]).is_err());
    }
}

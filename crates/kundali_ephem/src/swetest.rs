//! Direct-return provider backed by the Swiss ephemeris `swetest` program.
//!
//! Each call spawns `swetest` once and parses its plain-text output into
//! the reply shapes the adapter understands. Cancellation kills the child.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::process::Command;

use crate::config::{EphemerisConfig, SiderealMode};
use crate::engine::{CalcFlags, EngineKind};
use crate::error::EphemError;
use crate::provider::DirectEphemeris;

/// `swetest` command-line provider.
#[derive(Debug, Clone)]
pub struct SwetestProvider {
    bin: PathBuf,
    ephe_path: PathBuf,
    sidereal_mode: SiderealMode,
}

struct SwetestOutput {
    stdout: String,
    stderr: String,
    success: bool,
}

impl SwetestOutput {
    fn diagnostics(&self) -> String {
        let mut text = self.stderr.trim().to_string();
        if text.is_empty() {
            text = self.stdout.trim().to_string();
        }
        if text.is_empty() && !self.success {
            text = "swetest exited with failure".to_string();
        }
        text
    }
}

/// `swetest -p` letter for a Swiss ephemeris body code.
pub const fn swetest_planet_letter(ipl: i32) -> Option<char> {
    match ipl {
        0 => Some('0'),
        1 => Some('1'),
        2 => Some('2'),
        3 => Some('3'),
        4 => Some('4'),
        5 => Some('5'),
        6 => Some('6'),
        7 => Some('7'),
        8 => Some('8'),
        9 => Some('9'),
        10 => Some('m'),
        11 => Some('t'),
        _ => None,
    }
}

fn numbers(line: &str) -> Vec<f64> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<f64>().ok())
        .filter(|x| x.is_finite())
        .collect()
}

/// Parse `-fls` output: longitude then speed on the first numeric line.
pub fn parse_calc_output(stdout: &str) -> Option<(f64, Option<f64>)> {
    stdout.lines().find_map(|line| {
        let n = numbers(line);
        n.first().map(|&lon| (lon, n.get(1).copied()))
    })
}

/// Parse `-house` output with `-fPl`: lines `house N  <deg>` and `Ascendant <deg>`.
pub fn parse_house_output(stdout: &str) -> Option<([f64; 12], f64)> {
    let mut cusps = [f64::NAN; 12];
    let mut asc = None;
    for line in stdout.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(value) = tokens.last().and_then(|t| t.parse::<f64>().ok()) else {
            continue;
        };
        match tokens.first().map(|t| t.to_ascii_lowercase()) {
            Some(label) if label == "house" => {
                let n = tokens.get(1).and_then(|t| t.parse::<usize>().ok());
                if let Some(n @ 1..=12) = n {
                    cusps[n - 1] = value;
                }
            }
            Some(label) if label == "ascendant" => asc = Some(value),
            _ => {}
        }
    }
    let asc = asc.filter(|a| a.is_finite())?;
    cusps.iter().all(|c| c.is_finite()).then_some((cusps, asc))
}

impl SwetestProvider {
    pub fn new(bin: PathBuf, ephe_path: PathBuf, sidereal_mode: SiderealMode) -> Self {
        Self {
            bin,
            ephe_path,
            sidereal_mode,
        }
    }

    pub fn from_config(config: &EphemerisConfig) -> Self {
        Self::new(
            config.swetest_bin.clone(),
            config.ephe_path.clone(),
            config.sidereal_mode,
        )
    }

    fn common_args(&self, jd_ut: f64, flags: CalcFlags) -> Vec<String> {
        let mut args = vec![format!("-bj{jd_ut}"), "-ut".to_string(), "-head".to_string()];
        match EngineKind::from_flags(flags) {
            Some(EngineKind::Swieph) => args.push("-eswe".to_string()),
            Some(EngineKind::Moseph) => args.push("-emos".to_string()),
            None => {}
        }
        args.push(format!("-edir{}", self.ephe_path.display()));
        args
    }

    async fn run(&self, args: &[String]) -> Result<SwetestOutput, EphemError> {
        tracing::trace!(bin = %self.bin.display(), ?args, "running swetest");
        let out = Command::new(&self.bin)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| EphemError::Process {
                bin: self.bin.clone(),
                source,
            })?;
        Ok(SwetestOutput {
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            success: out.status.success(),
        })
    }

    async fn longitude(&self, jd_ut: f64, ipl: i32, flags: CalcFlags) -> Result<Value, EphemError> {
        let letter = swetest_planet_letter(ipl)
            .ok_or_else(|| EphemError::Provider(format!("no swetest letter for body {ipl}")))?;
        let mut args = self.common_args(jd_ut, flags);
        args.push(format!("-p{letter}"));
        let format = if flags.contains(CalcFlags::SPEED) { "-fls" } else { "-fl" };
        args.push(format.to_string());
        args.push("-g,".to_string());
        if flags.contains(CalcFlags::SIDEREAL) {
            args.push(format!("-sid{}", self.sidereal_mode.code()));
        }

        let out = self.run(&args).await?;
        let serr = out.stderr.trim();
        Ok(match parse_calc_output(&out.stdout).filter(|_| out.success) {
            Some((lon, speed)) => json!({
                "xx": [lon, 0.0, 0.0, speed.unwrap_or(0.0)],
                "serr": serr,
            }),
            None => json!({ "serr": out.diagnostics() }),
        })
    }
}

#[async_trait]
impl DirectEphemeris for SwetestProvider {
    async fn calc_ut(&self, jd_ut: f64, ipl: i32, flags: CalcFlags) -> Result<Value, EphemError> {
        self.longitude(jd_ut, ipl, flags).await
    }

    async fn houses(
        &self,
        jd_ut: f64,
        lat: f64,
        lon: f64,
        hsys: char,
    ) -> Result<Value, EphemError> {
        let mut args = self.common_args(jd_ut, CalcFlags::NONE);
        args.push(format!("-house{lon},{lat},{hsys}"));
        args.push("-fPl".to_string());

        let out = self.run(&args).await?;
        Ok(match parse_house_output(&out.stdout).filter(|_| out.success) {
            Some((cusps, asc)) => json!({ "cusps": cusps, "ascendant": asc }),
            None => json!({ "serr": out.diagnostics() }),
        })
    }

    /// Ayanamsa as tropical minus sidereal Sun at the same instant.
    async fn ayanamsa_ut(&self, jd_ut: f64, flags: CalcFlags) -> Result<Value, EphemError> {
        let engine = EngineKind::from_flags(flags).map_or(CalcFlags::NONE, EngineKind::flag);
        let tropical = self.longitude(jd_ut, 0, engine).await?;
        let sidereal = self
            .longitude(jd_ut, 0, engine | CalcFlags::SIDEREAL)
            .await?;
        let first = |v: &Value| v.get("xx").and_then(|xx| xx.get(0)).and_then(Value::as_f64);
        Ok(match (first(&tropical), first(&sidereal)) {
            (Some(t), Some(s)) => json!({ "ayanamsa": (t - s).rem_euclid(360.0) }),
            _ => json!({ "serr": "swetest gave no Sun longitude for ayanamsa" }),
        })
    }

    fn version(&self) -> String {
        format!("swetest ({})", self.bin.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_output_with_speed() {
        let out = "  280.3688412,   1.0194526\n";
        let (lon, speed) = parse_calc_output(out).unwrap();
        assert!((lon - 280.3688412).abs() < 1e-12);
        assert_eq!(speed, Some(1.0194526));
    }

    #[test]
    fn calc_output_skips_warning_lines() {
        let out = "using Moshier eph.\n 12.5\n";
        assert_eq!(parse_calc_output(out), Some((12.5, None)));
        assert_eq!(parse_calc_output("error: no such file\n"), None);
    }

    #[test]
    fn house_output() {
        let mut text = String::from("Sun              280.3688\n");
        for i in 1..=12 {
            text.push_str(&format!("house {i:>2}         {}\n", 100.0 + 30.0 * (i - 1) as f64));
        }
        text.push_str("Ascendant        100.0000\nMC                10.0000\n");
        let (cusps, asc) = parse_house_output(&text).unwrap();
        assert_eq!(cusps[0], 100.0);
        assert_eq!(cusps[11], 430.0);
        assert_eq!(asc, 100.0);
    }

    #[test]
    fn house_output_incomplete() {
        assert!(parse_house_output("house  1  10.0\nAscendant 10.0\n").is_none());
    }

    #[test]
    fn planet_letters() {
        assert_eq!(swetest_planet_letter(0), Some('0'));
        assert_eq!(swetest_planet_letter(11), Some('t'));
        assert_eq!(swetest_planet_letter(42), None);
    }

    #[tokio::test]
    async fn missing_binary_is_process_error() {
        let p = SwetestProvider::new(
            "/nonexistent/bin/swetest".into(),
            "./ephe".into(),
            SiderealMode::Lahiri,
        );
        let err = p.calc_ut(2_451_545.0, 0, CalcFlags::MOSEPH).await.unwrap_err();
        assert!(matches!(err, EphemError::Process { .. }));
    }
}

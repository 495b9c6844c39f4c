// Copyright (c) 2026 rezky_nightky

use std::ffi::OsString;
use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;

use crate::cell::DensityRatio;
use crate::error::ConfigError;
use crate::palette::SnowColor;

pub const DEFAULT_RATIO: u8 = 3;
pub const DEFAULT_FLAKE: &str = "*";
pub const DEFAULT_DELAY_MS: u64 = 800;

pub const DEFAULT_PARAMS_USAGE: &str =
    "DEFAULT PARAMS USAGE:\n  snowfall --ratio 3 --flake '*' --delay 800";

/// Spelling accepted for the background color besides `--background-color`.
pub const BACKGROUND_SHORTHAND: &str = "-bc";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        DEFAULT_PARAMS_USAGE.replacen(
            "DEFAULT PARAMS USAGE:",
            "\x1b[1;36mDEFAULT PARAMS USAGE:\x1b[0m",
            1,
        )
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

/// Rewrites shorthands clap cannot express (multi-letter short flags).
pub fn normalize_argv<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    for arg in argv.iter_mut().skip(1) {
        if arg == BACKGROUND_SHORTHAND {
            *arg = "--background-color".into();
        }
    }
    argv
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "snowfall", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'r',
        long = "ratio",
        value_name = "PERCENT",
        allow_negative_numbers = true,
        help_heading = "SNOW",
        help = "Flakes per hundred cells (min 0 max 100) [default: 3]"
    )]
    pub ratio: Option<i64>,

    #[arg(
        short = 'f',
        long = "flake",
        value_name = "GLYPH",
        help_heading = "SNOW",
        help = "Snowflake character [default: *]"
    )]
    pub flake: Option<String>,

    #[arg(
        short = 'd',
        long = "delay",
        value_name = "MS",
        help_heading = "SNOW",
        help = "Delay between frames in milliseconds [default: 800]"
    )]
    pub delay: Option<u64>,

    #[arg(
        short = 'c',
        long = "color",
        value_enum,
        help_heading = "APPEARANCE",
        help = "Flake color (see --list-colors)"
    )]
    pub color: Option<SnowColor>,

    #[arg(
        long = "background-color",
        value_enum,
        help_heading = "APPEARANCE",
        help = "Background color (see --list-colors; shorthand: -bc)"
    )]
    pub background_color: Option<SnowColor>,

    #[arg(
        long = "fixed-size",
        help_heading = "GENERAL",
        help = "Query the terminal size once instead of on every frame"
    )]
    pub fixed_size: bool,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the flake generator for reproducible output"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "duration",
        allow_negative_numbers = true,
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available colors and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Settings for one run. Built once and passed down, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub density: DensityRatio,
    pub glyph: String,
    pub frame_delay: Duration,
    pub foreground: Option<SnowColor>,
    pub background: Option<SnowColor>,
    pub follow_resize: bool,
    pub seed: Option<u64>,
    pub duration: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            density: DensityRatio::default(),
            glyph: DEFAULT_FLAKE.to_string(),
            frame_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            foreground: None,
            background: None,
            follow_resize: true,
            seed: None,
            duration: None,
        }
    }
}

impl Config {
    /// Returns a copy of `self` with every option present in `args` applied.
    /// On error nothing is applied.
    pub fn overridden_by(&self, args: &Args) -> Result<Self, ConfigError> {
        let mut next = self.clone();
        if let Some(ratio) = args.ratio {
            next.density = DensityRatio::new(ratio)?;
        }
        if let Some(flake) = &args.flake {
            next.glyph = parse_flake(flake)?;
        }
        if let Some(ms) = args.delay {
            next.frame_delay = Duration::from_millis(ms);
        }
        if args.color.is_some() {
            next.foreground = args.color;
        }
        if args.background_color.is_some() {
            next.background = args.background_color;
        }
        if args.fixed_size {
            next.follow_resize = false;
        }
        if args.seed.is_some() {
            next.seed = args.seed;
        }
        if let Some(s) = args.duration {
            next.duration = parse_duration(s)?;
        }
        Ok(next)
    }

    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        Self::default().overridden_by(args)
    }
}

fn parse_flake(raw: &str) -> Result<String, ConfigError> {
    let flake = raw.trim();
    if flake.is_empty() {
        return Err(ConfigError::EmptyFlake);
    }
    if flake.chars().any(char::is_control) {
        return Err(ConfigError::UnprintableFlake(flake.to_string()));
    }
    Ok(flake.to_string())
}

fn parse_duration(secs: f64) -> Result<Option<Duration>, ConfigError> {
    if !secs.is_finite() {
        return Err(ConfigError::NonFiniteDuration(secs));
    }
    if secs <= 0.0 {
        return Ok(None);
    }
    if !(0.1..=86400.0).contains(&secs) {
        return Err(ConfigError::DurationOutOfRange(secs));
    }
    Ok(Some(Duration::from_secs_f64(secs)))
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLORS:\x1b[0m");
    } else {
        println!("AVAILABLE COLORS:");
    }
    println!();
    for c in SnowColor::ALL {
        if c == SnowColor::Magenta {
            println!("  {} (alias: magneta)", c.name());
        } else {
            println!("  {}", c.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        let mut full = vec!["snowfall"];
        full.extend_from_slice(argv);
        Args::try_parse_from(normalize_argv(full))
    }

    #[test]
    fn no_flags_gives_defaults() {
        let cfg = Config::from_args(&parse(&[]).unwrap()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.density.get(), DEFAULT_RATIO);
        assert_eq!(cfg.glyph, "*");
        assert_eq!(cfg.frame_delay, Duration::from_millis(800));
        assert!(cfg.follow_resize);
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "-r", "40", "-f", " # ", "-d", "120", "-c", "cyan", "-bc", "blue",
        ])
        .unwrap();
        let cfg = Config::from_args(&args).unwrap();
        assert_eq!(cfg.density.get(), 40);
        assert_eq!(cfg.glyph, "#");
        assert_eq!(cfg.frame_delay, Duration::from_millis(120));
        assert_eq!(cfg.foreground, Some(SnowColor::Cyan));
        assert_eq!(cfg.background, Some(SnowColor::Blue));
    }

    #[test]
    fn ratio_above_hundred_is_rejected_without_touching_defaults() {
        let defaults = Config::default();
        let args = parse(&["-r", "150", "-f", "o"]).unwrap();
        assert_eq!(
            defaults.overridden_by(&args),
            Err(ConfigError::RatioOutOfRange(150))
        );
        assert_eq!(defaults, Config::default());
    }

    #[test]
    fn negative_ratio_is_rejected() {
        let args = parse(&["-r", "-5"]).unwrap();
        assert_eq!(
            Config::from_args(&args),
            Err(ConfigError::RatioOutOfRange(-5))
        );
    }

    #[test]
    fn boundary_ratios_are_accepted() {
        for r in ["0", "100"] {
            let args = parse(&["-r", r]).unwrap();
            assert!(Config::from_args(&args).is_ok());
        }
    }

    #[test]
    fn missing_values_name_the_flag() {
        for (flag, long) in [("-r", "--ratio"), ("-f", "--flake"), ("-d", "--delay")] {
            let err = parse(&[flag]).unwrap_err();
            assert!(
                err.to_string().contains(long),
                "{flag}: {}",
                err.render()
            );
        }
    }

    #[test]
    fn non_numeric_ratio_and_delay_are_rejected() {
        assert_eq!(
            parse(&["-r", "lots"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["-d", "soon"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }

    #[test]
    fn unknown_color_is_rejected() {
        assert_eq!(
            parse(&["-c", "mauve"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert!(parse(&["-bc", "mauve"]).is_err());
    }

    #[test]
    fn background_shorthand_is_rewritten() {
        let argv = normalize_argv(["snowfall", "-bc", "red", "-c", "white"]);
        assert_eq!(argv[1], OsString::from("--background-color"));
        assert_eq!(argv[3], OsString::from("-c"));
    }

    #[test]
    fn blank_or_control_flakes_are_rejected() {
        let args = parse(&["-f", "   "]).unwrap();
        assert_eq!(Config::from_args(&args), Err(ConfigError::EmptyFlake));

        let args = parse(&["-f", "a\nb"]).unwrap();
        assert!(matches!(
            Config::from_args(&args),
            Err(ConfigError::UnprintableFlake(_))
        ));
    }

    #[test]
    fn duration_limits() {
        let args = parse(&["--duration", "2.5"]).unwrap();
        assert_eq!(
            Config::from_args(&args).unwrap().duration,
            Some(Duration::from_millis(2500))
        );

        let args = parse(&["--duration", "0"]).unwrap();
        assert_eq!(Config::from_args(&args).unwrap().duration, None);

        let args = parse(&["--duration", "0.01"]).unwrap();
        assert_eq!(
            Config::from_args(&args),
            Err(ConfigError::DurationOutOfRange(0.01))
        );
    }

    #[test]
    fn fixed_size_and_seed() {
        let cfg = Config::from_args(&parse(&["--fixed-size", "--seed", "9"]).unwrap()).unwrap();
        assert!(!cfg.follow_resize);
        assert_eq!(cfg.seed, Some(9));
    }
}

// Copyright (c) 2026 rezky_nightky

use std::env;

#[cfg(unix)]
use std::thread;

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use log::info;
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use snowfall::config::{
    color_enabled_stdout, default_params_usage_for_help, normalize_argv, print_list_colors, Args,
    Config,
};
use snowfall::error::SnowError;
use snowfall::render::{Snowfall, StopSignal};
use snowfall::terminal::{host_provider, restore_terminal_best_effort, Screen};

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

const LOG_ENV: &str = "SNOWFALL_LOG";

fn build_info() -> &'static str {
    env!("SNOWFALL_BUILD")
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Green))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Magenta))))
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn"))
        .format_timestamp_micros()
        .init();
}

fn install_stop_handlers(stop: &StopSignal) {
    #[cfg(unix)]
    {
        match Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            Ok(mut signals) => {
                let stop = stop.clone();
                thread::spawn(move || {
                    let mut pending = signals.forever();
                    if let Some(sig) = pending.next() {
                        stop.raise_signal(sig);
                    }
                    // A second signal means the loop did not wind down.
                    if let Some(sig) = pending.next() {
                        restore_terminal_best_effort();
                        std::process::exit(128 + sig);
                    }
                });
            }
            Err(e) => eprintln!("failed to install signal handlers: {}", e),
        }
    }

    #[cfg(windows)]
    {
        let stop = stop.clone();
        if let Err(e) = ctrlc::set_handler(move || stop.raise_signal(2)) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn run(config: &Config, stop: &StopSignal) -> Result<(), SnowError> {
    let screen =
        Screen::stdout(config.foreground, config.background).map_err(SnowError::Output)?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut snow = Snowfall::new(config, host_provider(), screen, rng);
    let summary = snow.run(stop)?;
    info!("last frame size {}", summary.last_size);
    Ok(())
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    init_logging();

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }
    cmd.build();

    let matches = cmd.get_matches_from(normalize_argv(env::args_os()));
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return;
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return;
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        let sha = env!("SNOWFALL_GIT_SHA");
        if !sha.is_empty() {
            println!("Commit: {}", sha);
        }
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return;
    }

    let config = match Config::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stop = StopSignal::new();
    install_stop_handlers(&stop);

    if let Err(e) = run(&config, &stop) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Some(sig) = stop.signal() {
        std::process::exit(128 + sig);
    }
}

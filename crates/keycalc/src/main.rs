//! keycalc: keypad calculator from the command line
//!
//! ## Usage
//!
//! ```bash
//! keycalc press 1 2 + 3 =          # prints 15
//! keycalc press --trace 8 ÷ 0 =    # display after every token
//! keycalc keys 6 x 7 Enter         # keyboard names, prints 42
//! keycalc state 5 +                # JSON snapshot of the engine
//! keycalc tui                      # interactive terminal calculator
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use keycalc::config::{CalcConfig, ColorChoice, Verbosity};
use keycalc::core::{Calculator, RecordingSink, Token};
use keycalc::keymap::map_key;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Keycalc: keypad calculator with left-to-right evaluation
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Color output for logs (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Press keypad buttons by label and print the display
    Press(PressArgs),

    /// Press keyboard keys by name and print the display
    Keys(KeysArgs),

    /// Press buttons and print the engine state as JSON
    State(StateArgs),

    /// Run the interactive terminal calculator
    Tui,
}

/// Arguments for `press`
#[derive(Args, Debug)]
struct PressArgs {
    /// Button labels: 0-9 . + - × ÷ = C ←
    #[arg(required = true, allow_hyphen_values = true)]
    labels: Vec<String>,

    /// Print the display after every token
    #[arg(long)]
    trace: bool,
}

/// Arguments for `keys`
#[derive(Args, Debug)]
struct KeysArgs {
    /// Key names as a browser reports them (e.g. 7, *, /, Enter, Backspace)
    #[arg(required = true, allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Print the display after every key
    #[arg(long)]
    trace: bool,
}

/// Arguments for `state`
#[derive(Args, Debug)]
struct StateArgs {
    /// Button labels to press before taking the snapshot
    #[arg(allow_hyphen_values = true)]
    labels: Vec<String>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Result type for CLI operations
type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
enum CliError {
    /// Writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal setup or event loop failed
    #[error("Terminal error: {message}")]
    Terminal {
        /// Error message
        message: String,
    },

    /// Snapshot serialization failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    /// Create a terminal error
    #[must_use]
    fn terminal(message: impl std::fmt::Display) -> Self {
        Self::Terminal {
            message: message.to_string(),
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_logging(&config, matches!(cli.command, Commands::Tui));

    let mut stdout = io::stdout().lock();
    match cli.command {
        Commands::Press(args) => {
            run_press(&config.with_trace(args.trace), &args.labels, &mut stdout)
        }
        Commands::Keys(args) => run_keys(&config.with_trace(args.trace), &args.keys, &mut stdout),
        Commands::State(args) => run_state(&args.labels, &mut stdout),
        Commands::Tui => run_tui(),
    }
}

fn build_config(cli: &Cli) -> CalcConfig {
    CalcConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.verbose, cli.quiet))
        .with_color(cli.color.clone().into())
}

/// Logs go to stderr; `RUST_LOG` overrides the flag-derived level.
/// The terminal UI owns the screen, so it only logs when `RUST_LOG` asks.
fn init_logging(config: &CalcConfig, interactive: bool) {
    let fallback = if interactive {
        "off"
    } else {
        config.verbosity.filter_directive()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .init();
}

fn new_calculator() -> Calculator<RecordingSink> {
    Calculator::new(RecordingSink::new())
}

/// Feeds resolved tokens, echoing the display per token when tracing
fn feed<W: Write>(
    calc: &mut Calculator<RecordingSink>,
    inputs: &[String],
    resolve: impl Fn(&str) -> Option<Token>,
    trace: bool,
    out: &mut W,
) -> CliResult<()> {
    for input in inputs {
        match resolve(input) {
            Some(token) => calc.handle_token(token),
            None => {
                warn!(input = %input, "skipping unknown input");
                continue;
            }
        }
        if trace {
            writeln!(out, "{input}\t{}", calc.engine().display())?;
        }
    }
    Ok(())
}

fn run_press<W: Write>(config: &CalcConfig, labels: &[String], out: &mut W) -> CliResult<()> {
    let mut calc = new_calculator();
    feed(&mut calc, labels, Token::from_label, config.trace, out)?;
    writeln!(out, "{}", calc.engine().display())?;
    info!(renders = calc.sink().frames().len(), "press finished");
    Ok(())
}

fn run_keys<W: Write>(config: &CalcConfig, keys: &[String], out: &mut W) -> CliResult<()> {
    let mut calc = new_calculator();
    feed(
        &mut calc,
        keys,
        |key| map_key(key).map(|m| m.token),
        config.trace,
        out,
    )?;
    writeln!(out, "{}", calc.engine().display())?;
    info!(renders = calc.sink().frames().len(), "keys finished");
    Ok(())
}

fn run_state<W: Write>(labels: &[String], out: &mut W) -> CliResult<()> {
    let mut calc = new_calculator();
    feed(&mut calc, labels, Token::from_label, false, out)?;
    let json = serde_json::to_string_pretty(&calc.engine().snapshot())?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(feature = "tui")]
fn run_tui() -> CliResult<()> {
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use keycalc::tui::CalculatorApp;
    use ratatui::{backend::CrosstermBackend, Terminal};

    enable_raw_mode().map_err(CliError::terminal)?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            let _ = disable_raw_mode();
        },
    )?;

    let mut app = CalculatorApp::new();
    let result = keycalc::tui::run(&mut terminal, &mut app);

    // Restore the terminal before reporting any loop error
    disable_raw_mode().map_err(CliError::terminal)?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(CliError::terminal)?;
    terminal.show_cursor().map_err(CliError::terminal)?;

    info!(display = app.display(), "terminal session ended");
    result.map_err(CliError::terminal)
}

/// Runs `setup`, calling `restore` before returning its error
#[cfg(feature = "tui")]
fn setup_or_restore<T>(
    setup: impl FnOnce() -> io::Result<T>,
    restore: impl FnOnce(),
) -> CliResult<T> {
    setup().map_err(|err| {
        restore();
        CliError::terminal(err)
    })
}

#[cfg(not(feature = "tui"))]
fn run_tui() -> CliResult<()> {
    Err(CliError::terminal(
        "terminal UI not enabled. Rebuild with --features tui",
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_press_command() {
            let cli = Cli::parse_from(["keycalc", "press", "1", "+", "2", "="]);
            match cli.command {
                Commands::Press(args) => {
                    assert_eq!(args.labels, strings(&["1", "+", "2", "="]));
                    assert!(!args.trace);
                }
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn test_press_accepts_minus_label() {
            let cli = Cli::parse_from(["keycalc", "press", "9", "-", "4"]);
            assert!(matches!(cli.command, Commands::Press(ref a) if a.labels.len() == 3));
        }

        #[test]
        fn test_keys_trace_flag() {
            let cli = Cli::parse_from(["keycalc", "keys", "--trace", "7", "Enter"]);
            match cli.command {
                Commands::Keys(args) => {
                    assert!(args.trace);
                    assert_eq!(args.keys, strings(&["7", "Enter"]));
                }
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn test_press_requires_labels() {
            assert!(Cli::try_parse_from(["keycalc", "press"]).is_err());
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from(["keycalc", "-vv", "--color", "never", "tui"]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(matches!(cli.command, Commands::Tui));

            let config = build_config(&cli);
            assert_eq!(config.verbosity, Verbosity::Debug);
            assert_eq!(config.color, ColorChoice::Never);
        }

        #[test]
        fn test_quiet_wins() {
            let cli = Cli::parse_from(["keycalc", "-q", "-v", "state"]);
            assert_eq!(build_config(&cli).verbosity, Verbosity::Quiet);
        }

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn test_press_prints_final_display() {
            let labels = strings(&["1", "2", "+", "3", "="]);
            let out = output(|buf| run_press(&CalcConfig::new(), &labels, buf));
            assert_eq!(out, "15\n");
        }

        #[test]
        fn test_press_trace() {
            let labels = strings(&["8", "÷", "0", "="]);
            let config = CalcConfig::new().with_trace(true);
            let out = output(|buf| run_press(&config, &labels, buf));
            assert_eq!(out, "8\t8\n÷\t8\n0\t0\n=\tError\nError\n");
        }

        #[test]
        fn test_press_skips_unknown_labels() {
            let labels = strings(&["4", "%", "×", "2", "="]);
            let out = output(|buf| run_press(&CalcConfig::new(), &labels, buf));
            assert_eq!(out, "8\n");
        }

        #[test]
        fn test_keys_maps_keyboard_names() {
            let keys = strings(&["6", "x", "7", "Enter"]);
            let out = output(|buf| run_keys(&CalcConfig::new(), &keys, buf));
            assert_eq!(out, "42\n");
        }

        #[test]
        fn test_keys_backspace_and_delete() {
            let keys = strings(&["1", "2", "Backspace", "Delete", "F1"]);
            let out = output(|buf| run_keys(&CalcConfig::new(), &keys, buf));
            assert_eq!(out, "0\n");
        }

        #[test]
        fn test_state_snapshot_json() {
            let labels = strings(&["5", "+"]);
            let out = output(|buf| run_state(&labels, buf));
            let value: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(value["display"], "5");
            assert_eq!(value["previous_value"], 5.0);
            assert_eq!(value["waiting_for_second_operand"], true);
            assert_eq!(value["phase"], "operator_pending");
        }

        #[test]
        fn test_state_empty() {
            let out = output(|buf| run_state(&[], buf));
            let value: serde_json::Value = serde_json::from_str(&out).unwrap();
            assert_eq!(value["display"], "0");
            assert!(value["previous_value"].is_null());
        }

        #[test]
        fn test_terminal_error_message() {
            let err = CliError::terminal("boom");
            assert_eq!(err.to_string(), "Terminal error: boom");
        }
    }

    #[cfg(feature = "tui")]
    mod terminal_tests {
        use super::*;
        use std::cell::Cell;

        #[test]
        fn test_failed_setup_restores_terminal() {
            let restored = Cell::new(false);
            let result: CliResult<()> = setup_or_restore(
                || Err(io::Error::other("no tty")),
                || restored.set(true),
            );
            assert!(restored.get());
            assert_eq!(result.unwrap_err().to_string(), "Terminal error: no tty");
        }

        #[test]
        fn test_successful_setup_keeps_terminal() {
            let restored = Cell::new(false);
            let value = setup_or_restore(|| Ok(7), || restored.set(true)).unwrap();
            assert_eq!(value, 7);
            assert!(!restored.get());
        }
    }
}

//! Clap derive structures for the `denonavr-cli` command tree.

use clap::{Args, Parser, Subcommand, ValueEnum};

use denonavr_core::CacheMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// denonavr-cli — control Denon/Marantz network AV receivers
#[derive(Debug, Parser)]
#[command(
    name = "denonavr-cli",
    version,
    about = "Control networked Denon and Marantz AV receivers",
    long_about = "Command-line control for Denon and Marantz network AV receivers.\n\n\
        With no command, prints a one-line status summary. The receiver is\n\
        autodiscovered unless --host is given; the last used host is cached\n\
        to speed up subsequent invocations.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Host to use (default: autodiscover)
    #[arg(long, short = 'H', env = "DENONAVR_HOST", global = true)]
    pub host: Option<String>,

    /// Whether to cache the last used hostname (or reset the cached value)
    #[arg(long, value_enum, default_value = "on", global = true)]
    pub host_cache: HostCacheMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HostCacheMode {
    Off,
    On,
    Reset,
}

impl From<HostCacheMode> for CacheMode {
    fn from(mode: HostCacheMode) -> Self {
        match mode {
            HostCacheMode::Off => CacheMode::Off,
            HostCacheMode::On => CacheMode::On,
            HostCacheMode::Reset => CacheMode::Reset,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print autodiscovered receivers and exit
    Discover,

    #[command(flatten)]
    Device(DeviceCommand),

    /// Open an interactive command shell on the receiver session
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Commands that operate on a bootstrapped receiver session.
#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Print and control inputs
    Input(InputArgs),

    /// Print and control mute
    Mute(MuteArgs),

    /// Print and control power
    Power(PowerArgs),

    /// Print and control volume
    Volume(VolumeArgs),

    /// Print and control sound mode
    SoundMode(SoundModeArgs),
}

// ── Per-command arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InputArgs {
    /// List available inputs
    #[arg(short, long)]
    pub list: bool,

    /// Switch to another input
    pub new_input: Option<String>,
}

#[derive(Debug, Args)]
pub struct MuteArgs {
    /// Requested state change
    #[arg(value_enum)]
    pub new_state: Option<Switch>,
}

#[derive(Debug, Args)]
pub struct PowerArgs {
    /// Requested state change
    #[arg(value_enum)]
    pub new_state: Option<Switch>,
}

#[derive(Debug, Args)]
pub struct VolumeArgs {
    /// Change to perform
    #[arg(value_enum)]
    pub action: Option<VolumeAction>,

    /// New value or adjustment, in dB
    #[arg(allow_negative_numbers = true)]
    pub value: Option<f64>,
}

#[derive(Debug, Args)]
pub struct SoundModeArgs {
    /// List available sound modes
    #[arg(short, long)]
    pub list: bool,

    /// Switch to another sound mode
    pub new_mode: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    Off,
    On,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VolumeAction {
    Down,
    Set,
    Up,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Shell (REPL) parser ──────────────────────────────────────────────

/// One line of shell input, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(name = "avr", no_binary_name = true, disable_version_flag = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReplCommand {
    #[command(flatten)]
    Device(DeviceCommand),

    /// Print the status summary line
    Status,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
        ReplLine::command().debug_assert();
    }

    #[test]
    fn negative_volume_values_parse() {
        let cli = Cli::parse_from(["denonavr-cli", "volume", "set", "-40.5"]);
        let Some(Command::Device(DeviceCommand::Volume(args))) = cli.command else {
            panic!("expected volume command");
        };
        assert_eq!(args.action, Some(VolumeAction::Set));
        assert_eq!(args.value, Some(-40.5));
    }

    #[test]
    fn host_cache_defaults_to_on() {
        let cli = Cli::parse_from(["denonavr-cli", "power"]);
        assert!(matches!(cli.global.host_cache, HostCacheMode::On));
    }
}

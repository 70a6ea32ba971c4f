use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apparatus")]
#[command(author, version, about)]
#[command(long_about = "A generative apparatus that assembles itself.\n\n\
    Mirror-symmetric rectangles are shuffled apart and played back in reverse,\n\
    so the machine appears to slide into place.\n\n\
    Examples:\n  \
    apparatus                      Launch the animation (fullscreen)\n  \
    apparatus run --windowed       Launch in a window\n  \
    apparatus export --runs 3      Write three runs as PNG frames\n  \
    apparatus simulate --json      Print one run's part histories")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Seed the random generator for a reproducible sequence
    #[arg(long, global = false)]
    pub seed: Option<u64>,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play the assembly animation
    Run {
        /// Launch in a window instead of fullscreen
        #[arg(long)]
        windowed: bool,

        /// Seed the random generator for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Export playback frames as PNG images
    Export {
        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Seed the random generator for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Number of consecutive runs to export
        #[arg(long, default_value = "1")]
        runs: usize,
    },

    /// Assemble one apparatus without a window and print a summary
    Simulate {
        /// Seed the random generator for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Print the run, including every part's path, as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. assembly.movement_length, generator.xdim, display.theme)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("apparatus {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            Some(Commands::Run { windowed, seed }) => {
                crate::app::run(load_settings()?, !windowed, seed)
            }
            Some(Commands::Export {
                output_dir,
                seed,
                runs,
            }) => crate::commands::export::run(&load_settings()?, output_dir, seed, runs),
            Some(Commands::Simulate { seed, json }) => {
                crate::commands::simulate::run(&load_settings()?, seed, json)
            }
            None => crate::app::run(load_settings()?, !self.windowed, self.seed),
        }
    }
}

fn load_settings() -> anyhow::Result<crate::config::Settings> {
    crate::config::Config::load_or_default().resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_launches_fullscreen() {
        let cli = Cli::try_parse_from(["apparatus", "--seed", "7"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.windowed);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn export_defaults() {
        let cli = Cli::try_parse_from(["apparatus", "export"]).unwrap();
        match cli.command {
            Some(Commands::Export {
                output_dir,
                seed,
                runs,
            }) => {
                assert_eq!(output_dir, PathBuf::from("export"));
                assert_eq!(seed, None);
                assert_eq!(runs, 1);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["apparatus", "simulate", "-vv", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Simulate { json: true, .. })
        ));
    }
}

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::*;

use wptheme::{bootstrap, logging, report, Config, Environment, InvocationOptions, InvocationRequest};

#[derive(Parser, Debug)]
#[command(
    name = "create-react-wptheme",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create a React-powered WordPress theme",
    override_usage = "create-react-wptheme <project-directory> [options]"
)]
struct Cli {
    /// Directory to create the theme in
    project_directory: Option<String>,

    /// Values of options we don't know, and any further positionals
    #[arg(hide = true)]
    extra: Vec<String>,

    /// Force create-react-app to print additional logs
    #[arg(long)]
    verbose: bool,

    /// Print environment debug info
    #[arg(long)]
    info: bool,

    /// Print --info output as JSON
    #[arg(long, requires = "info")]
    json: bool,

    /// Force downloading packages using npm instead of yarn (if both are installed)
    #[arg(long)]
    use_npm: bool,

    /// Use Plug'n'Play installs (forwarded to create-react-app)
    #[arg(long)]
    use_pnp: bool,

    /// Generate a TypeScript theme
    #[arg(long)]
    typescript: bool,
}

fn main() -> ExitCode {
    logging::init();

    let config = Config::load();
    let cli = match parse_args(std::env::args_os(), &config) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e),
    };

    match execute(cli, &config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let code = report::report(&e, &config);
            ExitCode::from(code as u8)
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = OsString>, config: &Config) -> Result<Cli, clap::Error> {
    let matches = Cli::command()
        .after_help(help_footer(config))
        .try_get_matches_from(retain_known_args(args))?;
    Cli::from_arg_matches(&matches)
}

/// `--help` and `--version` exit normally; every usage error exits 1.
fn usage_error(e: clap::Error) -> ExitCode {
    use clap::error::ErrorKind;

    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    }
}

fn execute(cli: Cli, config: &Config) -> Result<u8, wptheme::BootstrapError> {
    if cli.info {
        print_info(cli.json, config)?;
        return Ok(0);
    }

    let Some(project_directory) = cli.project_directory else {
        print_missing_directory();
        return Ok(1);
    };
    if !cli.extra.is_empty() {
        tracing::debug!(extra = ?cli.extra, "ignoring extra arguments");
    }

    println!(
        "create-react-wptheme version: {}",
        env!("CARGO_PKG_VERSION").magenta()
    );

    let options = InvocationOptions {
        verbose: cli.verbose,
        use_npm: cli.use_npm,
        use_pnp: cli.use_pnp,
        typescript: cli.typescript,
    };
    let request = InvocationRequest::new(project_directory, options)?;
    bootstrap::run(&request, config)?;
    Ok(0)
}

fn help_footer(config: &Config) -> String {
    format!(
        "    Only {} is required.\n\n    If you have any problems, do not hesitate to file an issue:\n      {}",
        "<project-directory>".green(),
        config.new_issue_url().cyan()
    )
}

fn print_info(json: bool, config: &Config) -> Result<()> {
    let env = Environment::detect(config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&env)?);
    } else {
        println!("{}", "\nEnvironment Info:".bold());
        println!("{}", env.to_text());
    }
    Ok(())
}

fn print_missing_directory() {
    let name = "create-react-wptheme";
    eprintln!("Please specify the project directory:");
    println!("  {} {}", name.cyan(), "<project-directory>".green());
    println!();
    println!("For example:");
    println!("  {} {}", name.cyan(), "my-react-app".green());
    println!();
    println!("Run {} to see all options.", format!("{name} --help").cyan());
}

/// Drop `--options` this CLI doesn't know so newer generator flags never
/// make the bootstrapper fail.
fn retain_known_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let command = Cli::command();
    let known: Vec<String> = command
        .get_arguments()
        .flat_map(|a| {
            let long = a.get_long().map(|l| format!("--{l}"));
            let short = a.get_short().map(|c| format!("-{c}"));
            long.into_iter().chain(short)
        })
        .chain(["--help", "-h", "--version", "-V"].map(String::from))
        .collect();

    let mut args = args.into_iter();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();
    for arg in args {
        let keep = match arg.to_str() {
            Some(s) if s.starts_with('-') && s != "-" && s != "--" => {
                let flag = s.split('=').next().unwrap_or(s);
                known.iter().any(|k| k == flag)
            }
            _ => true,
        };
        if keep {
            kept.push(arg);
        } else {
            tracing::debug!(arg = ?arg, "ignoring unknown option");
        }
    }
    kept
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use revlist::areas::repository::Repository;
use revlist::artifacts::log::rev_walk::SortMode;
use revlist::commands::porcelain::log::LogOptions;

#[derive(Parser)]
#[command(
    name = "revlist",
    version = "0.1.0",
    about = "Walk and list git commit history",
    long_about = "Lists the commits of a git repository in configurable order \
    (topological, by time, reversed), optionally restricted to the commits \
    touching a given path.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a git directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command lists the commits reachable from HEAD, newest first by default. \
        Ordering flags can be combined; --path restricts the output to commits touching that path."
    )]
    Log {
        #[arg(long, help = "Emit children before parents")]
        topological: bool,
        #[arg(long, help = "Order commits by author timestamp, newest first")]
        time: bool,
        #[arg(long, help = "Reverse the final output order")]
        reverse: bool,
        #[arg(
            short = 'n',
            long,
            default_value_t = -1,
            help = "Limit the number of commits (negative means unbounded)"
        )]
        max_count: i64,
        #[arg(long, help = "Only show commits touching this path")]
        path: Option<String>,
    },
    #[command(
        name = "contributions",
        about = "List one line per commit: timestamp, author name and email",
        long_about = "This command prints one line per commit reachable from HEAD, \
        with the author timestamp (UTC offset folded in), name and email."
    )]
    Contributions {
        #[arg(long, help = "Emit children before parents")]
        topological: bool,
        #[arg(long, help = "Order commits by author timestamp, newest first")]
        time: bool,
        #[arg(long, help = "Reverse the final output order")]
        reverse: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            match path {
                Some(path) => Repository::init(path, Box::new(std::io::stdout()))?,
                None => {
                    let pwd = std::env::current_dir()?;
                    Repository::init(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
                }
            };
        }
        Commands::Log {
            topological,
            time,
            reverse,
            max_count,
            path,
        } => {
            let pwd = std::env::current_dir()?;
            let repository = Repository::open(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.log(&LogOptions {
                sort: SortMode::from_flags(*topological, *time, *reverse),
                max_count: *max_count,
                path: path.clone(),
            })?
        }
        Commands::Contributions {
            topological,
            time,
            reverse,
        } => {
            let pwd = std::env::current_dir()?;
            let repository = Repository::open(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?;

            repository.contributions(SortMode::from_flags(*topological, *time, *reverse))?
        }
    }

    Ok(())
}

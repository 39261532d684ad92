use clap::Parser;
use conformance::cli::{
    handle_completions, handle_config_init, models, run, Cli, Commands, ConfigCommands,
};

/// Exit code when at least one model failed a test.
const EXIT_CONFORMANCE_FAILURE: i32 = 1;
/// Exit code when the run could not start.
const EXIT_FATAL: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => match run::handle_run(&args).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(EXIT_CONFORMANCE_FAILURE),
            Err(e) => {
                eprintln!("Fatal: {}", e);
                std::process::exit(EXIT_FATAL);
            }
        },
        Commands::Models(args) => match models::handle_models(&args).await {
            Ok(output) => {
                println!("{}", output);
                Ok(())
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

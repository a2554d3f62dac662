use clap::Parser;
use uptime::cli::{
    handle_completions, handle_config_init, health, monitors, snapshot, Cli, Commands,
    ConfigCommands, MonitorsCommands,
};
use uptime::dashboard::sanitize_terminal;

/// Print handler output and map it to the process result
fn emit(result: Result<String, Box<dyn std::error::Error>>) -> Result<(), Box<dyn std::error::Error>> {
    let output = result?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch(args) => uptime::cli::watch::run_watch(args).await,
        Commands::Health(args) => emit(health::handle_health(&args).await),
        Commands::Monitors(cmd) => match cmd {
            MonitorsCommands::List(args) => emit(monitors::handle_monitors_list(&args).await),
            MonitorsCommands::Show(args) => emit(monitors::handle_monitors_show(&args).await),
            MonitorsCommands::Add(args) => emit(monitors::handle_monitors_add(&args).await),
            MonitorsCommands::Edit(args) => emit(monitors::handle_monitors_edit(&args).await),
            MonitorsCommands::Remove(args) => {
                emit(monitors::handle_monitors_remove(&args).await)
            }
        },
        Commands::Snapshot(args) => emit(snapshot::handle_snapshot(&args).await),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => emit(handle_config_init(&args)),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        let message: Vec<String> = e.to_string().lines().map(sanitize_terminal).collect();
        eprintln!("Error: {}", message.join("\n"));
        std::process::exit(1);
    }
}

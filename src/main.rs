use clap::Parser;
use notehub::cli::{
    handle_browse, handle_create, handle_delete, handle_list, load_config, Cli, Commands,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_config(cli.api_url) {
        Ok(config) => match cli.command {
            Commands::List { page, search, json } => handle_list(&config, page, search, json).await,
            Commands::Create {
                title,
                content,
                tag,
                stdin,
                json,
            } => handle_create(&config, title, content, tag, stdin, json).await,
            Commands::Delete { id, force, json } => handle_delete(&config, id, force, json).await,
            Commands::Browse => handle_browse(&config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

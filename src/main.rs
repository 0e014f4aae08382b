use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use trackiq::{Res, cli, config, error, server, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the aggregation service
    Serve(ServerOptions),

    /// Run the Spotify proxy and token broker
    Proxy(ServerOptions),

    /// Run the service registry
    Registry(ServerOptions),

    /// Run all three services in one process
    All,

    /// List services known to the registry
    Services(ServicesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServerOptions {
    /// Address to bind (host:port); overrides the environment
    #[clap(long)]
    pub addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ServicesOptions {
    /// Only show services matching this text
    #[clap(long)]
    pub search: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file, using process environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let result: Res<()> = match cli.command {
        Command::Serve(opt) => {
            server::start_main_server(opt.addr.unwrap_or_else(config::main_addr)).await
        }
        Command::Proxy(opt) => {
            server::start_proxy_server(opt.addr.unwrap_or_else(config::proxy_addr)).await
        }
        Command::Registry(opt) => {
            server::start_registry_server(opt.addr.unwrap_or_else(config::registry_addr)).await
        }
        Command::All => server::start_all().await,
        Command::Services(opt) => {
            cli::services(opt.search).await;
            Ok(())
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Server stopped. Err: {}", e);
    }
}

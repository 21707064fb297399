use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use perfect_research::{
    api::{ApiClient, Session},
    cli::{Cli, Commands},
    config::Config,
    logging::{self, LogTarget},
    report,
    research_tui::App,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }
    config.validate()?;

    let target = if command.is_interactive() {
        LogTarget::File
    } else {
        LogTarget::FileAndStderr
    };
    logging::init(&config.log_file, target)?;

    if let Commands::Logout = command {
        Session::clear(&config.session_file)?;
        println!("Session supprimée");
        return Ok(());
    }

    let session = Session::load_or_anonymous(&config.session_file)?;
    let client = ApiClient::new(&config, session.clone())?;

    match command {
        Commands::Tui => run_tui(config, client, session.username).await,

        Commands::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            session.save(&config.session_file)?;
            println!(
                "Connecté en tant que {}",
                session.username.as_deref().unwrap_or(&email)
            );
            Ok(())
        }

        Commands::Logout => Ok(()),

        Commands::List { resource, view } => {
            let resource = Commands::parse_resource(&resource)?;
            info!("Listing {}", resource);
            let payload = client.fetch_resource(resource).await?;
            println!("{}", report::format_payload(&payload, &view, config.page_size())?);
            Ok(())
        }

        Commands::Documents { query, view } => {
            info!("Searching documents for '{}'", query);
            let documents = client.search_documents(&query).await?;
            println!("{}", report::format_documents(&documents, &view, config.page_size())?);
            Ok(())
        }
    }
}

async fn run_tui(config: Config, client: ApiClient, username: Option<String>) -> Result<()> {
    info!("Starting Perfect Research TUI against {}", config.api_url);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, Arc::new(client), username);
    let result = app.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("Perfect Research TUI exited"),
        Err(e) => error!("Perfect Research TUI failed: {}", e),
    }
    result
}

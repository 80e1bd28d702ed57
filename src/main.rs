use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_keeper::client::{
    render_board, render_dialog, render_toasts, DraftField, NotesApp, NotesClient,
};
use notes_keeper::config::{ClientConfig, ServerConfig};
use notes_keeper::models::NotePatch;
use notes_keeper::{api, store::NoteStore};

#[derive(Parser)]
#[command(name = "notes-keeper")]
#[command(about = "Keep notes, pin the important ones")]
struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the notes server
    Serve(ServerConfig),
    #[command(flatten)]
    Client(ClientCommand),
}

#[derive(Subcommand)]
enum ClientCommand {
    /// Show pinned notes and one page of the others
    List {
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Create a note
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        tagline: String,
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Edit a note; omitted fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        tagline: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Delete a note
    Delete { id: String },
    /// Pin a note, or unpin it if it is already pinned
    Pin { id: String },
}

/// Server settings resolved from environment and defaults only.
#[derive(Parser)]
struct ServeDefaults {
    #[command(flatten)]
    server: ServerConfig,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "notes_keeper=debug,tower_http=debug".into()),
    );

    // Client output goes to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting notes server on port {}", config.port);

    let db = config.open_database()?;
    let app = api::create_router(NoteStore::new(db));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Notes server listening on http://{}", config.bind_addr());

    axum::serve(listener, app).await?;
    Ok(())
}

/// Run one client command and print the resulting board.
/// Returns false if any request failed.
async fn run_client(config: ClientConfig, command: ClientCommand) -> bool {
    let mut app = NotesApp::new(NotesClient::new(config.url));
    let mut ok = app.refresh().await;

    match command {
        ClientCommand::List { page } => {
            app.board_mut().go_to_page(page);
        }
        ClientCommand::Create {
            title,
            tagline,
            body,
        } => {
            let board = app.board_mut();
            board.open_create();
            board.edit_draft(DraftField::Title, title);
            board.edit_draft(DraftField::Tagline, tagline);
            board.edit_draft(DraftField::Body, body);
            ok &= app.submit_dialog().await;
        }
        ClientCommand::Edit {
            id,
            title,
            tagline,
            body,
        } => {
            let patch = NotePatch {
                title,
                tagline,
                body,
            };
            ok &= app.edit_note(&id, patch).await;
        }
        ClientCommand::Delete { id } => {
            ok &= app.delete_note(&id).await;
        }
        ClientCommand::Pin { id } => {
            ok &= app.toggle_pin(&id).await;
        }
    }

    let board = app.board();
    print!("{}", render_toasts(board.toasts()));
    if let Some(dialog) = render_dialog(board.dialog()) {
        println!("{}", dialog);
    }
    print!("{}", render_board(&board.view(), board.is_loading()));
    ok
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve(config)) => serve(config).await?,
        Some(Commands::Client(command)) => {
            if !run_client(cli.client, command).await {
                std::process::exit(1);
            }
        }
        None => {
            // Default: start server with settings from the environment
            let defaults = ServeDefaults::parse_from(["notes-keeper"]);
            serve(defaults.server).await?
        }
    }

    Ok(())
}

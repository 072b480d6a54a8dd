//! Tune Tracker CLI - Main entry point
//!
//! Command-line front-end for the Tune Tracker music catalog. Each entity
//! kind (artists, albums, songs) gets list / add / edit / remove
//! subcommands, all driven through the shared `EntityListController`.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tune_common::config;
use tune_common::model::{Album, Artist, FieldSelector, Song};
use tune_ui::controller::{
    AlwaysConfirm, ConfirmDelete, DeleteOutcome, EntityListController, LoadStatus, SubmitOutcome,
};
use tune_ui::form::{AlbumDraft, ArtistDraft, Editable, SongDraft};
use tune_ui::store::RestStore;

/// Command-line arguments for tune-ui
#[derive(Parser, Debug)]
#[command(name = "tune-ui")]
#[command(about = "Command-line front-end for the Tune Tracker music catalog")]
#[command(version)]
struct Args {
    /// Base URL of the catalog API (falls back to TUNE_TRACKER_API_URL,
    /// then the config file, then http://localhost:8080)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse and edit artists
    Artists {
        #[command(subcommand)]
        action: ArtistAction,
    },
    /// Browse and edit albums
    Albums {
        #[command(subcommand)]
        action: AlbumAction,
    },
    /// Browse and edit songs
    Songs {
        #[command(subcommand)]
        action: SongAction,
    },
}

#[derive(Subcommand, Debug)]
enum ArtistAction {
    /// List artists, optionally filtered by one field
    List {
        /// Field to filter by: artist, debut-year, genre, country
        #[arg(long)]
        by: Option<String>,
        /// Substring to search for (case-insensitive)
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Add a new artist
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        debut_year: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        country: String,
    },
    /// Edit an existing artist; omitted flags keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        debut_year: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Delete an artist
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum AlbumAction {
    /// List albums, optionally filtered by one field
    List {
        /// Field to filter by: title, artist, release-year, genre
        #[arg(long)]
        by: Option<String>,
        /// Substring to search for (case-insensitive)
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Add a new album
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: String,
        #[arg(long)]
        release_year: String,
        #[arg(long)]
        artist_id: String,
        /// Comma-separated song ids, e.g. "4,8,15"
        #[arg(long)]
        song_ids: String,
    },
    /// Edit an existing album; omitted flags keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        release_year: Option<String>,
        #[arg(long)]
        artist_id: Option<String>,
        /// Comma-separated song ids, replacing the whole tracklist
        #[arg(long)]
        song_ids: Option<String>,
    },
    /// Delete an album
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SongAction {
    /// List songs, optionally filtered by one field
    List {
        /// Field to filter by: title, release-year, genre, artist
        #[arg(long)]
        by: Option<String>,
        /// Substring to search for (case-insensitive)
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Add a new song
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: String,
        /// Duration in seconds
        #[arg(long)]
        duration: String,
        #[arg(long)]
        release_year: String,
        #[arg(long)]
        artist_id: String,
    },
    /// Edit an existing song; omitted flags keep their current value
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        release_year: Option<String>,
        #[arg(long)]
        artist_id: Option<String>,
    },
    /// Delete a song
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tune_ui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let base_url = config::resolve_api_url(args.api_url.as_deref());
    info!("Using catalog API at {}", base_url);

    let store = Arc::new(RestStore::new(&base_url).context("Failed to build API client")?);

    match args.command {
        Command::Artists { action } => run_artists(store, action).await,
        Command::Albums { action } => run_albums(store, action).await,
        Command::Songs { action } => run_songs(store, action).await,
    }
}

async fn run_artists(store: Arc<RestStore>, action: ArtistAction) -> Result<()> {
    let mut controller = EntityListController::<Artist, _>::new(store);

    match action {
        ArtistAction::List { by, query } => show_list(&mut controller, by, query).await,
        ArtistAction::Add {
            name,
            debut_year,
            genre,
            country,
        } => {
            *controller.draft_mut() = ArtistDraft {
                id: None,
                name,
                debut_year,
                genre,
                country,
            };
            submit_draft(&mut controller).await
        }
        ArtistAction::Edit {
            id,
            name,
            debut_year,
            genre,
            country,
        } => {
            begin_edit_by_id(&mut controller, id).await?;
            let draft = controller.draft_mut();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = debut_year {
                draft.debut_year = v;
            }
            if let Some(v) = genre {
                draft.genre = v;
            }
            if let Some(v) = country {
                draft.country = v;
            }
            submit_draft(&mut controller).await
        }
        ArtistAction::Remove { id, yes } => remove_entity(&mut controller, id, yes).await,
    }
}

async fn run_albums(store: Arc<RestStore>, action: AlbumAction) -> Result<()> {
    let mut controller = EntityListController::<Album, _>::new(store);

    match action {
        AlbumAction::List { by, query } => show_list(&mut controller, by, query).await,
        AlbumAction::Add {
            title,
            genre,
            release_year,
            artist_id,
            song_ids,
        } => {
            *controller.draft_mut() = AlbumDraft {
                id: None,
                title,
                genre,
                release_year,
                artist_id,
                song_ids,
            };
            submit_draft(&mut controller).await
        }
        AlbumAction::Edit {
            id,
            title,
            genre,
            release_year,
            artist_id,
            song_ids,
        } => {
            begin_edit_by_id(&mut controller, id).await?;
            let draft = controller.draft_mut();
            if let Some(v) = title {
                draft.title = v;
            }
            if let Some(v) = genre {
                draft.genre = v;
            }
            if let Some(v) = release_year {
                draft.release_year = v;
            }
            if let Some(v) = artist_id {
                draft.artist_id = v;
            }
            if let Some(v) = song_ids {
                draft.song_ids = v;
            }
            submit_draft(&mut controller).await
        }
        AlbumAction::Remove { id, yes } => remove_entity(&mut controller, id, yes).await,
    }
}

async fn run_songs(store: Arc<RestStore>, action: SongAction) -> Result<()> {
    let mut controller = EntityListController::<Song, _>::new(store);

    match action {
        SongAction::List { by, query } => show_list(&mut controller, by, query).await,
        SongAction::Add {
            title,
            genre,
            duration,
            release_year,
            artist_id,
        } => {
            *controller.draft_mut() = SongDraft {
                id: None,
                title,
                genre,
                duration,
                release_year,
                artist_id,
            };
            submit_draft(&mut controller).await
        }
        SongAction::Edit {
            id,
            title,
            genre,
            duration,
            release_year,
            artist_id,
        } => {
            begin_edit_by_id(&mut controller, id).await?;
            let draft = controller.draft_mut();
            if let Some(v) = title {
                draft.title = v;
            }
            if let Some(v) = genre {
                draft.genre = v;
            }
            if let Some(v) = duration {
                draft.duration = v;
            }
            if let Some(v) = release_year {
                draft.release_year = v;
            }
            if let Some(v) = artist_id {
                draft.artist_id = v;
            }
            submit_draft(&mut controller).await
        }
        SongAction::Remove { id, yes } => remove_entity(&mut controller, id, yes).await,
    }
}

/// Load the list, apply the filter, and print the visible entities
async fn show_list<E: Editable>(
    controller: &mut EntityListController<E, RestStore>,
    by: Option<String>,
    query: String,
) -> Result<()> {
    controller.activate().await;
    if let LoadStatus::Failed(msg) = controller.load_status() {
        bail!("{msg}");
    }

    let field = match by {
        Some(name) => Some(E::Field::parse(&name).ok_or_else(|| {
            let known: Vec<&str> = E::Field::all().iter().map(|f| f.label()).collect();
            anyhow!("Unknown field '{}'; expected one of: {}", name, known.join(", "))
        })?),
        None => None,
    };
    controller.set_filter(field, query);

    let visible = controller.visible();
    if visible.is_empty() {
        println!("No {}s found.", E::KIND.label());
        return Ok(());
    }
    for entity in visible {
        println!("{entity}\n");
    }
    Ok(())
}

/// Load the list and copy the entity with the given id into the draft
async fn begin_edit_by_id<E: Editable>(
    controller: &mut EntityListController<E, RestStore>,
    id: i64,
) -> Result<()> {
    controller.activate().await;
    if let LoadStatus::Failed(msg) = controller.load_status() {
        bail!("{msg}");
    }

    let entity = controller
        .items()
        .iter()
        .find(|e| e.id() == Some(id))
        .cloned()
        .ok_or_else(|| anyhow!("No {} with id {}", E::KIND.label(), id))?;

    controller.begin_edit(&entity);
    Ok(())
}

async fn submit_draft<E: Editable>(
    controller: &mut EntityListController<E, RestStore>,
) -> Result<()> {
    match controller.submit().await {
        SubmitOutcome::Saved => {
            println!("Saved {}.", E::KIND.label());
            Ok(())
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed => {
            bail!(
                "{}",
                controller
                    .notice()
                    .unwrap_or("The operation did not take effect")
            );
        }
    }
}

async fn remove_entity<E: Editable>(
    controller: &mut EntityListController<E, RestStore>,
    id: i64,
    yes: bool,
) -> Result<()> {
    let outcome = if yes {
        controller.request_delete(id, &AlwaysConfirm).await
    } else {
        controller.request_delete(id, &StdinConfirm).await
    };

    match outcome {
        DeleteOutcome::Deleted => {
            println!("Deleted {} {}.", E::KIND.label(), id);
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Cancelled.");
            Ok(())
        }
        DeleteOutcome::Failed => {
            bail!(
                "{}",
                controller
                    .notice()
                    .unwrap_or("The operation did not take effect")
            );
        }
    }
}

/// Interactive confirmation on stdin
struct StdinConfirm;

impl ConfirmDelete for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

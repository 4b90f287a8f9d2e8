use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use admin_core::{
    api::ApiClient,
    cache::CollectionCache,
    coordinator::{Notification, Severity},
    schedule,
    validate::FieldError,
    views::{drive, ProgrammeListView, SpeakerListView},
};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use shared::domain::{ProgrammeId, SpeakerId};

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "admin_cli", about = "Festival programme and speaker administration")]
struct Args {
    /// Overrides admin.toml and FESTADMIN_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage scheduled programmes.
    Programmes {
        #[command(subcommand)]
        command: ProgrammeCommand,
    },
    /// Manage speakers.
    Speakers {
        #[command(subcommand)]
        command: SpeakerCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ProgrammeCommand {
    List {
        /// Client-side filter against id and name.
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 1)]
        day_number: u32,
        /// Calendar date, YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,
        /// Local start time of day, HH:MM.
        #[arg(long)]
        start: String,
        /// Local end time of day, HH:MM.
        #[arg(long)]
        end: String,
        #[arg(long)]
        venue: String,
    },
    /// Full replace; omitted flags keep the stored values.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        day_number: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        venue: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SpeakerCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        bio: String,
        /// Programme id; repeat the flag for several.
        #[arg(long = "programme")]
        programmes: Vec<String>,
        /// Image file to upload before submission.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value_t = 0)]
        priority: i32,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long = "programme")]
        programmes: Vec<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long)]
        priority: Option<i32>,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Upload an image by itself and print the hosted URL.
    UploadImage { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    let api = ApiClient::new(settings.server_url);

    match args.command {
        Command::Programmes { command } => run_programme_command(&api, command).await,
        Command::Speakers { command } => run_speaker_command(&api, command).await,
    }
}

async fn run_programme_command(api: &ApiClient, command: ProgrammeCommand) -> Result<()> {
    let client = api.programmes();
    let cache = CollectionCache::new();
    let mut view = ProgrammeListView::new();

    match command {
        ProgrammeCommand::List { search } => {
            let all = drive::load_programmes(&client, &cache).await?;
            if let Some(term) = search {
                view.set_search(term);
            }
            for p in view.filter(&all) {
                println!(
                    "{}  {}  {}-{}  {}  {}",
                    p.id,
                    p.date.format("%d-%m-%Y"),
                    schedule::time_of_day(p.start_datetime, &Local),
                    schedule::time_of_day(p.end_datetime, &Local),
                    p.name,
                    p.venue,
                );
            }
        }
        ProgrammeCommand::Create {
            name,
            day_number,
            date,
            start,
            end,
            venue,
        } => {
            view.open_create();
            let draft = view.draft_mut();
            draft.name = name;
            draft.day_number = day_number;
            draft.date = date;
            draft.start_time = start;
            draft.end_time = end;
            draft.venue = venue;

            let issued = drive::create_programme(&mut view, &client, &cache, &Local).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
        ProgrammeCommand::Update {
            id,
            name,
            day_number,
            date,
            start,
            end,
            venue,
        } => {
            let existing = client.get(&ProgrammeId::new(id)).await?;
            view.open_edit(&existing, &Local);
            let draft = view.draft_mut();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = day_number {
                draft.day_number = v;
            }
            if let Some(v) = date {
                draft.date = v;
            }
            if let Some(v) = start {
                draft.start_time = v;
            }
            if let Some(v) = end {
                draft.end_time = v;
            }
            if let Some(v) = venue {
                draft.venue = v;
            }

            let issued = drive::update_programme(&mut view, &client, &cache, &Local).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
        ProgrammeCommand::Delete { id, yes } => {
            let existing = client.get(&ProgrammeId::new(id)).await?;
            if !yes && !confirm(&format!("Delete programme \"{}\"?", existing.name))? {
                println!("Aborted.");
                return Ok(());
            }
            view.request_delete(&existing);
            let issued = drive::delete_programme(&mut view, &client, &cache).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
    }
    Ok(())
}

async fn run_speaker_command(api: &ApiClient, command: SpeakerCommand) -> Result<()> {
    let client = api.speakers();
    let cache = CollectionCache::new();
    let mut view = SpeakerListView::new();

    match command {
        SpeakerCommand::List { search } => {
            let all = drive::load_speakers(&client, &cache).await?;
            if let Some(term) = search {
                view.set_search(term);
            }
            for s in view.filter(&all) {
                let programmes = s
                    .programmes
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  [{}]  {}  ({})", s.id, s.priority, s.name, programmes);
            }
        }
        SpeakerCommand::Create {
            name,
            bio,
            programmes,
            image,
            priority,
        } => {
            view.open_create();
            if let Some(path) = image {
                let url = upload(api, &path).await?;
                view.set_image_url(url);
            }
            let draft = view.draft_mut();
            draft.name = name;
            draft.bio = bio;
            draft.programmes = programmes.into_iter().map(ProgrammeId::new).collect();
            draft.priority = priority;

            let issued = drive::create_speaker(&mut view, &client, &cache).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
        SpeakerCommand::Update {
            id,
            name,
            bio,
            programmes,
            image,
            priority,
        } => {
            let existing = client.get(&SpeakerId::new(id)).await?;
            view.open_edit(&existing);
            if let Some(path) = image {
                let url = upload(api, &path).await?;
                view.set_image_url(url);
            }
            let draft = view.draft_mut();
            if let Some(v) = name {
                draft.name = v;
            }
            if let Some(v) = bio {
                draft.bio = v;
            }
            if !programmes.is_empty() {
                draft.programmes = programmes.into_iter().map(ProgrammeId::new).collect();
            }
            if let Some(v) = priority {
                draft.priority = v;
            }

            let issued = drive::update_speaker(&mut view, &client, &cache).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
        SpeakerCommand::Delete { id, yes } => {
            let existing = client.get(&SpeakerId::new(id)).await?;
            if !yes && !confirm(&format!("Delete speaker \"{}\"?", existing.name))? {
                println!("Aborted.");
                return Ok(());
            }
            view.request_delete(&existing);
            let issued = drive::delete_speaker(&mut view, &client, &cache).await;
            let notifications = view.take_notifications();
            finish(issued, view.field_errors(), notifications)?;
        }
        SpeakerCommand::UploadImage { path } => {
            let url = upload(api, &path).await?;
            println!("{url}");
        }
    }
    Ok(())
}

async fn upload(api: &ApiClient, path: &PathBuf) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let uploaded = api.upload_image(&filename, bytes).await?;
    Ok(uploaded.url)
}

/// Prints validation or notification output and converts failures into a
/// nonzero exit.
fn finish(issued: bool, field_errors: &[FieldError], notifications: Vec<Notification>) -> Result<()> {
    if !issued {
        for err in field_errors {
            eprintln!("{}: {}", err.field, err.message);
        }
        bail!("submission blocked by validation");
    }
    let mut failed = false;
    for n in notifications {
        match n.severity {
            Severity::Success => println!("{} {}", n.title, n.message),
            Severity::Error => {
                failed = true;
                eprintln!("{} {}", n.title, n.message);
            }
        }
    }
    if failed {
        bail!("request failed; nothing was changed locally");
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

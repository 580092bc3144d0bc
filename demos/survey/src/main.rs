//! # formsmith Survey Example
//!
//! A working survey demonstrating the formsmith pipeline:
//!
//! - **Designer**: drag events building a canvas of field instances
//! - **Properties**: patching labels and required flags
//! - **Persistence**: create, save, and publish a form
//! - **Collection**: the public share link, visits, and submissions
//! - **Stats**: the owner dashboard numbers
//!
//! ## Running
//!
//! ```bash
//! cargo run --package survey-demo
//! ```
//!
//! Pass `--serve` to run the HTTP API instead of the walkthrough, and
//! `--settings survey.toml` to load settings from a file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use formsmith::actions;
use formsmith::auth::provider::ActorProvider;
use formsmith::auth::SignedTokenProvider;
use formsmith::core::logging::setup_logging;
use formsmith::core::settings::{DatabaseSettings, Settings};
use formsmith::designer::{
    drag_end, DesignerState, DragEndEvent, DragSource, DropTarget, RandomIds,
};
use formsmith::fields::element::{ElementType, FormElementInstance};
use formsmith::fields::render::render_form_page;
use formsmith::fields::{apply_properties, PropertiesPatch};
use formsmith::http::{share_link, App};
use formsmith::store::{NewForm, SqliteStore};

#[derive(Parser)]
#[command(name = "survey", about = "A survey built on formsmith")]
struct Args {
    /// Settings TOML file to load
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Serve the HTTP API instead of running the walkthrough
    #[arg(long)]
    serve: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::from_toml_file(path)?,
        None => demo_settings(),
    };
    setup_logging(&settings);
    if let Some(path) = &args.settings {
        tracing::info!("Loaded settings from {}", path.display());
    }

    if args.serve {
        let store = Arc::new(SqliteStore::open(&settings.database.path)?);
        let addr = settings.bind_addr.clone();
        tracing::info!("Serving the survey API on {addr}");
        App::new(settings).store(store).run(&addr).await?;
        return Ok(());
    }

    let elements = demonstrate_designer()?;
    demonstrate_collection(&settings, elements).await?;

    tracing::info!("Survey example complete!");
    Ok(())
}

/// Programmatic settings for the walkthrough: in-memory database, fixed
/// demo secret.
fn demo_settings() -> Settings {
    Settings {
        secret_key: "survey-demo-secret".to_string(),
        database: DatabaseSettings {
            path: ":memory:".to_string(),
        },
        ..Settings::default()
    }
}

/// Builds the survey layout through designer drag events.
fn demonstrate_designer() -> anyhow::Result<Vec<FormElementInstance>> {
    tracing::info!("--- Designer ---");

    let mut state = DesignerState::new();
    let mut ids = RandomIds;

    // Title, then a separator, then the two questions.
    for element_type in [
        ElementType::TitleField,
        ElementType::SeparatorField,
        ElementType::TextField,
        ElementType::TextareaField,
    ] {
        let outcome = drag_end(
            &mut state,
            DragEndEvent::new(
                DragSource::PaletteButton { element_type },
                DropTarget::Canvas,
            ),
            &mut ids,
        )?;
        tracing::info!("  dropped {element_type} -> {outcome:?}");
    }

    // Slot a date question in front of the textarea.
    let textarea_id = state.elements()[3].id.clone();
    let outcome = drag_end(
        &mut state,
        DragEndEvent::new(
            DragSource::PaletteButton {
                element_type: ElementType::DateField,
            },
            DropTarget::TopHalf {
                element_id: textarea_id,
            },
        ),
        &mut ids,
    )?;
    tracing::info!("  dropped DateField -> {outcome:?}");

    // Second thoughts: move the date question to the end.
    let date_id = state.elements()[3].id.clone();
    let outcome = drag_end(
        &mut state,
        DragEndEvent::new(
            DragSource::CanvasElement {
                element_id: date_id,
            },
            DropTarget::Canvas,
        ),
        &mut ids,
    )?;
    tracing::info!("  moved DateField -> {outcome:?}");

    // Name the title and make the text question required.
    let title_id = state.elements()[0].id.clone();
    let mut title = state.elements()[0].clone();
    apply_properties(
        &mut title,
        PropertiesPatch::Title {
            title: "Reader survey".to_string(),
        },
    )?;
    state.update_element(&title_id, title)?;

    let name_id = state.elements()[2].id.clone();
    let mut name = state.elements()[2].clone();
    apply_properties(
        &mut name,
        PropertiesPatch::Input {
            label: "Your name".to_string(),
            helper_text: "First name is fine".to_string(),
            required: true,
            placeholder: "Jane".to_string(),
        },
    )?;
    state.update_element(&name_id, name)?;

    tracing::info!("  canvas holds {} elements", state.len());
    Ok(state.into_elements())
}

/// Saves, publishes, and collects submissions against the survey.
async fn demonstrate_collection(
    settings: &Settings,
    elements: Vec<FormElementInstance>,
) -> anyhow::Result<()> {
    tracing::info!("--- Collection ---");

    let store = SqliteStore::memory()?;
    let provider = SignedTokenProvider::new(settings.secret_key.clone());
    let token = provider.issue("demo-owner");
    let actor = provider.resolve(&token).await?;

    let form_id = actions::create_form(
        &store,
        &actor,
        &NewForm::new("Reader survey", "What our readers think"),
    )
    .await?;
    actions::update_form_content(&store, &actor, form_id, &elements).await?;
    let form = actions::publish_form(&store, &actor, form_id).await?;
    tracing::info!("  share link: {}", share_link(settings, &form));

    // Render the fill-in view once.
    let canvas = actions::get_form_content_by_url(&store, &form.share_url).await?;
    let html = render_form_page(&canvas);
    tracing::info!("  rendered fill-in view ({} bytes)", html.len());

    // A second visitor looks but does not answer.
    actions::get_form_content_by_url(&store, &form.share_url).await?;

    // Two readers answer.
    let name_id = &elements[2].id;
    let date_id = &elements[4].id;
    for (name, day) in [("Ada", "2026-07-01"), ("Grace", "2026-07-02")] {
        let mut values = HashMap::new();
        values.insert(name_id.clone(), name.to_string());
        values.insert(date_id.clone(), day.to_string());
        actions::submit_form(&store, &form.share_url, &values).await?;
    }

    let stats = actions::get_form_stats(&store, &actor).await?;
    tracing::info!(
        "  visits={} submissions={} submission_rate={}% bounce_rate={}%",
        stats.visits,
        stats.submissions,
        stats.submission_rate,
        stats.bounce_rate
    );

    let (form, submissions) = actions::get_form_with_submissions(&store, &actor, form_id).await?;
    let table = actions::submission_table(&form, &submissions)?;
    tracing::info!(
        "  submissions table: {} columns, {} rows",
        table.columns.len(),
        table.rows.len()
    );
    for row in &table.rows {
        let answers: Vec<String> = table
            .columns
            .iter()
            .map(|column| {
                let value = row.values.get(&column.id).map_or("-", String::as_str);
                format!("{}={value}", column.label)
            })
            .collect();
        tracing::info!("    {} ({})", answers.join(" "), row.submitted_at);
    }

    Ok(())
}

//! Rotomdex CLI: drives the catalog engine and renders derived views and
//! detail cards as text. All state flows through the engine and store
//! contracts; nothing here touches canonical state directly.

mod display;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::warn;

use rotomdex_api::{ApiClient, DEFAULT_BASE_URL};
use rotomdex_core::{Category, FilterState, GenerationSelection, SearchMode, SortState};
use rotomdex_engine::{CatalogPhase, Engine};
use rotomdex_store::AnnotationStore;

#[derive(Parser)]
#[command(name = "rotomdex", version, about = "Client-side Pokédex catalog browser")]
struct Cli {
    /// Base URL of the catalog API.
    #[arg(long, env = "ROTOMDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Annotation file location (defaults to the platform data dir).
    #[arg(long, env = "ROTOMDEX_STORE")]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the catalog and print the derived view.
    List(ListArgs),
    /// Show the full detail card for one entry.
    Show(ShowArgs),
    /// Mark or unmark an entry as seen.
    Seen {
        id: u32,
        #[arg(long)]
        remove: bool,
    },
    /// Mark or unmark an entry as caught (catching implies seen).
    Caught {
        id: u32,
        #[arg(long)]
        remove: bool,
    },
    /// Per-generation annotation tallies.
    Status,
}

#[derive(Args)]
struct ListArgs {
    /// Name substring to search for.
    #[arg(long, conflicts_with = "number")]
    search: Option<String>,

    /// Exact id or inclusive low-high range (e.g. "10-12").
    #[arg(long)]
    number: Option<String>,

    /// Category tag; repeat to combine by union.
    #[arg(long, value_enum)]
    category: Vec<CategoryArg>,

    /// 1-based generation number; repeat to combine by union.
    #[arg(long = "gen")]
    generations: Vec<usize>,

    #[arg(long, value_enum, default_value_t = CaughtArg::Any)]
    caught: CaughtArg,

    #[arg(long, value_enum, default_value_t = SortArg::Number)]
    sort: SortArg,

    /// Stop after the eager first page instead of draining the catalog.
    #[arg(long)]
    first_page_only: bool,
}

#[derive(Args)]
struct ShowArgs {
    id: u32,

    /// How many of the entry's moves to enrich with full move records.
    #[arg(long, default_value_t = 8)]
    moves: usize,

    #[arg(long)]
    encounters: bool,

    #[arg(long)]
    evolution: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Legendary,
    Mythical,
    Pseudolegendary,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Legendary => Category::Legendary,
            CategoryArg::Mythical => Category::Mythical,
            CategoryArg::Pseudolegendary => Category::Pseudolegendary,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CaughtArg {
    Any,
    Caught,
    NotCaught,
}

impl From<CaughtArg> for rotomdex_core::CaughtFilter {
    fn from(arg: CaughtArg) -> Self {
        match arg {
            CaughtArg::Any => Self::Any,
            CaughtArg::Caught => Self::CaughtOnly,
            CaughtArg::NotCaught => Self::NotCaughtOnly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Number,
    NameAsc,
    NameDesc,
}

impl From<SortArg> for SortState {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Number => Self::NumberAscending,
            SortArg::NameAsc => Self::NameAscending,
            SortArg::NameDesc => Self::NameDescending,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store_path = cli
        .store_path
        .clone()
        .unwrap_or_else(AnnotationStore::default_path);
    let store = AnnotationStore::open(store_path);
    let engine = Engine::with_client(ApiClient::new(cli.base_url.clone()), store);

    match cli.command {
        Command::List(args) => run_list(&engine, args).await?,
        Command::Show(args) => run_show(&engine, args).await?,
        Command::Seen { id, remove } => {
            engine.set_seen(id, !remove);
            println!("#{id} seen: {}", engine.is_seen(id));
        }
        Command::Caught { id, remove } => {
            engine.set_caught(id, !remove);
            println!("#{id} caught: {}", engine.is_caught(id));
        }
        Command::Status => display::print_tallies(&engine.annotation_tallies()),
    }
    Ok(())
}

async fn run_list(engine: &Engine, args: ListArgs) -> anyhow::Result<()> {
    if args.first_page_only {
        engine.load_first().await?;
    } else {
        engine.load_all().await?;
    }
    if let CatalogPhase::Partial { last_error } = engine.phase() {
        warn!(error = %last_error, "catalog is partial, showing what arrived");
    }

    let mut filter = FilterState::default();
    filter.categories = args.category.iter().map(|&c| c.into()).collect();
    if !args.generations.is_empty() {
        filter.generations = GenerationSelection::Only(BTreeSet::from_iter(args.generations));
    }
    filter.caught = args.caught.into();
    engine.set_filter(filter);
    engine.set_sort(args.sort.into());

    if let Some(query) = args.number {
        engine.set_search_mode(SearchMode::Number);
        engine.search_input(query);
    } else if let Some(query) = args.search {
        engine.search_input(query);
    }

    let view = engine.view();
    display::print_view(&view, |id| (engine.is_seen(id), engine.is_caught(id)));
    Ok(())
}

async fn run_show(engine: &Engine, args: ShowArgs) -> anyhow::Result<()> {
    let record = match engine.entity(args.id).await {
        Ok(record) => record,
        // Detail failures are non-fatal: report and leave the session usable.
        Err(err) => {
            eprintln!("could not load details for #{}: {err}", args.id);
            return Ok(());
        }
    };

    let mut moves = Vec::new();
    for move_ref in record.moves.iter().take(args.moves) {
        moves.push((move_ref.name.clone(), engine.move_record(&move_ref.url).await));
    }

    let encounters = if args.encounters {
        match engine.encounters(args.id).await {
            Ok(list) => Some(list),
            Err(err) => {
                warn!(error = %err, "encounter lookup failed");
                None
            }
        }
    } else {
        None
    };

    let evolution = if args.evolution {
        match engine.evolution_chain(args.id).await {
            Ok(chain) => Some(chain),
            Err(err) => {
                warn!(error = %err, "evolution lookup failed");
                None
            }
        }
    } else {
        None
    };

    display::print_entity_card(
        &record,
        &moves,
        encounters.as_deref().map(Vec::as_slice),
        evolution.as_deref().map(Vec::as_slice),
    );
    Ok(())
}

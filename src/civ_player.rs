// src/civ_player.rs
// Command-line player client: performs one action in a game and shows the
// refreshed game afterwards.
//
// Examples:
//   civ-player --gameid 55b1 draw Huts
//   civ-player --gameid 55b1 reveal --name Sword --owner p1 --sheet Weapons
//   civ-player --gameid 55b1 choose-tech Pottery

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use civ_player::config::PlayerConfig;
use civ_player::game_state::{GameStateStore, HttpGameStore};
use civ_player::gateway::{ActionOutcome, PlayerGateway};
use civ_player::item::{Item, ItemSelection};
use civ_player::logging::{log_info, set_verbose};
use civ_player::notifier::TerminalNotifier;
use civ_player::session::Profile;
use civ_player::tech::SelectedTech;
use civ_player::transport::{ReqwestTransport, Transport};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Civilization player client - act on a play-by-forum game")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Game (pbf) to act on
    #[arg(long)]
    gameid: String,

    /// Configuration file (defaults to conf/player.conf)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print debug and info logging
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Reveal one of your items to the other players
    Reveal(ItemArgs),
    /// Draw an item from a sheet
    Draw {
        /// Sheet to draw from, e.g. Huts or Villages
        sheet: String,
    },
    /// Put one of your items back
    Discard(ItemArgs),
    /// End your turn
    Endturn,
    /// Research a tech
    ChooseTech {
        name: String,
    },
    /// Show the techs you have chosen
    Techs,
}

#[derive(clap::Args)]
struct ItemArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    owner: String,
    #[arg(long)]
    sheet: String,
}

impl ItemArgs {
    fn selection(&self) -> ItemSelection {
        Item::new(&self.name, &self.owner, &self.sheet).into()
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    set_verbose(args.verbose);

    match run(args).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

// Ok(false) when the action was refused; the player has already been told why
async fn run(args: Args) -> Result<bool, Box<dyn Error>> {
    let config = PlayerConfig::load_or_default(args.config.as_deref());
    let base_url = config.base_url();
    log_info(&format!("Using server {base_url} as player '{}'", config.username));

    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.timeout)?);
    let store = Arc::new(HttpGameStore::new(&base_url, Arc::clone(&transport)));
    let gateway = PlayerGateway::new(
        &base_url,
        transport,
        Arc::new(TerminalNotifier),
        Arc::clone(&store) as Arc<dyn GameStateStore>,
        Arc::new(Profile::from_config(&config)),
    );

    let game_id = args.gameid.as_str();
    let outcome = match &args.action {
        Action::Reveal(item) => gateway.reveal_item(game_id, item.selection()).await,
        Action::Draw { sheet } => gateway.draw_item(game_id, sheet).await,
        Action::Discard(item) => gateway.discard_item(game_id, item.selection()).await,
        Action::Endturn => gateway.end_turn(game_id).await,
        Action::ChooseTech { name } => gateway.select_tech(game_id, &SelectedTech::named(name)).await,
        Action::Techs => {
            let techs = match gateway.get_chosen_techs(game_id).await {
                Ok(techs) => techs,
                Err(_) => return Ok(false),
            };
            println!("🔬 Chosen techs:");
            println!("{}", serde_json::to_string_pretty(&techs)?);
            return Ok(true);
        }
    };

    match outcome {
        ActionOutcome::Completed(_) => {
            store.wait_for_refreshes().await;
            match store.summary(game_id) {
                Some(summary) => println!("🎮 {summary}"),
                None => println!("🎮 Game {game_id} (state unavailable)"),
            }
            Ok(true)
        }
        ActionOutcome::Failed(_) => Ok(false),
    }
}

//! # Home Inventory CLI (`hinv`)
//!
//! The `hinv` binary manages a home inventory through its REST API:
//! addresses, rooms, storage locations, items, and item photos, plus a
//! global search across items, rooms, and storage locations.
//!
//! ## Usage
//!
//! ```bash
//! hinv --config ./config/hinv.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hinv status` | Check every collection endpoint answers |
//! | `hinv search <query>` | Search items, rooms, and storage locations |
//! | `hinv shell` | Interactive search with recent-search history |
//! | `hinv address ...` | Address CRUD |
//! | `hinv room ...` | Room CRUD and batch creation |
//! | `hinv location ...` | Storage-location CRUD and batch creation |
//! | `hinv item ...` | Item CRUD and keyword search |
//! | `hinv photo ...` | List, upload, and delete item photos |
//!
//! ## Examples
//!
//! ```bash
//! # Point at a server without a config file
//! hinv --api-url http://192.168.1.20:8080/api status
//!
//! # Where is the drill?
//! hinv search drill
//!
//! # Create rooms from a file, one name per line
//! hinv room add-batch --address 1 --file rooms.txt
//!
//! # Storage locations as `name|type` lines on stdin
//! printf 'Shelf A|Shelf\nBin 3|Box\n' | hinv location add-batch --room 4
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use home_inventory::item_cmd::ItemFields;
use home_inventory::location_cmd::LocationFields;
use home_inventory::{
    address_cmd, config, item_cmd, location_cmd, logging, photo_cmd, room_cmd, search, status,
};
use home_inventory_core::models::EntityId;

/// Home Inventory CLI: manage and search a home inventory server.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/hinv.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "hinv",
    about = "Home Inventory: manage and search a home inventory server",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/hinv.toml`. Built-in defaults are used when the
    /// file does not exist.
    #[arg(long, global = true, default_value = "./config/hinv.toml")]
    config: PathBuf,

    /// Override `[api].base_url`, e.g. `http://localhost:8080/api`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log at debug level (ignored when `RUST_LOG` is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Check that the inventory API answers for every collection.
    Status,

    /// Search items, rooms, and storage locations by name or description.
    ///
    /// Matching is a case-insensitive substring match. Results list items
    /// first, then rooms, then storage locations.
    Search {
        /// The search query string.
        query: String,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive search. One query per line; `:recent` lists recent
    /// searches, `:quit` exits.
    Shell,

    /// Manage addresses.
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },

    /// Manage rooms.
    Room {
        #[command(subcommand)]
        action: RoomAction,
    },

    /// Manage storage locations.
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },

    /// Manage items.
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },

    /// Manage item photos.
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List all addresses.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show an address and its rooms.
    Get {
        id: EntityId,
        #[arg(long)]
        json: bool,
    },
    /// Create an address.
    Add {
        name: String,
        /// Street address line.
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Update an address. Unset fields keep their current value.
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete an address.
    Rm {
        id: EntityId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RoomAction {
    /// List rooms, optionally only those at one address.
    List {
        #[arg(long)]
        address: Option<EntityId>,
        #[arg(long)]
        json: bool,
    },
    /// Show a room and its storage locations.
    Get {
        id: EntityId,
        #[arg(long)]
        json: bool,
    },
    /// Create a room.
    Add {
        name: String,
        #[arg(long)]
        address: EntityId,
        /// Floor plan data (opaque string).
        #[arg(long)]
        floor_plan: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Create several rooms, one name per line.
    ///
    /// Reads from `--file`, or stdin when no file is given. Blank lines are
    /// skipped.
    AddBatch {
        #[arg(long)]
        address: EntityId,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Update a room. Unset fields keep their current value.
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<EntityId>,
        #[arg(long)]
        floor_plan: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Delete a room.
    Rm {
        id: EntityId,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LocationAction {
    /// List storage locations, optionally only those in one room.
    List {
        #[arg(long)]
        room: Option<EntityId>,
        #[arg(long)]
        json: bool,
    },
    /// Show a storage location and its items.
    Get {
        id: EntityId,
        #[arg(long)]
        json: bool,
    },
    /// Create a storage location.
    Add {
        name: String,
        #[arg(long)]
        room: EntityId,
        /// Free-text type, e.g. `Drawer` or `Shelf`.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Floor-plan X coordinate.
        #[arg(long)]
        position_x: Option<f64>,
        /// Floor-plan Y coordinate.
        #[arg(long)]
        position_y: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Create several storage locations from `name|type` lines.
    AddBatch {
        #[arg(long)]
        room: EntityId,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Update a storage location. Unset fields keep their current value.
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        room: Option<EntityId>,
        #[arg(long)]
        position_x: Option<f64>,
        #[arg(long)]
        position_y: Option<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Delete a storage location.
    Rm {
        id: EntityId,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ItemAction {
    /// List items, optionally only those in one storage location.
    List {
        #[arg(long)]
        location: Option<EntityId>,
        #[arg(long)]
        json: bool,
    },
    /// Show an item and its photos.
    Get {
        id: EntityId,
        #[arg(long)]
        json: bool,
    },
    /// Keyword search over items on the server.
    Find {
        keyword: String,
        #[arg(long)]
        json: bool,
    },
    /// Create an item.
    Add {
        name: String,
        #[arg(long)]
        location: EntityId,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        category: Option<EntityId>,
        #[arg(long)]
        json: bool,
    },
    /// Update an item. Unset fields keep their current value.
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<EntityId>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        category: Option<EntityId>,
        #[arg(long)]
        json: bool,
    },
    /// Delete an item.
    Rm {
        id: EntityId,
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PhotoAction {
    /// List an item's photos with their URLs.
    List {
        item: EntityId,
        #[arg(long)]
        json: bool,
    },
    /// Upload a photo file for an item.
    Upload {
        item: EntityId,
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Delete a photo.
    Rm {
        id: EntityId,
        #[arg(long, short)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(url) = cli.api_url {
        cfg.api.base_url = url;
    }
    cfg.validate()?;
    logging::init(&cfg.logging.level, cli.verbose);

    match cli.command {
        Commands::Status => status::run_status(&cfg).await?,
        Commands::Search { query, json } => search::run_search(&cfg, &query, json).await?,
        Commands::Shell => search::run_shell(&cfg).await?,
        Commands::Address { action } => match action {
            AddressAction::List { json } => address_cmd::run_list(&cfg, json).await?,
            AddressAction::Get { id, json } => address_cmd::run_get(&cfg, id, json).await?,
            AddressAction::Add { name, street, json } => {
                address_cmd::run_add(&cfg, name, street, json).await?
            }
            AddressAction::Update {
                id,
                name,
                street,
                json,
            } => address_cmd::run_update(&cfg, id, name, street, json).await?,
            AddressAction::Rm { id, yes } => address_cmd::run_remove(&cfg, id, yes).await?,
        },
        Commands::Room { action } => match action {
            RoomAction::List { address, json } => room_cmd::run_list(&cfg, address, json).await?,
            RoomAction::Get { id, json } => room_cmd::run_get(&cfg, id, json).await?,
            RoomAction::Add {
                name,
                address,
                floor_plan,
                json,
            } => room_cmd::run_add(&cfg, address, name, floor_plan, json).await?,
            RoomAction::AddBatch {
                address,
                file,
                json,
            } => room_cmd::run_add_batch(&cfg, address, file.as_deref(), json).await?,
            RoomAction::Update {
                id,
                name,
                address,
                floor_plan,
                json,
            } => room_cmd::run_update(&cfg, id, name, address, floor_plan, json).await?,
            RoomAction::Rm { id, yes } => room_cmd::run_remove(&cfg, id, yes).await?,
        },
        Commands::Location { action } => match action {
            LocationAction::List { room, json } => {
                location_cmd::run_list(&cfg, room, json).await?
            }
            LocationAction::Get { id, json } => location_cmd::run_get(&cfg, id, json).await?,
            LocationAction::Add {
                name,
                room,
                kind,
                position_x,
                position_y,
                json,
            } => {
                let fields = LocationFields {
                    name: Some(name),
                    kind,
                    room: Some(room),
                    position_x,
                    position_y,
                };
                location_cmd::run_add(&cfg, fields, json).await?
            }
            LocationAction::AddBatch { room, file, json } => {
                location_cmd::run_add_batch(&cfg, room, file.as_deref(), json).await?
            }
            LocationAction::Update {
                id,
                name,
                kind,
                room,
                position_x,
                position_y,
                json,
            } => {
                let fields = LocationFields {
                    name,
                    kind,
                    room,
                    position_x,
                    position_y,
                };
                location_cmd::run_update(&cfg, id, fields, json).await?
            }
            LocationAction::Rm { id, yes } => location_cmd::run_remove(&cfg, id, yes).await?,
        },
        Commands::Item { action } => match action {
            ItemAction::List { location, json } => {
                item_cmd::run_list(&cfg, location, json).await?
            }
            ItemAction::Get { id, json } => item_cmd::run_get(&cfg, id, json).await?,
            ItemAction::Find { keyword, json } => {
                item_cmd::run_find(&cfg, &keyword, json).await?
            }
            ItemAction::Add {
                name,
                location,
                description,
                quantity,
                category,
                json,
            } => {
                let fields = ItemFields {
                    name: Some(name),
                    description,
                    quantity: Some(quantity),
                    location: Some(location),
                    category,
                };
                item_cmd::run_add(&cfg, fields, json).await?
            }
            ItemAction::Update {
                id,
                name,
                location,
                description,
                quantity,
                category,
                json,
            } => {
                let fields = ItemFields {
                    name,
                    description,
                    quantity,
                    location,
                    category,
                };
                item_cmd::run_update(&cfg, id, fields, json).await?
            }
            ItemAction::Rm { id, yes } => item_cmd::run_remove(&cfg, id, yes).await?,
        },
        Commands::Photo { action } => match action {
            PhotoAction::List { item, json } => photo_cmd::run_list(&cfg, item, json).await?,
            PhotoAction::Upload { item, file, json } => {
                photo_cmd::run_upload(&cfg, item, &file, json).await?
            }
            PhotoAction::Rm { id, yes } => photo_cmd::run_remove(&cfg, id, yes).await?,
        },
    }

    Ok(())
}

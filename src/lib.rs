//! # Home Inventory
//!
//! Command-line client for a home-inventory REST server.
//!
//! Inventory is organised as `Address ⊃ Room ⊃ StorageLocation ⊃ Item`, with
//! photos attached to items. This crate talks to the server over HTTP, offers
//! CRUD commands for every entity, and runs the global search that matches a
//! query against items, rooms, and storage locations at once.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌──────────────┐
//! │  CLI (hinv)  │──▶│ home-inventory-core │◀──│  ApiClient   │
//! │ CRUD/search  │   │ models, aggregator  │   │ reqwest REST │
//! └──────────────┘   └─────────────────────┘   └──────┬───────┘
//!                                                     ▼
//!                                              inventory server
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! hinv status                          # check the API answers
//! hinv search drill                    # search everything
//! hinv shell                           # interactive search
//! hinv room add-batch --address 1 < rooms.txt
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`client`] | REST client, one method per endpoint |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`search`] | `hinv search` and the interactive shell |
//! | [`status`] | API reachability check |
//! | [`address_cmd`], [`room_cmd`], [`location_cmd`], [`item_cmd`], [`photo_cmd`] | Entity commands |
//! | [`output`] | Shared terminal helpers |

pub mod address_cmd;
pub mod client;
pub mod config;
pub mod item_cmd;
pub mod location_cmd;
pub mod logging;
pub mod output;
pub mod photo_cmd;
pub mod room_cmd;
pub mod search;
pub mod status;

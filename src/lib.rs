//! # Options Tunnel API - Filtered Public Read API
//!
//! A narrow, publicly reachable read API over a private Redis store of
//! option-contract quotes. Only operator-approved `(asset, expiry)`
//! combinations can be queried; every other combination appears
//! non-existent. Built with [Axum](https://crates.io/crates/axum) for async
//! HTTP handling and provides OpenAPI/Swagger documentation via
//! [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **Allow-list enforcement**: requests outside the configured set get a
//!   uniform 404 whether or not data exists underneath, so responses cannot
//!   be used to enumerate the private store.
//!
//! - **Hot-reloadable configuration**: the allow-list file is re-read
//!   without a process restart; readers see atomic snapshot swaps, and a
//!   malformed file fails closed to the last-known-good list.
//!
//! - **Summary aggregation**: per-request counts and exact sums over the
//!   matching contract records.
//!
//! - **Distinct failure classes**: an empty record set is a valid 200; a
//!   store outage or timeout is a 503, never a 404.
//!
//! - **Structured Logging**: request tracing with `tower-http` plus
//!   component-level `tracing` events.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`allowlist`] | Hot-reloadable allow-list of exposable pairs |
//! | [`aggregate`] | Pure summary reduction over record sets |
//! | [`config`] | TOML configuration loading |
//! | [`db`] | Record store trait with Redis and in-memory backends |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`gateway`] | Per-request orchestration and error mapping |
//! | [`health`] | Health snapshot derivation |
//! | [`models`] | Response DTOs with OpenAPI schemas |
//! | [`state`] | Application state management |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Service identity and allow-list count |
//! | GET | `/health` | Health snapshot |
//! | GET | `/config` | Allow-list enumeration and store counters |
//! | GET | `/ticker/{asset}/{expiry}` | Filtered options data with summary |
//!
//! ## Example Usage
//!
//! ### Starting the Server
//!
//! ```bash
//! # Development mode
//! cargo run
//!
//! # With a custom configuration file
//! CONFIG_PATH=deploy/config.toml cargo run
//!
//! # With environment overrides
//! HOST=127.0.0.1 PORT=3000 REDIS_URL=redis://localhost:6379/0 cargo run
//! ```
//!
//! ### API Requests
//!
//! ```bash
//! # Service identity
//! curl http://localhost:8001/
//!
//! # Allow-listed pair: 200 with summary and records
//! curl http://localhost:8001/ticker/BTC/29DEC23
//!
//! # Anything else: uniform 404
//! curl http://localhost:8001/ticker/ETH/29DEC23
//!
//! # Operator view
//! curl http://localhost:8001/config
//! ```
//!
//! ### Allow-list File
//!
//! The serving path never writes this file; edit it in place and changes
//! apply without a restart:
//!
//! ```json
//! {"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}
//! ```
//!
//! ## Swagger UI
//!
//! Once the server is running, access the interactive API documentation at:
//!
//! ```text
//! http://localhost:8001/swagger-ui/
//! ```

pub mod aggregate;
pub mod allowlist;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod health;
pub mod models;
pub mod state;

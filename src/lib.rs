//! # Redis H3 Client
//!
//! Purpose: Typed command bindings for the Redis H3 geospatial module,
//! delegating all execution to the `redis` crate's generic command
//! primitive.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: extension traits over the driver's connection
//!    traits hide argument framing behind one method per module command.
//! 2. **Exact Grammar**: every builder emits the documented token order,
//!    nothing more.
//! 3. **Pure Reshaping**: reply post-processing is a stateless function of
//!    the raw reply.
//! 4. **Driver Ownership**: connections, protocol, pooling, and retries
//!    belong to the `redis` crate; this crate never speaks RESP itself.
//!
//! # Example
//!
//! ```no_run
//! use redis_h3_client::{DistanceUnit, GeoPlace, H3Commands};
//!
//! fn main() -> redis::RedisResult<()> {
//!     let client = redis::Client::open("redis://127.0.0.1:6379")?;
//!     let mut con = client.get_connection()?;
//!
//!     let added: i64 = con.h3_add(
//!         "places",
//!         &[
//!             GeoPlace::new(15.087269, 37.502669, "Catania"),
//!             GeoPlace::new(13.361389, 38.115556, "Palermo"),
//!         ],
//!     )?;
//!     let km: f64 = con.h3_dist("places", "Catania", "Palermo", DistanceUnit::Km)?;
//!     println!("added {added} places, {km} km apart");
//!     Ok(())
//! }
//! ```
//!
//! Async support lives behind the `tokio-comp` feature, mirroring the
//! driver's feature of the same name.

mod commands;
mod types;

#[cfg(feature = "tokio-comp")]
mod aio;

#[cfg(feature = "tokio-comp")]
pub use aio::H3AsyncCommands;
pub use commands::H3Commands;
pub use types::{
    CellOptions, DistanceUnit, GeoPlace, IndexedPlace, Position, ScanEntry, ScanOptions, ScanReply,
};

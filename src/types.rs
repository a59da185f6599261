//! # Command Parameters and Reply Shapes
//!
//! Purpose: Typed inputs for the H3 command builders and typed views over
//! the replies that need reshaping before they are useful to callers.
//!
//! ## Design Principles
//! 1. **Unrepresentable Arity Errors**: A place is one struct, never a flat
//!    run of tokens the caller can misalign.
//! 2. **Borrow-Friendly API**: Parameter structs borrow their strings.
//! 3. **Pure Reshaping**: `FromRedisValue` impls are stateless functions of
//!    the raw reply.

use redis::{ErrorKind, FromRedisValue, RedisError, RedisResult, RedisWrite, ToRedisArgs, Value};

/// A place addressed by longitude and latitude, as consumed by `H3.ADD`.
///
/// Expands to the three wire tokens `lng lat name`, in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPlace<'a> {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Member name stored in the index.
    pub name: &'a str,
}

impl<'a> GeoPlace<'a> {
    /// Creates a place from longitude, latitude, and member name.
    pub fn new(lng: f64, lat: f64, name: &'a str) -> Self {
        GeoPlace { lng, lat, name }
    }
}

impl ToRedisArgs for GeoPlace<'_> {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        self.lng.write_redis_args(out);
        self.lat.write_redis_args(out);
        self.name.write_redis_args(out);
    }
}

/// A place addressed by a precomputed H3 index, as consumed by
/// `H3.ADDBYINDEX`.
///
/// Expands to the two wire tokens `index name`, in that order. The index is
/// kept as a string because the server accepts both the hexadecimal and the
/// decimal rendering of an H3 cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedPlace<'a> {
    /// H3 cell index, hexadecimal or decimal.
    pub index: &'a str,
    /// Member name stored in the index.
    pub name: &'a str,
}

impl<'a> IndexedPlace<'a> {
    /// Creates a place from an H3 cell index and member name.
    pub fn new(index: &'a str, name: &'a str) -> Self {
        IndexedPlace { index, name }
    }
}

impl ToRedisArgs for IndexedPlace<'_> {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        self.index.write_redis_args(out);
        self.name.write_redis_args(out);
    }
}

/// Distance unit accepted by `H3.DIST`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceUnit {
    /// Metres, the server default.
    #[default]
    M,
    /// Kilometres.
    Km,
    /// Feet.
    Ft,
    /// Miles.
    Mi,
}

impl DistanceUnit {
    /// The lowercase token sent on the wire.
    pub fn as_token(&self) -> &'static str {
        match self {
            DistanceUnit::M => "m",
            DistanceUnit::Km => "km",
            DistanceUnit::Ft => "ft",
            DistanceUnit::Mi => "mi",
        }
    }
}

impl ToRedisArgs for DistanceUnit {
    fn write_redis_args<W>(&self, out: &mut W)
    where
        W: ?Sized + RedisWrite,
    {
        out.write_arg(self.as_token().as_bytes());
    }
}

/// Optional modifiers for `H3.CELL`.
///
/// `H3.CELL key h3idx [WITHINDICES] [LIMIT offset count]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellOptions {
    pub(crate) with_indices: bool,
    pub(crate) limit: Option<(u64, u64)>,
}

impl CellOptions {
    /// Asks the server to return the H3 index alongside each member.
    pub fn with_indices(mut self) -> Self {
        self.with_indices = true;
        self
    }

    /// Restricts the reply to `count` members starting at `offset`.
    pub fn limit(mut self, offset: u64, count: u64) -> Self {
        self.limit = Some((offset, count));
        self
    }
}

/// Optional modifiers for `H3.SCAN`.
///
/// `H3.SCAN key cursor [MATCH pattern] [COUNT count]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub(crate) pattern: Option<String>,
    pub(crate) count: Option<u64>,
}

impl ScanOptions {
    /// Only returns members whose name matches the glob pattern.
    pub fn match_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Hints how much work the server should do per scan step.
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

/// One `H3.POS` coordinate pair, reshaped from the wire's numeric strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl FromRedisValue for Position {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let (lng, lat) = redis::from_redis_value(v)?;
        Ok(Position { lng, lat })
    }
}

/// One member returned by `H3.SCAN`, paired up from the flat reply array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Member name stored in the index.
    pub name: String,
    /// H3 cell index the member is stored under.
    pub index: String,
}

/// A full `H3.SCAN` reply: the continuation cursor plus the paired members.
///
/// A cursor of zero means the scan is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReply {
    /// Cursor to pass to the next `H3.SCAN` call.
    pub cursor: u64,
    /// Members found during this scan step.
    pub entries: Vec<ScanEntry>,
}

impl FromRedisValue for ScanReply {
    fn from_redis_value(v: &Value) -> RedisResult<Self> {
        let (cursor, flat): (u64, Vec<String>) = redis::from_redis_value(v)?;
        if flat.len() % 2 != 0 {
            return Err(RedisError::from((
                ErrorKind::TypeError,
                "H3.SCAN reply has a dangling member without an index",
                format!("{} elements", flat.len()),
            )));
        }
        let entries = flat
            .chunks_exact(2)
            .map(|pair| ScanEntry {
                name: pair[0].clone(),
                index: pair[1].clone(),
            })
            .collect();
        Ok(ScanReply { cursor, entries })
    }
}

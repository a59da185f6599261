//! # H3 Command Builders and Sync Dispatch
//!
//! Purpose: Assemble each H3 module command into a `redis::Cmd` with the
//! exact documented token order, then hand it to the driver's generic
//! execution primitive.
//!
//! ## Design Principles
//! 1. **Exact Grammar**: command name, key, then positional and optional
//!    tokens in documented order, nothing else.
//! 2. **Fail Fast**: invalid input is rejected before anything is sent.
//! 3. **Driver Ownership**: framing, transport, and retries belong to the
//!    `redis` crate; builders stay pure.
//! 4. **Observable Dispatch**: every assembled command is logged at debug
//!    level before it leaves the process.

use std::borrow::Cow;

use redis::{cmd, Arg, Cmd, ConnectionLike, ErrorKind, FromRedisValue, RedisError, RedisResult, ToRedisArgs};
use tracing::debug;

use crate::types::{CellOptions, DistanceUnit, GeoPlace, IndexedPlace, Position, ScanOptions, ScanReply};

/// Emits the assembled command as a debug event, space-joined like the
/// redis-cli rendering. Rendering is skipped entirely when the debug level
/// is disabled.
fn log_command(command: &Cmd) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let tokens: Vec<Cow<'_, str>> = command
            .args_iter()
            .map(|arg| match arg {
                Arg::Simple(bytes) => String::from_utf8_lossy(bytes),
                Arg::Cursor => Cow::Borrowed("0"),
            })
            .collect();
        debug!(command = %tokens.join(" "), "sending H3 command");
    }
}

/// `H3.ADD key lng1 lat1 name1 [lng2 lat2 name2 ...]`
pub(crate) fn h3_add_cmd<K: ToRedisArgs>(key: K, places: &[GeoPlace<'_>]) -> RedisResult<Cmd> {
    if places.is_empty() {
        return Err(RedisError::from((
            ErrorKind::ClientError,
            "H3.ADD requires at least one lng/lat/name place",
        )));
    }
    let mut command = cmd("H3.ADD");
    command.arg(key).arg(places);
    log_command(&command);
    Ok(command)
}

/// `H3.ADDBYINDEX key h3idx1 name1 [h3idx2 name2 ...]`
pub(crate) fn h3_addbyindex_cmd<K: ToRedisArgs>(
    key: K,
    places: &[IndexedPlace<'_>],
) -> RedisResult<Cmd> {
    if places.is_empty() {
        return Err(RedisError::from((
            ErrorKind::ClientError,
            "H3.ADDBYINDEX requires at least one index/name place",
        )));
    }
    let mut command = cmd("H3.ADDBYINDEX");
    command.arg(key).arg(places);
    log_command(&command);
    Ok(command)
}

/// `H3.CELL key h3idx [WITHINDICES] [LIMIT offset count]`
pub(crate) fn h3_cell_cmd<K: ToRedisArgs>(key: K, index: &str, options: &CellOptions) -> Cmd {
    let mut command = cmd("H3.CELL");
    command.arg(key).arg(index);
    if options.with_indices {
        command.arg("WITHINDICES");
    }
    if let Some((offset, count)) = options.limit {
        command.arg("LIMIT").arg(offset).arg(count);
    }
    log_command(&command);
    command
}

/// `H3.COUNT key h3idx`
pub(crate) fn h3_count_cmd<K: ToRedisArgs>(key: K, index: &str) -> Cmd {
    let mut command = cmd("H3.COUNT");
    command.arg(key).arg(index);
    log_command(&command);
    command
}

/// `H3.DIST key elem1 elem2 (m|km|ft|mi)`
pub(crate) fn h3_dist_cmd<K: ToRedisArgs>(
    key: K,
    element1: &str,
    element2: &str,
    unit: DistanceUnit,
) -> Cmd {
    let mut command = cmd("H3.DIST");
    command.arg(key).arg(element1).arg(element2).arg(unit);
    log_command(&command);
    command
}

/// `H3.INDEX key elem1 [elem2 ...]`
pub(crate) fn h3_index_cmd<K: ToRedisArgs, E: ToRedisArgs>(key: K, elements: E) -> Cmd {
    let mut command = cmd("H3.INDEX");
    command.arg(key).arg(elements);
    log_command(&command);
    command
}

/// `H3.POS key elem1 [elem2 ...]`
pub(crate) fn h3_pos_cmd<K: ToRedisArgs, E: ToRedisArgs>(key: K, elements: E) -> Cmd {
    let mut command = cmd("H3.POS");
    command.arg(key).arg(elements);
    log_command(&command);
    command
}

/// `H3.REMBYINDEX key elem1 [elem2 ...]`
pub(crate) fn h3_rembyindex_cmd<K: ToRedisArgs, E: ToRedisArgs>(key: K, elements: E) -> Cmd {
    let mut command = cmd("H3.REMBYINDEX");
    command.arg(key).arg(elements);
    log_command(&command);
    command
}

/// `H3.SCAN key cursor [MATCH pattern] [COUNT count]`
pub(crate) fn h3_scan_cmd<K: ToRedisArgs>(key: K, cursor: u64, options: &ScanOptions) -> Cmd {
    let mut command = cmd("H3.SCAN");
    command.arg(key).arg(cursor);
    if let Some(pattern) = options.pattern.as_deref() {
        command.arg("MATCH").arg(pattern);
    }
    if let Some(count) = options.count {
        command.arg("COUNT").arg(count);
    }
    log_command(&command);
    command
}

/// `H3.STATUS`
pub(crate) fn h3_status_cmd() -> Cmd {
    let command = cmd("H3.STATUS");
    log_command(&command);
    command
}

/// H3 module commands over a synchronous connection.
///
/// Implemented for every [`redis::ConnectionLike`], so the methods are
/// available directly on `redis::Connection` and friends. Commands whose
/// reply needs no reshaping are generic over the return value, exactly like
/// the driver's own `Commands` trait; `h3_pos` and `h3_scan` return the
/// reshaped [`Position`] and [`ScanReply`] types instead.
pub trait H3Commands: ConnectionLike + Sized {
    /// Adds places by longitude, latitude, and name.
    ///
    /// Returns the number of members added. Fails client-side when `places`
    /// is empty.
    fn h3_add<K: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        places: &[GeoPlace<'_>],
    ) -> RedisResult<RV> {
        h3_add_cmd(key, places)?.query(self)
    }

    /// Adds places by precomputed H3 index and name.
    ///
    /// Returns the number of members added. Fails client-side when `places`
    /// is empty.
    fn h3_addbyindex<K: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        places: &[IndexedPlace<'_>],
    ) -> RedisResult<RV> {
        h3_addbyindex_cmd(key, places)?.query(self)
    }

    /// Lists the members stored under an H3 cell and its children.
    fn h3_cell<K: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        index: &str,
        options: &CellOptions,
    ) -> RedisResult<RV> {
        h3_cell_cmd(key, index, options).query(self)
    }

    /// Counts the members stored under an H3 cell and its children.
    fn h3_count<K: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        index: &str,
    ) -> RedisResult<RV> {
        h3_count_cmd(key, index).query(self)
    }

    /// Distance between two members, in the requested unit.
    fn h3_dist<K: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        element1: &str,
        element2: &str,
        unit: DistanceUnit,
    ) -> RedisResult<RV> {
        h3_dist_cmd(key, element1, element2, unit).query(self)
    }

    /// H3 indices of the named members.
    fn h3_index<K: ToRedisArgs, E: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        elements: E,
    ) -> RedisResult<RV> {
        h3_index_cmd(key, elements).query(self)
    }

    /// Coordinates of the named members, parsed into [`Position`] pairs.
    fn h3_pos<K: ToRedisArgs, E: ToRedisArgs>(
        &mut self,
        key: K,
        elements: E,
    ) -> RedisResult<Vec<Position>> {
        h3_pos_cmd(key, elements).query(self)
    }

    /// Removes the named members.
    fn h3_rembyindex<K: ToRedisArgs, E: ToRedisArgs, RV: FromRedisValue>(
        &mut self,
        key: K,
        elements: E,
    ) -> RedisResult<RV> {
        h3_rembyindex_cmd(key, elements).query(self)
    }

    /// One incremental scan step, with the flat reply grouped into
    /// name/index pairs.
    fn h3_scan<K: ToRedisArgs>(
        &mut self,
        key: K,
        cursor: u64,
        options: &ScanOptions,
    ) -> RedisResult<ScanReply> {
        h3_scan_cmd(key, cursor, options).query(self)
    }

    /// Module liveness check; the server answers `Ok`.
    fn h3_status<RV: FromRedisValue>(&mut self) -> RedisResult<RV> {
        h3_status_cmd().query(self)
    }
}

impl<T: ConnectionLike> H3Commands for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(command: &Cmd) -> Vec<String> {
        command
            .args_iter()
            .map(|arg| match arg {
                Arg::Simple(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                Arg::Cursor => "0".to_string(),
            })
            .collect()
    }

    #[test]
    fn add_places_in_lng_lat_name_order() {
        let command = h3_add_cmd(
            "H3TestKey",
            &[
                GeoPlace::new(15.087269, 37.502669, "Catania"),
                GeoPlace::new(13.361389, 38.115556, "Palermo"),
            ],
        )
        .unwrap();
        assert_eq!(
            argv(&command),
            [
                "H3.ADD",
                "H3TestKey",
                "15.087269",
                "37.502669",
                "Catania",
                "13.361389",
                "38.115556",
                "Palermo",
            ]
        );
    }

    #[test]
    fn add_rejects_empty_batch() {
        let err = h3_add_cmd("H3TestKey", &[]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ClientError);
    }

    #[test]
    fn addbyindex_places_in_index_name_order() {
        let command = h3_addbyindex_cmd(
            "H3TestKey",
            &[
                IndexedPlace::new("8f3f35c64acb125", "Catania-key"),
                IndexedPlace::new("645126749795692837", "Catania-idx"),
            ],
        )
        .unwrap();
        assert_eq!(
            argv(&command),
            [
                "H3.ADDBYINDEX",
                "H3TestKey",
                "8f3f35c64acb125",
                "Catania-key",
                "645126749795692837",
                "Catania-idx",
            ]
        );
    }

    #[test]
    fn addbyindex_rejects_empty_batch() {
        let err = h3_addbyindex_cmd("H3TestKey", &[]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ClientError);
    }

    #[test]
    fn cell_without_options_is_bare() {
        let command = h3_cell_cmd("H3TestKey", "833f35fffffffff", &CellOptions::default());
        assert_eq!(argv(&command), ["H3.CELL", "H3TestKey", "833f35fffffffff"]);
    }

    #[test]
    fn cell_flags_follow_documented_order() {
        let options = CellOptions::default().with_indices().limit(5, 10);
        let command = h3_cell_cmd("H3TestKey", "833f35fffffffff", &options);
        assert_eq!(
            argv(&command),
            ["H3.CELL", "H3TestKey", "833f35fffffffff", "WITHINDICES", "LIMIT", "5", "10"]
        );
    }

    #[test]
    fn cell_limit_without_indices() {
        let options = CellOptions::default().limit(0, 2);
        let command = h3_cell_cmd("H3TestKey", "833f35fffffffff", &options);
        assert_eq!(
            argv(&command),
            ["H3.CELL", "H3TestKey", "833f35fffffffff", "LIMIT", "0", "2"]
        );
    }

    #[test]
    fn count_is_key_then_index() {
        let command = h3_count_cmd("H3TestKey", "833f35fffffffff");
        assert_eq!(argv(&command), ["H3.COUNT", "H3TestKey", "833f35fffffffff"]);
    }

    #[test]
    fn dist_carries_unit_token_last() {
        let command = h3_dist_cmd("H3TestKey", "Catania", "Palermo", DistanceUnit::Km);
        assert_eq!(
            argv(&command),
            ["H3.DIST", "H3TestKey", "Catania", "Palermo", "km"]
        );
    }

    #[test]
    fn dist_defaults_to_metres() {
        let command = h3_dist_cmd("H3TestKey", "Catania", "Palermo", DistanceUnit::default());
        assert_eq!(
            argv(&command),
            ["H3.DIST", "H3TestKey", "Catania", "Palermo", "m"]
        );
    }

    #[test]
    fn index_and_pos_and_rem_list_elements_after_key() {
        let names = &["Catania", "Palermo"];
        assert_eq!(
            argv(&h3_index_cmd("H3TestKey", names)),
            ["H3.INDEX", "H3TestKey", "Catania", "Palermo"]
        );
        assert_eq!(
            argv(&h3_pos_cmd("H3TestKey", names)),
            ["H3.POS", "H3TestKey", "Catania", "Palermo"]
        );
        assert_eq!(
            argv(&h3_rembyindex_cmd("H3TestKey", names)),
            ["H3.REMBYINDEX", "H3TestKey", "Catania", "Palermo"]
        );
    }

    #[test]
    fn scan_without_options_is_key_and_cursor() {
        let command = h3_scan_cmd("H3TestKey", 0, &ScanOptions::default());
        assert_eq!(argv(&command), ["H3.SCAN", "H3TestKey", "0"]);
    }

    #[test]
    fn scan_flags_follow_documented_order() {
        let options = ScanOptions::default().match_pattern("P*").count(10);
        let command = h3_scan_cmd("H3TestKey", 17, &options);
        assert_eq!(
            argv(&command),
            ["H3.SCAN", "H3TestKey", "17", "MATCH", "P*", "COUNT", "10"]
        );
    }

    #[test]
    fn status_has_no_key() {
        assert_eq!(argv(&h3_status_cmd()), ["H3.STATUS"]);
    }

    #[test]
    fn builders_pack_plain_resp_arrays() {
        let packed = h3_count_cmd("k", "idx").get_packed_command();
        assert_eq!(packed, b"*3\r\n$8\r\nH3.COUNT\r\n$1\r\nk\r\n$3\r\nidx\r\n");
        let packed = h3_status_cmd().get_packed_command();
        assert_eq!(packed, b"*1\r\n$9\r\nH3.STATUS\r\n");
    }
}

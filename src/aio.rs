//! # Async H3 Dispatch
//!
//! Purpose: The async twin of [`H3Commands`](crate::H3Commands), sharing the
//! same command builders and reply shapes. Enabled by the `tokio-comp`
//! feature, which forwards to the driver's Tokio support.

use redis::aio::ConnectionLike;
use redis::{FromRedisValue, RedisFuture, ToRedisArgs};

use crate::commands::{
    h3_add_cmd, h3_addbyindex_cmd, h3_cell_cmd, h3_count_cmd, h3_dist_cmd, h3_index_cmd,
    h3_pos_cmd, h3_rembyindex_cmd, h3_scan_cmd, h3_status_cmd,
};
use crate::types::{CellOptions, DistanceUnit, GeoPlace, IndexedPlace, Position, ScanOptions, ScanReply};

/// H3 module commands over an async connection.
///
/// Implemented for every [`redis::aio::ConnectionLike`], so the methods are
/// available directly on `MultiplexedConnection` and friends. Method
/// semantics match [`H3Commands`](crate::H3Commands) exactly.
pub trait H3AsyncCommands: ConnectionLike + Send + Sized {
    /// Adds places by longitude, latitude, and name.
    fn h3_add<'a, K: ToRedisArgs + Send + Sync + 'a, RV: FromRedisValue>(
        &'a mut self,
        key: K,
        places: &'a [GeoPlace<'a>],
    ) -> RedisFuture<'a, RV> {
        Box::pin(async move { h3_add_cmd(key, places)?.query_async(self).await })
    }

    /// Adds places by precomputed H3 index and name.
    fn h3_addbyindex<'a, K: ToRedisArgs + Send + Sync + 'a, RV: FromRedisValue>(
        &'a mut self,
        key: K,
        places: &'a [IndexedPlace<'a>],
    ) -> RedisFuture<'a, RV> {
        Box::pin(async move { h3_addbyindex_cmd(key, places)?.query_async(self).await })
    }

    /// Lists the members stored under an H3 cell and its children.
    fn h3_cell<'a, K: ToRedisArgs + Send + Sync + 'a, RV: FromRedisValue>(
        &'a mut self,
        key: K,
        index: &'a str,
        options: &'a CellOptions,
    ) -> RedisFuture<'a, RV> {
        Box::pin(async move { h3_cell_cmd(key, index, options).query_async(self).await })
    }

    /// Counts the members stored under an H3 cell and its children.
    fn h3_count<'a, K: ToRedisArgs + Send + Sync + 'a, RV: FromRedisValue>(
        &'a mut self,
        key: K,
        index: &'a str,
    ) -> RedisFuture<'a, RV> {
        Box::pin(async move { h3_count_cmd(key, index).query_async(self).await })
    }

    /// Distance between two members, in the requested unit.
    fn h3_dist<'a, K: ToRedisArgs + Send + Sync + 'a, RV: FromRedisValue>(
        &'a mut self,
        key: K,
        element1: &'a str,
        element2: &'a str,
        unit: DistanceUnit,
    ) -> RedisFuture<'a, RV> {
        Box::pin(async move { h3_dist_cmd(key, element1, element2, unit).query_async(self).await })
    }

    /// H3 indices of the named members.
    fn h3_index<'a, K, E, RV>(&'a mut self, key: K, elements: E) -> RedisFuture<'a, RV>
    where
        K: ToRedisArgs + Send + Sync + 'a,
        E: ToRedisArgs + Send + Sync + 'a,
        RV: FromRedisValue,
    {
        Box::pin(async move { h3_index_cmd(key, elements).query_async(self).await })
    }

    /// Coordinates of the named members, parsed into [`Position`] pairs.
    fn h3_pos<'a, K, E>(&'a mut self, key: K, elements: E) -> RedisFuture<'a, Vec<Position>>
    where
        K: ToRedisArgs + Send + Sync + 'a,
        E: ToRedisArgs + Send + Sync + 'a,
    {
        Box::pin(async move { h3_pos_cmd(key, elements).query_async(self).await })
    }

    /// Removes the named members.
    fn h3_rembyindex<'a, K, E, RV>(&'a mut self, key: K, elements: E) -> RedisFuture<'a, RV>
    where
        K: ToRedisArgs + Send + Sync + 'a,
        E: ToRedisArgs + Send + Sync + 'a,
        RV: FromRedisValue,
    {
        Box::pin(async move { h3_rembyindex_cmd(key, elements).query_async(self).await })
    }

    /// One incremental scan step, with the flat reply grouped into
    /// name/index pairs.
    fn h3_scan<'a, K: ToRedisArgs + Send + Sync + 'a>(
        &'a mut self,
        key: K,
        cursor: u64,
        options: &'a ScanOptions,
    ) -> RedisFuture<'a, ScanReply> {
        Box::pin(async move { h3_scan_cmd(key, cursor, options).query_async(self).await })
    }

    /// Module liveness check; the server answers `Ok`.
    fn h3_status<RV: FromRedisValue>(&mut self) -> RedisFuture<'_, RV> {
        Box::pin(async move { h3_status_cmd().query_async(self).await })
    }
}

impl<T: ConnectionLike + Send> H3AsyncCommands for T {}

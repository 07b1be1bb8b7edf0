//! Time-based (version 1) UUIDs.
//!
//! A version 1 UUID embeds a 60-bit count of 100-nanosecond ticks since the
//! Gregorian calendar reform (1582-10-15T00:00:00Z). Extraction here truncates
//! to millisecond resolution, so any identifier minted by [`from_unix_millis`]
//! yields back exactly the millisecond it was minted for.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use uuid::timestamp::context::ContextV1;
use uuid::{Timestamp, Uuid};

/// Last Unix millisecond a 60-bit Gregorian tick count can hold.
const MAX_UNIX_MILLIS: i64 = ((1 << 60) - 1) / 10_000 - 12_219_292_800_000;

static CLOCK_SEQUENCE: LazyLock<ContextV1> =
    LazyLock::new(|| ContextV1::new(rand::rng().random()));

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimeUuidError {
    #[error("identifier {id} is not time-based (version {version})")]
    NotTimeBased { id: Uuid, version: usize },

    #[error("timestamp {0} ms cannot be embedded in a time-based identifier")]
    OutOfRange(i64),

    #[error("identifier {0} embeds an instant before the Unix epoch")]
    BeforeUnixEpoch(Uuid),
}

/// Extracts the creation instant embedded in `id`, in milliseconds since the Unix epoch.
///
/// Only version 1 is accepted; v6 and v7 carry a timestamp too, but in a
/// different layout than the one stored plugin ids were minted with.
pub fn unix_timestamp(id: &Uuid) -> Result<i64, TimeUuidError> {
    let version = id.get_version_num();
    let timestamp = id
        .get_timestamp()
        .filter(|_| version == 1)
        .ok_or(TimeUuidError::NotTimeBased { id: *id, version })?;

    let (seconds, nanos) = timestamp.to_unix();
    // pre-1970 tick counts wrap around to seconds past the representable range
    if seconds > (MAX_UNIX_MILLIS / 1_000) as u64 {
        return Err(TimeUuidError::BeforeUnixEpoch(*id));
    }

    Ok(seconds as i64 * 1_000 + i64::from(nanos / 1_000_000))
}

/// Same as [`unix_timestamp`], rendered as a UTC instant.
pub fn created_at(id: &Uuid) -> Result<DateTime<Utc>, TimeUuidError> {
    let millis = unix_timestamp(id)?;
    DateTime::from_timestamp_millis(millis).ok_or(TimeUuidError::OutOfRange(millis))
}

/// Mints a fresh identifier embedding `millis` (milliseconds since the Unix epoch).
pub fn from_unix_millis(millis: i64) -> Result<Uuid, TimeUuidError> {
    if !(0..=MAX_UNIX_MILLIS).contains(&millis) {
        return Err(TimeUuidError::OutOfRange(millis));
    }
    let seconds = (millis / 1_000) as u64;
    let nanos = (millis % 1_000) as u32 * 1_000_000;

    let timestamp = Timestamp::from_unix(&*CLOCK_SEQUENCE, seconds, nanos);
    Ok(Uuid::new_v1(timestamp, &random_node()))
}

/// Mints a fresh identifier for the current wall-clock instant.
pub fn now() -> Uuid {
    Uuid::now_v1(&random_node())
}

/// Random node id with the multicast bit set, so it never collides with a MAC address.
fn random_node() -> [u8; 6] {
    let mut node: [u8; 6] = rand::rng().random();
    node[0] |= 0x01;
    node
}

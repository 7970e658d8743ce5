/// Feature service and snapshot I/O
///
/// This module handles:
/// - Building the catalog query and parsing its response (query.rs)
/// - Fetching the camera catalog (client.rs)
/// - Downloading and decoding camera snapshots (snapshot.rs)

pub mod query;
pub mod client;
pub mod snapshot;

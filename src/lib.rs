//! Minimal Rust crate for reading instance metadata from the Vultr metadata service.
//!
//! The metadata service listens on the link-local address `169.254.169.254` and serves
//! a JSON document at `/v1.json` describing the instance: hostname, instance ID, SSH
//! public keys, region and BGP session parameters.
//!
//! # Features
//!
//! - Single-request fetch of the full metadata document
//! - Lenient decoding: missing keys and `null` values become empty strings
//! - Overridable base URL for mock servers and alternate environments
//! - Region code to numeric region ID lookup
//!
//! # Example
//!
//! ```ignore
//! use vultr_metadata::{Client, MetadataError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MetadataError> {
//!     let metadata = Client::new()?.metadata().await?;
//!
//!     println!("hostname: {}", metadata.hostname);
//!     println!("region id: {:?}", metadata.region.id());
//!     println!("bgp peer: {}", metadata.bgp.ipv4.peer_address);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod metadata;
mod region;

pub use client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::MetadataError;
pub use metadata::{Bgp, BgpPeering, MetaData, Region};
pub use region::{region_code_to_id, RegionInfo, REGIONS};

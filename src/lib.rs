//! pin-drop: map address picker
//!
//! A library and CLI tool for turning a dropped map pin into a stored
//! address: reverse-geocode the coordinate, normalize the provider's
//! response into a flat record, and save it to an address backend.
//!
//! ## Features
//!
//! - Address normalization over a closed set of component types
//! - Google Geocoding API backend (reverse + forward)
//! - `address` REST client and a small file-backed backend
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use pin_drop::address::{normalize, AddressComponent};
//!
//! let components = vec![
//!     AddressComponent::new("12", &["street_number"]),
//!     AddressComponent::new("Colombo", &["locality", "political"]),
//! ];
//!
//! let record = normalize(&components, "12, Colombo");
//! assert_eq!(record.street_number.as_deref(), Some("12"));
//! assert_eq!(record.locality.as_deref(), Some("Colombo"));
//! assert_eq!(record.formatted_address.as_deref(), Some("12, Colombo"));
//! ```

pub mod address;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod server;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use address::{normalize, AddressComponent, AddressKey, AddressRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::lookup::MarkerAddress;
pub use geo::Coordinates;

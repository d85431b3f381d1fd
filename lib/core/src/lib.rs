//! # TwinScout Core
//!
//! Core data structures for the TwinScout performance twin finder.
//!
//! - [`Feature`] - The fixed, ordered set of numeric statistics
//! - [`PlayerRecord`] - One roster row with identity, position and raw stats
//! - [`FeatureTable`] - Immutable, identity-keyed roster shared as a snapshot
//! - [`Vector`] - Dense feature vector with cosine similarity
//! - [`loader`] - CSV roster parsing with load-time schema validation
//!
//! ## Example
//!
//! ```rust
//! use twinscout_core::{loader, Feature};
//!
//! let csv = "player,position,goals,assists,sh,sot_pct,g_sh\n\
//!            A,MF,5,8,20,40.1,0.11\n\
//!            B,FW,12,4,50,55.2,0.22\n";
//! let table = loader::from_reader(csv.as_bytes()).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("B").unwrap().value(Feature::Goals), 12.0);
//! ```

pub mod error;
pub mod feature;
pub mod player;
pub mod table;
pub mod vector;
pub mod loader;

pub use error::{Error, Result, SchemaError};
pub use feature::{Feature, FEATURE_COUNT};
pub use player::PlayerRecord;
pub use table::{FeatureTable, TableSnapshot};
pub use vector::Vector;
pub use loader::{RosterSource, DEFAULT_ROSTER_FILE};

//! # amflens-core
//!
//! Core library for reading AMF (API Modeling Framework) JSON-LD models and
//! turning them into typed documentation views.
//!
//! This library provides:
//! - Context-aware access to compacted, expanded and flattened AMF graphs
//! - Link and reference resolution across declarations and libraries
//! - Serialization of graph nodes into plain view objects (`Api*` types)
//! - A query store answering documentation views by domain id
//! - Helpers for endpoint URLs, navigation trees and OAuth 2.0 state
//!
//! ## Features
//!
//! - `default`: Reading JSON and HTML-embedded models (no expansion)
//! - `full-expansion`: Complete JSON-LD expansion with remote context resolution
//!   and downloading models over HTTP
//!
//! ## Example
//!
//! ```no_run
//! use amflens_core::{AmfStore, loader};
//!
//! # fn example() -> amflens_core::Result<()> {
//! let text = std::fs::read_to_string("api.json").expect("model file");
//! let mut store = AmfStore::new();
//! store.load_graph(loader::parse_model(&text)?)?;
//!
//! for endpoint in store.list_endpoints()? {
//!     println!("{}", endpoint.path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod expand;
pub mod helper;
pub mod loader;
pub mod navigation;
pub mod ns;
pub mod security;
pub mod selection;
pub mod serializer;
pub mod store;
pub mod types;
pub mod url_utils;

#[cfg(feature = "full-expansion")]
pub mod jsonld;

// Re-export commonly used types
pub use context::{AmfContext, KeyCache};
pub use error::{AmfError, Result};
pub use helper::{AmfHelper, GraphReader, ServerQueryOptions};
pub use navigation::NavigationTree;
pub use selection::{DomainType, QueryPhase, SelectedView, Selection, SelectionState};
pub use serializer::{AmfSerializer, ShapeOptions};
pub use store::AmfStore;
pub use types::*;

pub use loader::{extract_json_ld_blocks, parse_model};

#[cfg(feature = "full-expansion")]
pub use loader::fetch_model;

#[cfg(feature = "full-expansion")]
pub use jsonld::{expand_document, expand_model};

//! # Adapters Module
//!
//! - `content`: indicator documents for Poll responses, from the built-in
//!   watch-list or remote feeds

pub mod content;

pub use content::WatchListContentProvider;

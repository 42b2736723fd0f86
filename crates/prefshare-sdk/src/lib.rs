//! High-level prefshare API.
//!
//! [`SharedPrefs`] is the externally consumed key/value surface. Every
//! operation routes to whichever peer store is currently master: reads use
//! a cached master handle, write sessions re-resolve the master first
//! (the master may have changed since the handle was obtained — never hold
//! onto an [`Editor`] across sessions).
//!
//! ```
//! # use std::sync::Arc;
//! # use prefshare_directory::{DirectoryConfig, Endpoint, PeerDirectory, StaticEndpoints};
//! # use prefshare_store::MemoryHub;
//! # use prefshare_sync::LocalBus;
//! # use prefshare_sdk::SharedPrefs;
//! let hub = Arc::new(MemoryHub::new());
//! hub.register("com.owlr.camera".into());
//! let config = DirectoryConfig::new(
//!     "com\\.owlr\\..*",
//!     "com.owlr.PERMISSION",
//!     "com.owlr.camera",
//! )?;
//! let source = StaticEndpoints::new(vec![
//!     Endpoint::new("com.owlr.camera", "com.owlr.PERMISSION"),
//! ]);
//! let directory = PeerDirectory::new(config, Arc::new(source));
//! let prefs = SharedPrefs::new(directory, hub, Arc::new(LocalBus::new()))?;
//!
//! prefs.edit()?.put_i32("volume", 5).commit()?;
//! assert_eq!(prefs.get_i32("volume", 0), 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod prefs;

pub use error::{PrefsError, PrefsResult};
pub use prefs::{Editor, SharedPrefs};

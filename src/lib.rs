//! Compile-time content fingerprints for code members.
//!
//! `hashstamp` takes a description of every member in a code base (where it
//! lives, its signature, the text of its body), reduces each body to a
//! canonical form, hashes it with SHA-256 and publishes the digests twice:
//!
//! - as nested modules of `pub const` strings, checked by the compiler
//!   (`hash_stamps::my_crate_net::Client::connect`);
//! - as a string-keyed table for runtime enumeration
//!   (`hash_stamps::lookup("my_crate::net", "Client", "connect")`).
//!
//! A digest changes exactly when the member's body changes in a way that
//! survives normalization, so callers can detect real edits and ignore
//! reformatting.
//!
//! ```rust
//! use hashstamp::{generate, BodyContent, StampConfig, UnitDescriptor};
//!
//! let units = vec![UnitDescriptor::new(
//!     "HashStamp.Test",
//!     "TestClass1",
//!     "TestMethod1",
//!     "TestMethod1()",
//!     Some(BodyContent::Statements(vec!["return 1;".into()])),
//! )];
//! let generation = generate(&units, &StampConfig::default())?;
//! let entry = generation
//!     .runtime_artifact
//!     .get("HashStamp.Test", "TestClass1", "TestMethod1")
//!     .expect("member is registered");
//! assert_eq!(entry.digest, hashstamp::digest("return 1 ;"));
//! # Ok::<(), hashstamp::StampError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod hash;
pub mod lexer;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod source;

pub use config::{ConfigLoadError, EmitConfig, NormalizeConfig, SourceConfig, StampConfig};
pub use descriptor::{BodyContent, MissingSymbol, UnitDescriptor, load_manifest, parse_manifest};
pub use emit::{RuntimeArtifact, StaticArtifact, emit, render_source};
pub use error::StampError;
pub use hash::{Digest, EMPTY_DIGEST, digest};
pub use normalize::{collapse_whitespace, normalize};
pub use pipeline::{Generation, SkippedUnit, generate, generate_file, generate_from_dir};
pub use registry::Registry;
pub use resolve::{UnitRecord, identifier_safe, resolve};
pub use source::scan_dir;

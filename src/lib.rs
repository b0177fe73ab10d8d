//! hyperschema - operator schema construction and evolution
//!
//! A typed DSL for building JSON-Schema-like (draft-04 dialect) documents
//! that describe ML operator hyperparameters, and a customization engine
//! that evolves those documents across wrapped-library versions while
//! preserving optimizer-relevant metadata (search bounds, distributions,
//! relevance flags).
//!
//! # Modules
//!
//! - [`schema`] - leaf and combinator schema fragment builders
//! - [`operator`] - combined operator documents and the availability registry
//! - [`customize`] - edit sets and version-gated customization chains
//! - [`catalog`] - worked operator definitions
//! - [`error`] - error types
//!
//! # Example
//!
//! ```
//! use hyperschema::schema::{AnyOf, Int, Null, Object};
//! use hyperschema::operator::OperatorDocument;
//! use hyperschema::customize::Customization;
//!
//! let base = OperatorDocument::new("MyEstimator").with_hyperparams(
//!     Object::new()
//!         .with_required(["n_estimators"])
//!         .with_prop("n_estimators", Int::new().with_default(100)),
//! );
//!
//! let revised = base
//!     .customize(
//!         &Customization::new().set_prop(
//!             "n_estimators",
//!             AnyOf::new()
//!                 .with_variant(Int::new())
//!                 .with_variant(Null::new())
//!                 .with_default(100),
//!         ),
//!     )
//!     .unwrap();
//! assert_ne!(base, revised);
//! ```

pub mod catalog;
pub mod customize;
pub mod error;
pub mod operator;
pub mod schema;

pub use error::{Result, SchemaError};

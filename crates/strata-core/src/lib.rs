//! # strata-core
//!
//! Core types and error types for the Strata repository integrity auditor.
//!
//! This crate provides the foundational types shared across all Strata crates:
//! - Catalog-side records: [`Repository`], [`Bucket`], [`Asset`]
//! - Blob-store-side records: [`BlobAttributes`], [`BlobMetrics`]
//! - The locator binding the two: [`ContentReference`] / [`BlobId`]
//! - Digests: [`HashAlgorithm`], [`Checksum`]
//! - Log severities used by the reporting policy: [`Severity`]
//! - Cross-cutting error types

pub mod asset;
pub mod blob;
pub mod checksum;
pub mod errors;
pub mod reference;
pub mod repository;
pub mod severity;

pub use asset::Asset;
pub use blob::{BlobAttributes, BlobMetrics};
pub use checksum::{Checksum, HashAlgorithm};
pub use errors::{CoreError, ReferenceError};
pub use reference::{BlobId, ContentReference};
pub use repository::{Bucket, Repository};
pub use severity::Severity;

//! Per-asset comparison of a catalog record against its blob.

use strata_blob::BlobStore;
use strata_core::{Asset, BlobAttributes, HashAlgorithm};

use crate::Discrepancy;

/// Result of checking one asset. `Ok` means the asset and its blob agree.
pub type CheckOutcome = Result<(), Discrepancy>;

/// Check one asset end to end: resolve its reference, fetch the blob's
/// attributes, then compare.
///
/// Blob store failures become [`Discrepancy::Unexpected`]; they never abort
/// the caller's pass.
pub fn check_asset(
    asset: &Asset,
    blob_store: &dyn BlobStore,
    algorithm: HashAlgorithm,
) -> CheckOutcome {
    let reference = asset
        .content_reference()
        .map_err(Discrepancy::ReferenceMissing)?;

    let attributes = blob_store
        .blob_attributes(&reference)
        .map_err(|error| Discrepancy::Unexpected {
            detail: error.to_string(),
        })?;

    evaluate(asset, attributes.as_ref(), algorithm)
}

/// Judge an asset against already-fetched blob attributes.
///
/// Absent or tombstoned attributes short-circuit before any field is
/// compared, so each asset yields at most one discrepancy.
pub fn evaluate(
    asset: &Asset,
    attributes: Option<&BlobAttributes>,
    algorithm: HashAlgorithm,
) -> CheckOutcome {
    let attributes = attributes.ok_or(Discrepancy::BlobAttributesMissing)?;
    if attributes.is_deleted() {
        return Err(Discrepancy::BlobDeleted {
            reason: attributes.deleted_reason.clone(),
        });
    }
    compare(asset, attributes, algorithm)
}

/// Field comparison. Presence is checked for every field before any value
/// is compared.
fn compare(asset: &Asset, attributes: &BlobAttributes, algorithm: HashAlgorithm) -> CheckOutcome {
    let asset_name = asset.name().ok_or(Discrepancy::AssetNameMissing)?;
    let blob_name = attributes
        .logical_name()
        .ok_or(Discrepancy::BlobNameMissing)?;
    if let Some(error) = asset.checksum_error(algorithm) {
        return Err(Discrepancy::Unexpected {
            detail: format!("unreadable {algorithm} checksum in catalog: {error}"),
        });
    }
    let asset_checksum = asset
        .checksum(algorithm)
        .ok_or(Discrepancy::AssetChecksumMissing { algorithm })?;

    if asset_name != blob_name {
        return Err(Discrepancy::NameMismatch {
            asset_name: asset_name.to_string(),
            blob_name: blob_name.to_string(),
        });
    }

    if !asset_checksum.matches(attributes.checksum()) {
        return Err(Discrepancy::ChecksumMismatch {
            name: asset_name.to_string(),
            algorithm,
            asset_checksum: asset_checksum.to_string(),
            blob_checksum: attributes.checksum().to_string(),
        });
    }

    Ok(())
}

//! One complete rebuild: listing in, snapshot and cache instructions out.

use chrono::Utc;
use tracing::debug;

use shelf_core::config::{DriveConfig, DriveType};
use shelf_core::result::AppResult;
use shelf_drive::LibraryListing;
use shelf_entity::change::CacheInstruction;
use shelf_entity::snapshot::Snapshot;

use super::adjacency::{build_adjacency, synthesize_org};
use super::catalog::{CatalogBuild, build_catalog};
use super::changes::ChangeDetector;
use super::paths::{PathContext, resolve_paths};
use super::tree::TreeBuilder;

/// Result of a rebuild.
#[derive(Debug, Clone)]
pub struct Rebuild {
    /// The new snapshot, ready to publish.
    pub snapshot: Snapshot,
    /// Instructions for the edge cache, to send after publishing.
    pub instructions: Vec<CacheInstruction>,
}

/// Build a snapshot from `listing`, diffing it against `previous`.
///
/// Pure apart from logging: nothing is published and no cache is touched.
pub fn rebuild(
    listing: &LibraryListing,
    config: &DriveConfig,
    previous: Option<&Snapshot>,
) -> AppResult<Rebuild> {
    let root_ids = listing.root_ids();
    let CatalogBuild {
        mut catalog,
        order,
        tag_index,
    } = build_catalog(listing)?;

    let mut adjacency = build_adjacency(&mut catalog, &order);

    let org_name = match config.drive_type {
        DriveType::Org => {
            let org_name = config.require_org_name()?;
            synthesize_org(&mut catalog, &mut adjacency, org_name, &listing.drives);
            Some(org_name)
        }
        DriveType::Team | DriveType::Folder => None,
    };

    resolve_paths(
        &mut catalog,
        PathContext {
            drive_type: config.drive_type,
            root_ids: &root_ids,
            org_name,
            drives: &listing.drives,
        },
    );

    let (trees, instructions) = {
        let mut detector = ChangeDetector::new(&catalog, &adjacency, previous);
        let trees: Vec<_> = {
            let mut builder =
                TreeBuilder::new(&catalog, &adjacency, &listing.drives, &mut detector);
            root_ids.iter().map(|id| builder.build_root(id)).collect()
        };
        (trees, detector.into_instructions())
    };

    debug!(
        resources = catalog.len(),
        trees = trees.len(),
        instructions = instructions.len(),
        "Library rebuilt"
    );

    Ok(Rebuild {
        snapshot: Snapshot {
            catalog,
            adjacency,
            trees,
            tag_index,
            drives: listing.drives.clone(),
            root_ids,
            built_at: Utc::now(),
        },
        instructions,
    })
}

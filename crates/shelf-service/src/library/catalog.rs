//! Normalization of raw listing records into catalogued resources.

use tracing::debug;

use shelf_core::error::AppError;
use shelf_core::result::AppResult;
use shelf_core::types::RawResource;
use shelf_drive::LibraryListing;
use shelf_entity::resource::{Resource, ResourceType};
use shelf_entity::snapshot::{Catalog, TagIndex};

use crate::naming::{clean_name, determine_sort, parse_tags, slugify};

/// Slug that marks a root-level folder as the trash can.
pub const TRASH_SLUG: &str = "trash";

/// Catalogued resources plus the order they were listed in.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuild {
    /// Resources keyed by id.
    pub catalog: Catalog,
    /// Ids in listing order, each once.
    pub order: Vec<String>,
    /// Tag to resource ids.
    pub tag_index: TagIndex,
}

/// Catalog every record of `listing`.
///
/// A record that appears under more than one root keeps its first
/// occurrence. A record without `name` or `parents` fails the whole build.
pub fn build_catalog(listing: &LibraryListing) -> AppResult<CatalogBuild> {
    let root_ids = listing.root_ids();
    let mut build = CatalogBuild::default();

    for raw in listing.roots.iter().flat_map(|root| root.resources.iter()) {
        if build.catalog.contains_key(&raw.id) {
            debug!(id = %raw.id, "Skipping repeated record");
            continue;
        }

        let resource = normalize(raw, &root_ids)?;
        for tag in &resource.tags {
            build.tag_index.insert(tag, &resource.id);
        }
        build.order.push(resource.id.clone());
        build.catalog.insert(resource.id.clone(), resource);
    }

    Ok(build)
}

/// Turn one raw record into a resource without path information.
pub fn normalize(raw: &RawResource, root_ids: &[String]) -> AppResult<Resource> {
    let name = raw.name.as_deref().ok_or_else(|| {
        AppError::contract_violation(format!("Listed item {} has no name", raw.id))
    })?;
    let parents = raw.parents.clone().ok_or_else(|| {
        AppError::contract_violation(format!("Listed item {} ({name}) has no parents", raw.id))
    })?;

    let pretty_name = clean_name(name);
    let slug = slugify(&pretty_name);
    let is_trash_can = slug == TRASH_SLUG && parents.iter().any(|p| root_ids.contains(p));

    Ok(Resource {
        id: raw.id.clone(),
        name: name.to_string(),
        mime_type: raw.mime_type.clone(),
        resource_type: ResourceType::from_mime_type(&raw.mime_type),
        tags: parse_tags(name),
        sort: determine_sort(name, &pretty_name),
        pretty_name,
        slug,
        parents,
        is_home: false,
        is_trash_can,
        in_trash: is_trash_can,
        render_in_library: false,
        path: None,
        library_path: None,
        web_view_link: raw.web_view_link.clone(),
        created_time: raw.created_time,
        modified_time: raw.modified_time,
        last_modifying_user: raw.last_modifying_user.clone(),
        folder: None,
        ancestors: Vec::new(),
        top_level_folder: None,
    })
}

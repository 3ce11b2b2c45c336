//! Parent to children adjacency, home file selection and org synthesis.

use shelf_core::types::DriveInfo;
use shelf_entity::resource::{Resource, ResourceType};
use shelf_entity::snapshot::Catalog;
use shelf_entity::tree::Adjacency;

use crate::naming::{drive_slug, matches_home};

/// Build the adjacency map by walking `order` once.
///
/// For every parent of a resource, the resource becomes that parent's home
/// if its name carries the home marker and the parent has no home yet;
/// otherwise it is appended to the parent's children. Resources chosen as
/// any parent's home get `is_home` set.
pub fn build_adjacency(catalog: &mut Catalog, order: &[String]) -> Adjacency {
    let mut adjacency = Adjacency::new();

    for id in order {
        let Some(resource) = catalog.get_mut(id) else {
            continue;
        };
        let is_home_candidate = matches_home(&resource.name);

        for parent_id in &resource.parents {
            let entry = adjacency.entry(parent_id.clone()).or_default();
            if is_home_candidate && entry.home.is_none() {
                entry.home = Some(id.clone());
                resource.is_home = true;
            } else {
                entry.children.push(id.clone());
            }
        }
    }

    adjacency
}

/// Add the virtual organisation root and one resource per team drive.
///
/// Only drives that have at least one listed item become children of the
/// root; they keep the drive listing order.
pub fn synthesize_org(
    catalog: &mut Catalog,
    adjacency: &mut Adjacency,
    org_name: &str,
    drives: &[DriveInfo],
) {
    catalog.insert(
        org_name.to_string(),
        synthetic(org_name, org_name, org_name.to_string(), ResourceType::Org, Vec::new()),
    );

    let mut org_children = Vec::new();
    for drive in drives {
        if !adjacency.contains_key(&drive.id) {
            continue;
        }
        org_children.push(drive.id.clone());
        catalog.insert(
            drive.id.clone(),
            synthetic(
                &drive.id,
                &drive.name,
                drive_slug(&drive.name),
                ResourceType::TeamDrive,
                vec![org_name.to_string()],
            ),
        );
    }

    let entry = adjacency.entry(org_name.to_string()).or_default();
    entry.children = org_children;
    entry.home = None;
}

fn synthetic(
    id: &str,
    name: &str,
    slug: String,
    resource_type: ResourceType,
    parents: Vec<String>,
) -> Resource {
    Resource {
        id: id.to_string(),
        name: name.to_string(),
        parents,
        mime_type: resource_type.as_str().to_string(),
        resource_type,
        pretty_name: name.to_string(),
        slug,
        tags: Vec::new(),
        sort: String::new(),
        is_home: false,
        is_trash_can: false,
        in_trash: false,
        render_in_library: false,
        path: None,
        library_path: None,
        web_view_link: None,
        created_time: None,
        modified_time: None,
        last_modifying_user: None,
        folder: None,
        ancestors: Vec::new(),
        top_level_folder: None,
    }
}

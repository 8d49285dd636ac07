//! Endpoint tree for navigation menus
//!
//! Endpoints arrive as a flat list. An endpoint whose path extends another
//! endpoint's path by whole segments is shown under it, indented once per
//! such ancestor and labelled with the remaining part of its path.

use crate::types::{ApiEndPoint, ApiEndPointWithOperationsListItem, ApiOperationListItem};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOperation {
    pub id: String,
    pub method: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub path: String,
    pub label: String,
    pub indent: usize,
    pub operations: Vec<NavigationOperation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationTree {
    pub items: Vec<NavigationItem>,
}

fn trimmed(path: &str) -> &str {
    path.trim_end_matches('/')
}

/// Whether `ancestor` is a proper prefix of `path` ending on a segment boundary
fn is_segment_prefix(ancestor: &str, path: &str) -> bool {
    let ancestor = trimmed(ancestor);
    if ancestor.is_empty() {
        return false;
    }
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
}

impl NavigationTree {
    pub fn from_endpoints(endpoints: &[ApiEndPoint]) -> Self {
        let items: Vec<ApiEndPointWithOperationsListItem> = endpoints
            .iter()
            .map(|endpoint| ApiEndPointWithOperationsListItem {
                id: endpoint.id.clone(),
                path: endpoint.path.clone(),
                name: endpoint.name.clone(),
                operations: endpoint
                    .operations
                    .iter()
                    .map(|op| ApiOperationListItem {
                        id: op.id.clone(),
                        method: op.method.clone(),
                        name: op.name.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self::from_list(&items)
    }

    pub fn from_list(endpoints: &[ApiEndPointWithOperationsListItem]) -> Self {
        let items = endpoints
            .iter()
            .map(|endpoint| {
                // the same path listed twice, or with a trailing slash, counts once
                let ancestors: BTreeSet<&str> = endpoints
                    .iter()
                    .map(|other| other.path.as_str())
                    .filter(|other| is_segment_prefix(other, &endpoint.path))
                    .map(trimmed)
                    .collect();
                let closest = ancestors.iter().max_by_key(|a| a.len());

                let label = match (&endpoint.name, closest) {
                    (Some(name), _) if !name.is_empty() => name.clone(),
                    (_, Some(parent)) => endpoint.path[parent.len()..].to_string(),
                    _ => endpoint.path.clone(),
                };

                NavigationItem {
                    id: endpoint.id.clone(),
                    path: endpoint.path.clone(),
                    label,
                    indent: ancestors.len(),
                    operations: endpoint
                        .operations
                        .iter()
                        .map(|op| NavigationOperation {
                            id: op.id.clone(),
                            method: op.method.to_ascii_uppercase(),
                            label: op.name.clone().unwrap_or_else(|| op.method.to_ascii_uppercase()),
                        })
                        .collect(),
                }
            })
            .collect();
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Endpoint item listing the operation
    pub fn endpoint_of(&self, operation_id: &str) -> Option<&NavigationItem> {
        self.items
            .iter()
            .find(|item| item.operations.iter().any(|op| op.id == operation_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(path: &str, name: Option<&str>, methods: &[&str]) -> ApiEndPointWithOperationsListItem {
        ApiEndPointWithOperationsListItem {
            id: format!("#{path}"),
            path: path.to_string(),
            name: name.map(String::from),
            operations: methods
                .iter()
                .map(|method| ApiOperationListItem {
                    id: format!("#{path}/{method}"),
                    method: method.to_string(),
                    name: None,
                })
                .collect(),
        }
    }

    #[test]
    fn nests_by_path_segments() {
        let tree = NavigationTree::from_list(&[
            endpoint("/pets", None, &["get", "post"]),
            endpoint("/pets/{petId}", None, &["get"]),
            endpoint("/pets/{petId}/photos", None, &[]),
            endpoint("/petsitters", None, &[]),
        ]);
        let layout: Vec<(&str, usize)> = tree
            .items
            .iter()
            .map(|item| (item.label.as_str(), item.indent))
            .collect();
        assert_eq!(
            layout,
            [("/pets", 0), ("/{petId}", 1), ("/photos", 2), ("/petsitters", 0)]
        );
        assert_eq!(tree.items[0].operations[1].method, "POST");
    }

    #[test]
    fn names_win_over_relative_paths() {
        let tree = NavigationTree::from_list(&[
            endpoint("/users", None, &[]),
            endpoint("/users/me", Some("Current user"), &[]),
        ]);
        assert_eq!(tree.items[1].label, "Current user");
        assert_eq!(tree.items[1].indent, 1);
    }

    #[test]
    fn root_and_trailing_slashes() {
        let tree = NavigationTree::from_list(&[
            endpoint("/", None, &[]),
            endpoint("/orders/", None, &[]),
            endpoint("/orders/{id}", None, &["delete"]),
        ]);
        assert_eq!(tree.items[0].indent, 0);
        assert_eq!(tree.items[1].indent, 0);
        assert_eq!(tree.items[2].label, "/{id}");
        assert_eq!(tree.items[2].indent, 1);
        assert_eq!(
            tree.endpoint_of("#/orders/{id}/delete").map(|item| item.path.as_str()),
            Some("/orders/{id}")
        );
    }

    #[test]
    fn repeated_ancestor_paths_count_once() {
        let tree = NavigationTree::from_list(&[
            endpoint("/orders", None, &["get"]),
            endpoint("/orders/", None, &["post"]),
            endpoint("/orders", None, &[]),
            endpoint("/orders/{id}", None, &["get"]),
        ]);
        let item = &tree.items[3];
        assert_eq!(item.indent, 1);
        assert_eq!(item.label, "/{id}");
    }
}

//! What a documentation view shows and the lifecycle of its query
//!
//! A view sits in `Idle` until something is selected, moves to `Querying`
//! whenever the selection or the graph changes and to `Rendered` once the
//! query completes. Each query is issued a [`QueryTicket`]; completing an
//! outdated ticket is ignored, so a slow query never overwrites the result of
//! a newer one.

use crate::error::{AmfError, Result};
use crate::store::AmfStore;
use crate::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryPhase {
    #[default]
    Idle,
    Querying,
    Rendered,
}

/// Kind of the selected domain element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainType {
    Summary,
    Resource,
    Operation,
    Schema,
    Security,
    Documentation,
}

impl DomainType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "summary" => Some(Self::Summary),
            "resource" | "endpoint" => Some(Self::Resource),
            "operation" | "method" => Some(Self::Operation),
            "schema" | "type" => Some(Self::Schema),
            "security" => Some(Self::Security),
            "documentation" => Some(Self::Documentation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub domain_id: String,
    pub domain_type: DomainType,
    /// Operation to highlight inside a resource view
    pub operation_id: Option<String>,
}

impl Selection {
    pub fn new(domain_id: impl Into<String>, domain_type: DomainType) -> Self {
        Self {
            domain_id: domain_id.into(),
            domain_type,
            operation_id: None,
        }
    }

    pub fn with_operation(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }
}

/// Result of querying the store for a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectedView {
    Summary(ApiSummary),
    Resource(ApiEndPoint),
    Operation(ApiOperation),
    Schema(ApiShapeUnion),
    Security(ApiSecurityScheme),
    Documentation(ApiDocumentation),
}

impl SelectedView {
    /// Ask the store for whatever `selection` points at.
    pub fn query(store: &AmfStore, selection: &Selection) -> Result<Self> {
        let id = selection.domain_id.as_str();
        Ok(match selection.domain_type {
            DomainType::Summary => Self::Summary(store.api_summary()?),
            DomainType::Resource => Self::Resource(store.get_endpoint(id)?),
            DomainType::Operation => Self::Operation(store.get_operation(id)?),
            DomainType::Schema => Self::Schema(store.get_shape(id)?),
            DomainType::Security => Self::Security(store.get_security_scheme(id)?),
            DomainType::Documentation => Self::Documentation(store.get_documentation(id)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct SelectionState<T = SelectedView> {
    selection: Option<Selection>,
    phase: QueryPhase,
    generation: u64,
    view: Option<T>,
}

impl<T> Default for SelectionState<T> {
    fn default() -> Self {
        Self {
            selection: None,
            phase: QueryPhase::Idle,
            generation: 0,
            view: None,
        }
    }
}

impl<T> SelectionState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn view(&self) -> Option<&T> {
        self.view.as_ref()
    }

    fn issue(&mut self) -> QueryTicket {
        self.generation += 1;
        self.phase = QueryPhase::Querying;
        QueryTicket {
            generation: self.generation,
        }
    }

    /// Change the selection and start a query for it.
    pub fn select(&mut self, selection: Selection) -> QueryTicket {
        self.selection = Some(selection);
        self.issue()
    }

    /// Re-query the current selection after the graph was replaced.
    ///
    /// Returns `None` while nothing is selected.
    pub fn graph_changed(&mut self) -> Option<QueryTicket> {
        self.selection.as_ref()?;
        Some(self.issue())
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a query result. Returns `false` when the ticket is outdated and
    /// the result was dropped.
    pub fn complete(&mut self, ticket: QueryTicket, result: Result<T>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping result of outdated query {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.view = match result {
            Ok(view) => Some(view),
            Err(err) => {
                log::error!("{}", query_failure(self.selection.as_ref(), &err));
                None
            }
        };
        self.phase = QueryPhase::Rendered;
        true
    }
}

fn query_failure(selection: Option<&Selection>, err: &AmfError) -> String {
    match selection {
        Some(selection) => format!(
            "unable to query {:?} {}: {err}",
            selection.domain_type, selection.domain_id
        ),
        None => format!("unable to query the current selection: {err}"),
    }
}

impl SelectionState<SelectedView> {
    /// Select and query synchronously against `store`.
    pub fn show(&mut self, store: &AmfStore, selection: Selection) -> Option<&SelectedView> {
        let ticket = self.select(selection.clone());
        self.complete(ticket, SelectedView::query(store, &selection));
        self.view()
    }
}

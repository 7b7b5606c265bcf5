//! # Inventory Query Engine
//!
//! Read path: classify the scope, sync when needed, re-read, mask.
//! Nothing leaves this module unmasked.

use std::sync::Arc;

use serde::Deserialize;

use crate::machine::{is_default, mask, mask_all, Machine, MachineId};
use crate::observability::{Event, MetricsRegistry};
use crate::store::{FieldFilter, MachineStore, PageQuery, SortSpec};

use super::errors::InventoryResult;
use super::pagination::{parse_int, Paginator};
use super::sync::SyncCoordinator;

/// Raw list parameters as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRequest {
    /// Empty selects every owner
    pub owner: String,
    /// 1-indexed page number
    #[serde(rename = "p")]
    pub page: String,
    pub page_size: String,
    pub field: String,
    pub value: String,
    pub sort_field: String,
    pub sort_order: String,
}

impl ListRequest {
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            ..Default::default()
        }
    }

    pub fn with_page(mut self, page: impl Into<String>, page_size: impl Into<String>) -> Self {
        self.page = page.into();
        self.page_size = page_size.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field = field.into();
        self.value = value.into();
        self
    }

    pub fn with_sort(mut self, sort_field: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_field = sort_field.into();
        self.sort_order = sort_order.into();
        self
    }

    /// Pagination applies only when both page and page size are present
    pub fn is_paged(&self) -> bool {
        !self.page.is_empty() && !self.page_size.is_empty()
    }
}

/// Validated paging parameters
#[derive(Debug, Clone)]
struct PagePlan {
    page: i64,
    page_size: i64,
    filter: Option<FieldFilter>,
    sort: SortSpec,
}

impl PagePlan {
    fn parse(request: &ListRequest) -> InventoryResult<Self> {
        Ok(Self {
            page_size: parse_int("pageSize", &request.page_size)?,
            page: parse_int("p", &request.page)?,
            filter: FieldFilter::parse(&request.field, &request.value)?,
            sort: SortSpec::parse(&request.sort_field, &request.sort_order)?,
        })
    }
}

/// Masked list result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineList {
    /// Every machine in scope
    All(Vec<Machine>),
    /// One page plus the number of matching records across all pages
    Page { machines: Vec<Machine>, total: usize },
}

impl MachineList {
    pub fn machines(&self) -> &[Machine] {
        match self {
            MachineList::All(machines) => machines,
            MachineList::Page { machines, .. } => machines,
        }
    }
}

pub struct QueryEngine {
    store: Arc<dyn MachineStore>,
    sync: Arc<SyncCoordinator>,
    metrics: Arc<MetricsRegistry>,
}

impl QueryEngine {
    pub fn new(
        store: Arc<dyn MachineStore>,
        sync: Arc<SyncCoordinator>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            store,
            sync,
            metrics,
        }
    }

    /// List an owner's machines, synced and masked.
    ///
    /// Parameters are validated before the store or cloud is touched.
    pub fn get_machines(&self, request: &ListRequest) -> InventoryResult<MachineList> {
        let plan = if request.is_paged() {
            Some(PagePlan::parse(request)?)
        } else {
            None
        };
        let owner = request.owner.as_str();

        self.sync.sync_if_needed(owner)?;

        let Some(plan) = plan else {
            let machines = self.store.list_machines(owner)?;
            return Ok(MachineList::All(self.disclose(owner, &machines)));
        };

        let total = self.store.count_machines(owner, plan.filter.as_ref())?;
        let paginator = Paginator::new(plan.page, plan.page_size, total);
        let query = PageQuery::new(paginator.offset(), paginator.per_page())
            .with_filter(plan.filter)
            .with_sort(plan.sort);

        tracing::debug!(
            owner,
            page = paginator.page(),
            pages = paginator.page_count(),
            total = paginator.total(),
            "page resolved"
        );

        let machines = self.store.list_machines_page(owner, &query)?;
        Ok(MachineList::Page {
            machines: self.disclose(owner, &machines),
            total: paginator.total(),
        })
    }

    /// Fetch one machine by `owner/name`, masked.
    ///
    /// Default machines are returned without a sync. Real machines always
    /// trigger a sync of their owner's scope and are re-read afterwards; a
    /// sync failure fails the request.
    pub fn get_machine(&self, id: &str) -> InventoryResult<Machine> {
        let id = MachineId::parse(id)?;
        let machine = self.store.get_machine(&id)?;

        if is_default(&machine) {
            return Ok(self.disclose_one(&id, &machine));
        }

        self.sync.sync(&id.owner)?;

        let machine = self.store.get_machine(&id)?;
        Ok(self.disclose_one(&id, &machine))
    }

    fn disclose(&self, owner: &str, machines: &[Machine]) -> Vec<Machine> {
        self.metrics.add_records_masked(machines.len() as u64);
        tracing::debug!(event = %Event::MachinesServed, owner, count = machines.len());
        mask_all(machines)
    }

    fn disclose_one(&self, id: &MachineId, machine: &Machine) -> Machine {
        self.metrics.add_records_masked(1);
        tracing::debug!(event = %Event::MachinesServed, id = %id, count = 1);
        mask(machine)
    }
}

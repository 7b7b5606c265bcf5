//! # Store Query Shapes
//!
//! Single-field equality filter, sort order and page window shared by
//! every store implementation.

use std::cmp::Ordering;

use crate::machine::Machine;

use super::errors::{StoreError, StoreResult};

/// Sort field used when the caller gives none
pub const DEFAULT_SORT_FIELD: &str = "createdTime";

/// Sort order value selecting ascending order; anything else is descending
pub const ASCEND: &str = "ascend";

/// Keep records whose `field` equals `value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    /// Build a filter from raw request values.
    ///
    /// Returns `None` unless both field and value are non-empty.
    pub fn parse(field: &str, value: &str) -> StoreResult<Option<Self>> {
        if field.is_empty() || value.is_empty() {
            return Ok(None);
        }
        check_field(field)?;
        Ok(Some(Self {
            field: field.to_string(),
            value: value.to_string(),
        }))
    }

    pub fn matches(&self, machine: &Machine) -> bool {
        machine.field(&self.field).as_deref() == Some(self.value.as_str())
    }
}

/// Ordering applied to a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD.to_string(),
            ascending: false,
        }
    }
}

impl SortSpec {
    /// Build a sort from raw request values
    pub fn parse(sort_field: &str, sort_order: &str) -> StoreResult<Self> {
        let field = if sort_field.is_empty() {
            DEFAULT_SORT_FIELD
        } else {
            sort_field
        };
        check_field(field)?;
        Ok(Self {
            field: field.to_string(),
            ascending: sort_order == ASCEND,
        })
    }

    /// Compare two records; ties fall back to `owner/name`
    pub fn compare(&self, a: &Machine, b: &Machine) -> Ordering {
        let cmp = a.sort_key(&self.field).cmp(&b.sort_key(&self.field));
        let cmp = if self.ascending { cmp } else { cmp.reverse() };
        cmp.then_with(|| (&a.owner, &a.name).cmp(&(&b.owner, &b.name)))
    }
}

/// A filtered, sorted window over one owner's records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub offset: usize,
    pub limit: usize,
    pub filter: Option<FieldFilter>,
    pub sort: SortSpec,
}

impl PageQuery {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit,
            filter: None,
            sort: SortSpec::default(),
        }
    }

    pub fn with_filter(mut self, filter: Option<FieldFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Run the query over an owner-scoped record set
    pub fn apply(&self, machines: Vec<Machine>) -> Vec<Machine> {
        let mut machines: Vec<Machine> = machines
            .into_iter()
            .filter(|m| self.filter.as_ref().map_or(true, |f| f.matches(m)))
            .collect();

        machines.sort_by(|a, b| self.sort.compare(a, b));

        machines
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

/// Whether `owner` selects `machine`; the empty owner selects everything
pub fn owner_matches(owner: &str, machine: &Machine) -> bool {
    owner.is_empty() || machine.owner == owner
}

fn check_field(field: &str) -> StoreResult<()> {
    match Machine::default().field(field) {
        Some(_) => Ok(()),
        None => Err(StoreError::UnknownField(field.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(name: &str, created: &str, region: &str) -> Machine {
        Machine {
            owner: "alice".to_string(),
            name: name.to_string(),
            created_time: created.to_string(),
            region: region.to_string(),
            ..Default::default()
        }
    }

    fn names(machines: &[Machine]) -> Vec<&str> {
        machines.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_filter_requires_field_and_value() {
        assert!(FieldFilter::parse("", "x").unwrap().is_none());
        assert!(FieldFilter::parse("region", "").unwrap().is_none());
        assert!(FieldFilter::parse("region", "eu").unwrap().is_some());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert_eq!(
            FieldFilter::parse("bogus", "x"),
            Err(StoreError::UnknownField("bogus".to_string()))
        );
        assert!(SortSpec::parse("remotePassword", "ascend").is_err());
    }

    #[test]
    fn test_default_sort_is_created_time_desc() {
        let sort = SortSpec::parse("", "").unwrap();
        assert_eq!(sort, SortSpec::default());

        let query = PageQuery::new(0, 10);
        let result = query.apply(vec![
            machine("a", "2024-01-01", ""),
            machine("b", "2024-03-01", ""),
            machine("c", "2024-02-01", ""),
        ]);
        assert_eq!(names(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ascend_sort_with_filter_and_window() {
        let query = PageQuery::new(1, 2)
            .with_filter(FieldFilter::parse("region", "eu").unwrap())
            .with_sort(SortSpec::parse("name", ASCEND).unwrap());

        let result = query.apply(vec![
            machine("d", "", "eu"),
            machine("a", "", "eu"),
            machine("b", "", "us"),
            machine("c", "", "eu"),
        ]);
        assert_eq!(names(&result), vec!["c", "d"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let query = PageQuery::new(0, 10).with_sort(SortSpec::parse("region", "descend").unwrap());
        let result = query.apply(vec![machine("z", "", "eu"), machine("a", "", "eu")]);
        assert_eq!(names(&result), vec!["a", "z"]);
    }

    #[test]
    fn test_remote_port_sorts_numerically() {
        let ports = [22, 3389, 80, 9];
        let machines = ports
            .iter()
            .enumerate()
            .map(|(i, port)| Machine {
                remote_port: *port,
                ..machine(&format!("m{}", i), "", "")
            })
            .collect();

        let query = PageQuery::new(0, 10).with_sort(SortSpec::parse("remotePort", ASCEND).unwrap());
        let sorted: Vec<i32> = query.apply(machines).iter().map(|m| m.remote_port).collect();
        assert_eq!(sorted, vec![9, 22, 80, 3389]);
    }
}

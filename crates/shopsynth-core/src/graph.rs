use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::schema::{DatasetSchema, TableName};

/// Report for table dependency ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGraphReport {
    pub nodes: usize,
    pub edges: usize,
    pub topo_order: Option<Vec<TableName>>,
    pub cycle: Option<Vec<TableName>>,
}

/// Build a deterministic dependency report for a dataset schema.
///
/// Ties between tables that become ready at the same time are broken by
/// canonical table order, so the built-in schema always yields
/// [`TableName::ALL`].
pub fn build_dependency_graph_report(schema: &DatasetSchema) -> DependencyGraphReport {
    let graph = build_adjacency(schema);
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();

    match toposort(&graph) {
        Ok(order) => DependencyGraphReport {
            nodes,
            edges,
            topo_order: Some(order),
            cycle: None,
        },
        Err(cycle) => DependencyGraphReport {
            nodes,
            edges,
            topo_order: None,
            cycle: Some(cycle),
        },
    }
}

/// Edges point from a parent table to the tables that depend on it.
fn build_adjacency(schema: &DatasetSchema) -> BTreeMap<TableName, BTreeSet<TableName>> {
    let mut graph: BTreeMap<TableName, BTreeSet<TableName>> = BTreeMap::new();

    for table in &schema.tables {
        graph.entry(table.name).or_default();
        for dep in table.dependencies() {
            graph.entry(dep).or_default().insert(table.name);
        }
    }

    graph
}

fn toposort(
    graph: &BTreeMap<TableName, BTreeSet<TableName>>,
) -> Result<Vec<TableName>, Vec<TableName>> {
    let mut indegree: BTreeMap<TableName, usize> =
        graph.keys().map(|node| (*node, 0)).collect();

    for targets in graph.values() {
        for target in targets {
            *indegree.entry(*target).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<TableName> = indegree
        .iter()
        .filter_map(|(node, count)| (*count == 0).then_some(*node))
        .collect();

    let mut order = Vec::with_capacity(graph.len());

    while let Some(node) = ready.pop_first() {
        order.push(node);

        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(*target);
                    }
                }
            }
        }
    }

    if order.len() == graph.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter_map(|(node, count)| (count > 0).then_some(node))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnType, ForeignKey, Table};

    fn table(name: TableName, parents: &[TableName]) -> Table {
        Table {
            name,
            primary_key: "id".to_string(),
            columns: vec![Column {
                ordinal_position: 1,
                name: "id".to_string(),
                column_type: ColumnType::Integer,
            }],
            foreign_keys: parents
                .iter()
                .map(|parent| ForeignKey {
                    column: "id".to_string(),
                    referenced_table: *parent,
                    referenced_column: "id".to_string(),
                    sourced_from: None,
                })
                .collect(),
            lookups: Vec::new(),
        }
    }

    #[test]
    fn ecommerce_order_matches_canonical_order() {
        let report = build_dependency_graph_report(&DatasetSchema::ecommerce());
        assert_eq!(report.topo_order, Some(TableName::ALL.to_vec()));
        assert!(report.cycle.is_none());
        assert_eq!(report.nodes, 10);
        assert_eq!(report.edges, 11);
    }

    #[test]
    fn toposort_orders_dependencies() {
        let schema = DatasetSchema {
            tables: vec![
                table(TableName::Orders, &[TableName::Customers]),
                table(TableName::Customers, &[]),
            ],
        };

        let order = build_dependency_graph_report(&schema)
            .topo_order
            .expect("expected toposort");
        assert_eq!(order, vec![TableName::Customers, TableName::Orders]);
    }

    #[test]
    fn toposort_reports_cycle() {
        let schema = DatasetSchema {
            tables: vec![
                table(TableName::Orders, &[TableName::Payments]),
                table(TableName::Payments, &[TableName::Orders]),
                table(TableName::Customers, &[]),
            ],
        };

        let report = build_dependency_graph_report(&schema);
        assert!(report.topo_order.is_none());
        let cycle = report.cycle.expect("cycle reported");
        assert!(cycle.contains(&TableName::Orders));
        assert!(cycle.contains(&TableName::Payments));
        assert!(!cycle.contains(&TableName::Customers));
    }
}

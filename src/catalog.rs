//! Schema Catalog - static description of the procurement database tables
//!
//! The catalog is hand-written and loaded once at startup. It is the single
//! source of truth for which tables exist: the resolver only ever surfaces
//! names found here, and the dataset browser validates lookups against it.

use crate::error::{HugoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaTable {
    pub name: String,
    pub description: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    tables: Vec<SchemaTable>,
    by_name: HashMap<String, usize>,
}

impl SchemaCatalog {
    pub fn new(tables: Vec<SchemaTable>) -> Self {
        let by_name = tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();
        Self { tables, by_name }
    }

    /// The procurement database schema served by the backend.
    pub fn procurement() -> Self {
        fn table(name: &str, description: &str, columns: &[&str]) -> SchemaTable {
            SchemaTable {
                name: name.to_string(),
                description: description.to_string(),
                columns: columns.iter().map(|c| c.to_string()).collect(),
            }
        }

        Self::new(vec![
            table(
                "material_master",
                "This table provides detailed information about each part, including its name, type, models it is used in, dimensions, weight, and any related parts.",
                &["part_id", "part_name", "part_type", "used_in_models", "weight", "blocked_parts", "successor_parts", "comment"],
            ),
            table(
                "stock_levels",
                "This table provides the current inventory levels of parts in different warehouse locations.",
                &["part_id", "part_name", "location", "quantity_available"],
            ),
            table(
                "stock_movements",
                "This table records transactions related to inventory movements, including inbound and outbound quantities.",
                &["date", "part_id", "type", "quantity"],
            ),
            table(
                "dispatch_parameters",
                "This table contains information about the minimum stock levels, reorder quantities, and reorder intervals for different parts.",
                &["part_id", "min_stock_level", "reorder_quantity", "reorder_interval_days"],
            ),
            table(
                "material_orders",
                "This table records purchase orders for parts, including order details, supplier information, and delivery status.",
                &["order_id", "part_id", "quantity_ordered", "order_date", "expected_delivery_date", "supplier_id", "status", "actual_delivered_at"],
            ),
            table(
                "sales_orders",
                "This table contains information about sales orders, including the model, version, quantity, order type, and dates related to the order process.",
                &["sales_order_id", "model", "version", "quantity", "order_type", "requested_date", "created_at", "accepted_request_date"],
            ),
            table(
                "suppliers",
                "This table contains information about suppliers, including pricing, lead times, minimum order quantities, and reliability ratings for different parts.",
                &["supplier_id", "part_id", "price_per_unit", "lead_time_days", "min_order_qty", "reliability_rating"],
            ),
            table(
                "specs",
                "This table contains information about the required parts to assemble a product, including the part name and the quantity required.",
                &["product_id", "product_name", "part_id", "quantity"],
            ),
        ])
    }

    pub fn tables(&self) -> &[SchemaTable] {
        &self.tables
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SchemaTable> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }

    pub fn resolve(&self, name: &str) -> Result<&SchemaTable> {
        self.get(name)
            .ok_or_else(|| HugoError::UnknownTable(name.to_string()))
    }

    /// Render the catalog as the schema block embedded in resolver prompts.
    pub fn describe(&self) -> String {
        let mut out = String::from(
            "We have a procurement database with the following tables:\n",
        );
        for (i, t) in self.tables.iter().enumerate() {
            let _ = write!(
                out,
                "\n**Table {}: {}**\nDescription: {}\nColumns:\n",
                i + 1,
                t.name,
                t.description
            );
            for col in &t.columns {
                let _ = writeln!(out, "- {}", col);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procurement_catalog_has_all_tables() {
        let catalog = SchemaCatalog::procurement();
        let names = catalog.names();
        for expected in [
            "material_master",
            "stock_levels",
            "stock_movements",
            "dispatch_parameters",
            "material_orders",
            "sales_orders",
            "suppliers",
            "specs",
        ] {
            assert!(names.contains(&expected), "missing table {}", expected);
        }
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn resolve_unknown_table_errors() {
        let catalog = SchemaCatalog::procurement();
        let err = catalog.resolve("warehouse_robots").unwrap_err();
        assert!(matches!(err, HugoError::UnknownTable(_)));
    }

    #[test]
    fn describe_renders_every_table_and_column() {
        let catalog = SchemaCatalog::procurement();
        let rendered = catalog.describe();
        assert!(rendered.contains("**Table 1: material_master**"));
        assert!(rendered.contains("- reliability_rating"));
        assert!(rendered.contains("Description: This table provides the current inventory levels"));
    }
}

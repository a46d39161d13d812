use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::types::InventoryItem;
use crate::error::ApiError;
use crate::usecase::resource::{
    Changes, Draft, NAME_LEN, optional_text, replace, replace_opt, replace_opt_text, replace_text,
    required, required_text,
};

const CATEGORY_LEN: usize = 50;
const UNIT_LEN: usize = 20;
const SUPPLIER_LEN: usize = 100;

/// Body of `POST /api/inventory` and `PUT /api/inventory/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub min_quantity: Option<f64>,
    pub unit: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
}

impl Draft<InventoryItem> for InventoryInput {
    fn into_record(self, owner: Uuid, now: DateTime<Utc>) -> Result<InventoryItem, ApiError> {
        Ok(InventoryItem {
            id: Uuid::now_v7(),
            user_id: owner,
            field_id: self.field_id,
            field_name: None,
            name: required_text(self.name, "name", NAME_LEN)?,
            category: required_text(self.category, "category", CATEGORY_LEN)?,
            quantity: required(self.quantity, "quantity")?,
            min_quantity: self.min_quantity.unwrap_or(0.0),
            unit: required_text(self.unit, "unit", UNIT_LEN)?,
            supplier: optional_text(self.supplier, "supplier", SUPPLIER_LEN)?,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Changes<InventoryItem> for InventoryInput {
    fn apply(self, item: &mut InventoryItem) -> Result<(), ApiError> {
        replace_text(&mut item.name, self.name, "name", NAME_LEN)?;
        replace_text(&mut item.category, self.category, "category", CATEGORY_LEN)?;
        replace(&mut item.quantity, self.quantity);
        replace(&mut item.min_quantity, self.min_quantity);
        replace_text(&mut item.unit, self.unit, "unit", UNIT_LEN)?;
        replace_opt_text(&mut item.supplier, self.supplier, "supplier", SUPPLIER_LEN)?;
        replace_opt(&mut item.notes, self.notes);
        replace_opt(&mut item.field_id, self.field_id);
        Ok(())
    }
}

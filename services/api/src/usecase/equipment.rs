use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::types::Equipment;
use crate::error::ApiError;
use crate::usecase::resource::{
    Changes, Draft, NAME_LEN, STATUS_LEN, optional_text, replace_opt, replace_opt_text,
    replace_text, required_text, text_or,
};

pub const DEFAULT_EQUIPMENT_STATUS: &str = "available";

const KIND_LEN: usize = 50;
const BRAND_LEN: usize = 50;
const MODEL_LEN: usize = 50;
const SERIAL_LEN: usize = 100;

/// Body of `POST /api/equipment` and `PUT /api/equipment/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct EquipmentInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
}

impl Draft<Equipment> for EquipmentInput {
    fn into_record(self, owner: Uuid, now: DateTime<Utc>) -> Result<Equipment, ApiError> {
        Ok(Equipment {
            id: Uuid::now_v7(),
            user_id: owner,
            field_id: self.field_id,
            field_name: None,
            name: required_text(self.name, "name", NAME_LEN)?,
            kind: optional_text(self.kind, "type", KIND_LEN)?,
            brand: optional_text(self.brand, "brand", BRAND_LEN)?,
            model: optional_text(self.model, "model", MODEL_LEN)?,
            year: self.year,
            serial_number: optional_text(self.serial_number, "serial_number", SERIAL_LEN)?,
            purchase_date: self.purchase_date,
            status: text_or(self.status, DEFAULT_EQUIPMENT_STATUS, "status", STATUS_LEN)?,
            last_maintenance: self.last_maintenance,
            next_maintenance: self.next_maintenance,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Changes<Equipment> for EquipmentInput {
    fn apply(self, equipment: &mut Equipment) -> Result<(), ApiError> {
        replace_text(&mut equipment.name, self.name, "name", NAME_LEN)?;
        replace_opt_text(&mut equipment.kind, self.kind, "type", KIND_LEN)?;
        replace_opt_text(&mut equipment.brand, self.brand, "brand", BRAND_LEN)?;
        replace_opt_text(&mut equipment.model, self.model, "model", MODEL_LEN)?;
        replace_opt(&mut equipment.year, self.year);
        replace_opt_text(
            &mut equipment.serial_number,
            self.serial_number,
            "serial_number",
            SERIAL_LEN,
        )?;
        replace_opt(&mut equipment.purchase_date, self.purchase_date);
        replace_text(&mut equipment.status, self.status, "status", STATUS_LEN)?;
        replace_opt(&mut equipment.last_maintenance, self.last_maintenance);
        replace_opt(&mut equipment.next_maintenance, self.next_maintenance);
        replace_opt(&mut equipment.notes, self.notes);
        replace_opt(&mut equipment.field_id, self.field_id);
        Ok(())
    }
}

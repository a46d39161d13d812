use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::types::Field;
use crate::error::ApiError;
use crate::usecase::resource::{
    Changes, Draft, NAME_LEN, STATUS_LEN, optional_text, replace, replace_opt, replace_opt_text,
    replace_text, required, required_text, text_or,
};

pub const DEFAULT_FIELD_STATUS: &str = "active";

const CROP_LEN: usize = 100;
const LOCATION_LEN: usize = 200;
const CITY_LEN: usize = 100;
const NEXT_ACTION_LEN: usize = 200;

/// Body of `POST /api/fields` and `PUT /api/fields/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct FieldInput {
    pub name: Option<String>,
    pub crop: Option<String>,
    pub area: Option<f64>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub size: Option<f64>,
    pub status: Option<String>,
    pub next_action: Option<String>,
}

impl Draft<Field> for FieldInput {
    fn into_record(self, owner: Uuid, now: DateTime<Utc>) -> Result<Field, ApiError> {
        Ok(Field {
            id: Uuid::now_v7(),
            user_id: owner,
            name: required_text(self.name, "name", NAME_LEN)?,
            crop: required_text(self.crop, "crop", CROP_LEN)?,
            area: required(self.area, "area")?,
            location: optional_text(self.location, "location", LOCATION_LEN)?,
            city: optional_text(self.city, "city", CITY_LEN)?,
            latitude: self.latitude,
            longitude: self.longitude,
            size: self.size,
            status: text_or(self.status, DEFAULT_FIELD_STATUS, "status", STATUS_LEN)?,
            next_action: optional_text(self.next_action, "next_action", NEXT_ACTION_LEN)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Changes<Field> for FieldInput {
    fn apply(self, field: &mut Field) -> Result<(), ApiError> {
        replace_text(&mut field.name, self.name, "name", NAME_LEN)?;
        replace_text(&mut field.crop, self.crop, "crop", CROP_LEN)?;
        replace(&mut field.area, self.area);
        replace_opt_text(&mut field.location, self.location, "location", LOCATION_LEN)?;
        replace_opt_text(&mut field.city, self.city, "city", CITY_LEN)?;
        replace_opt(&mut field.latitude, self.latitude);
        replace_opt(&mut field.longitude, self.longitude);
        replace_opt(&mut field.size, self.size);
        replace_text(&mut field.status, self.status, "status", STATUS_LEN)?;
        replace_opt_text(
            &mut field.next_action,
            self.next_action,
            "next_action",
            NEXT_ACTION_LEN,
        )?;
        Ok(())
    }
}

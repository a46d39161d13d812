use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::types::StaffMember;
use crate::error::ApiError;
use crate::usecase::resource::{
    Changes, Draft, EMAIL_LEN, NAME_LEN, STATUS_LEN, optional_text, replace_opt,
    replace_opt_text, replace_text, required_text, text_or,
};

pub const DEFAULT_STAFF_STATUS: &str = "active";

const PHONE_LEN: usize = 20;
const POSITION_LEN: usize = 50;

/// Body of `POST /api/staff` and `PUT /api/staff/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct StaffInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub field_id: Option<Uuid>,
}

impl Draft<StaffMember> for StaffInput {
    fn into_record(self, owner: Uuid, now: DateTime<Utc>) -> Result<StaffMember, ApiError> {
        Ok(StaffMember {
            id: Uuid::now_v7(),
            user_id: owner,
            field_id: self.field_id,
            field_name: None,
            name: required_text(self.name, "name", NAME_LEN)?,
            email: required_text(self.email, "email", EMAIL_LEN)?,
            phone: optional_text(self.phone, "phone", PHONE_LEN)?,
            position: required_text(self.position, "position", POSITION_LEN)?,
            hire_date: self.hire_date,
            salary: self.salary,
            status: text_or(self.status, DEFAULT_STAFF_STATUS, "status", STATUS_LEN)?,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Changes<StaffMember> for StaffInput {
    fn apply(self, member: &mut StaffMember) -> Result<(), ApiError> {
        replace_text(&mut member.name, self.name, "name", NAME_LEN)?;
        replace_text(&mut member.email, self.email, "email", EMAIL_LEN)?;
        replace_opt_text(&mut member.phone, self.phone, "phone", PHONE_LEN)?;
        replace_text(&mut member.position, self.position, "position", POSITION_LEN)?;
        replace_opt(&mut member.hire_date, self.hire_date);
        replace_opt(&mut member.salary, self.salary);
        replace_text(&mut member.status, self.status, "status", STATUS_LEN)?;
        replace_opt(&mut member.notes, self.notes);
        replace_opt(&mut member.field_id, self.field_id);
        Ok(())
    }
}

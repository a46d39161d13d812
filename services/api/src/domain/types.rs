use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use farmstead_domain::resource::ResourceKind;
use farmstead_domain::user::Role;

/// Registered account. Lookups by email are exact (no case folding).
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub last_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A record owned by exactly one user.
///
/// Records that can point at a field expose the reference through `field_ref`; the display
/// name of that field is resolved by the repository and stored via `set_field_name`.
pub trait OwnedRecord: Clone + Send + Sync {
    const KIND: ResourceKind;

    fn id(&self) -> Uuid;
    fn owner(&self) -> Uuid;
    fn touch(&mut self, now: DateTime<Utc>);

    fn field_ref(&self) -> Option<Uuid> {
        None
    }

    fn set_field_name(&mut self, _name: Option<String>) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub crop: String,
    pub area: f64,
    pub location: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub size: Option<f64>,
    pub status: String,
    pub next_action: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    pub name: String,
    pub kind: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: String,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub min_quantity: f64,
    pub unit: String,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub field_id: Option<Uuid>,
    pub field_name: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for Field {
    const KIND: ResourceKind = ResourceKind::Field;

    fn id(&self) -> Uuid {
        self.id
    }

    fn owner(&self) -> Uuid {
        self.user_id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

macro_rules! field_linked_record {
    ($ty:ty, $kind:expr) => {
        impl OwnedRecord for $ty {
            const KIND: ResourceKind = $kind;

            fn id(&self) -> Uuid {
                self.id
            }

            fn owner(&self) -> Uuid {
                self.user_id
            }

            fn touch(&mut self, now: DateTime<Utc>) {
                self.updated_at = now;
            }

            fn field_ref(&self) -> Option<Uuid> {
                self.field_id
            }

            fn set_field_name(&mut self, name: Option<String>) {
                self.field_name = name;
            }
        }
    };
}

field_linked_record!(Equipment, ResourceKind::Equipment);
field_linked_record!(InventoryItem, ResourceKind::Inventory);
field_linked_record!(StaffMember, ResourceKind::Staff);

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use farmstead_api_schema::{equipment, fields, inventory, staff, users};
use farmstead_domain::resource::ResourceKind;
use farmstead_domain::user::Role;

use crate::domain::repository::{OwnedRepository, UserRepository};
use crate::domain::types::{Equipment, Field, InventoryItem, StaffMember, User};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Map a failed insert/update. A foreign-key violation means the referenced field vanished
/// between validation and write.
fn write_error(err: DbErr, context: &'static str) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::InvalidFieldReference,
        _ => ApiError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn update_error(err: DbErr, kind: ResourceKind, context: &'static str) -> ApiError {
    match err {
        DbErr::RecordNotUpdated => ApiError::NotFound(kind),
        err => write_error(err, context),
    }
}

async fn user_exists(db: &DatabaseConnection, id: Uuid) -> Result<bool, ApiError> {
    let count = users::Entity::find_by_id(id)
        .count(db)
        .await
        .context("check record owner")?;
    Ok(count > 0)
}

async fn owned_field_name(
    db: &DatabaseConnection,
    owner: Uuid,
    field_id: Uuid,
) -> Result<Option<String>, ApiError> {
    let field = fields::Entity::find_by_id(field_id)
        .filter(fields::Column::UserId.eq(owner))
        .one(db)
        .await
        .context("find referenced field")?;
    Ok(field.map(|f| f.name))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            name: Set(user.name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_str().to_owned()),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::EmailAlreadyExists
            } else {
                write_error(e, "create user")
            }
        })?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin delete user")?;
        staff::Entity::delete_many()
            .filter(staff::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .context("delete user staff")?;
        inventory::Entity::delete_many()
            .filter(inventory::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .context("delete user inventory")?;
        equipment::Entity::delete_many()
            .filter(equipment::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .context("delete user equipment")?;
        fields::Entity::delete_many()
            .filter(fields::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .context("delete user fields")?;
        let result = users::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete user")?;
        txn.commit().await.context("commit delete user")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<bool, ApiError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Role, Expr::value(role.as_str()))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update user role")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("user {} has an unreadable role", model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        name: model.name,
        last_name: model.last_name,
        role,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Field repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFieldRepository {
    pub db: DatabaseConnection,
}

impl OwnedRepository for DbFieldRepository {
    type Record = Field;

    async fn list(&self, owner: Uuid) -> Result<Vec<Field>, ApiError> {
        let models = fields::Entity::find()
            .filter(fields::Column::UserId.eq(owner))
            .order_by_asc(fields::Column::Id)
            .all(&self.db)
            .await
            .context("list fields")?;
        Ok(models.into_iter().map(field_from_model).collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Field>, ApiError> {
        let model = fields::Entity::find_by_id(id)
            .filter(fields::Column::UserId.eq(owner))
            .one(&self.db)
            .await
            .context("find field")?;
        Ok(model.map(field_from_model))
    }

    async fn insert(&self, record: &Field) -> Result<(), ApiError> {
        field_active(record)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "insert field"))?;
        Ok(())
    }

    async fn update(&self, record: &Field) -> Result<(), ApiError> {
        fields::Entity::update(field_active(record))
            .filter(fields::Column::UserId.eq(record.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| update_error(e, ResourceKind::Field, "update field"))?;
        Ok(())
    }

    /// Equipment, inventory and staff linked to the field are deleted with it.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let txn = self.db.begin().await.context("begin delete field")?;
        let owned = fields::Entity::find_by_id(id)
            .filter(fields::Column::UserId.eq(owner))
            .one(&txn)
            .await
            .context("find field for delete")?;
        if owned.is_none() {
            return Ok(false);
        }

        equipment::Entity::delete_many()
            .filter(equipment::Column::FieldId.eq(id))
            .exec(&txn)
            .await
            .context("delete field equipment")?;
        inventory::Entity::delete_many()
            .filter(inventory::Column::FieldId.eq(id))
            .exec(&txn)
            .await
            .context("delete field inventory")?;
        staff::Entity::delete_many()
            .filter(staff::Column::FieldId.eq(id))
            .exec(&txn)
            .await
            .context("delete field staff")?;

        let result = fields::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete field")?;
        txn.commit().await.context("commit delete field")?;
        Ok(result.rows_affected > 0)
    }

    async fn owner_exists(&self, owner: Uuid) -> Result<bool, ApiError> {
        user_exists(&self.db, owner).await
    }

    async fn field_name(&self, owner: Uuid, field_id: Uuid) -> Result<Option<String>, ApiError> {
        owned_field_name(&self.db, owner, field_id).await
    }
}

fn field_from_model(model: fields::Model) -> Field {
    Field {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        crop: model.crop,
        area: model.area,
        location: model.location,
        city: model.city,
        latitude: model.latitude,
        longitude: model.longitude,
        size: model.size,
        status: model.status,
        next_action: model.next_action,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn field_active(record: &Field) -> fields::ActiveModel {
    fields::ActiveModel {
        id: Set(record.id),
        user_id: Set(record.user_id),
        name: Set(record.name.clone()),
        crop: Set(record.crop.clone()),
        area: Set(record.area),
        location: Set(record.location.clone()),
        city: Set(record.city.clone()),
        latitude: Set(record.latitude),
        longitude: Set(record.longitude),
        size: Set(record.size),
        status: Set(record.status.clone()),
        next_action: Set(record.next_action.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

// ── Equipment repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEquipmentRepository {
    pub db: DatabaseConnection,
}

impl OwnedRepository for DbEquipmentRepository {
    type Record = Equipment;

    async fn list(&self, owner: Uuid) -> Result<Vec<Equipment>, ApiError> {
        let rows = equipment::Entity::find()
            .filter(equipment::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .order_by_asc(equipment::Column::Id)
            .all(&self.db)
            .await
            .context("list equipment")?;
        Ok(rows
            .into_iter()
            .map(|(model, field)| equipment_from_model(model, field.map(|f| f.name)))
            .collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<Equipment>, ApiError> {
        let row = equipment::Entity::find_by_id(id)
            .filter(equipment::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .one(&self.db)
            .await
            .context("find equipment")?;
        Ok(row.map(|(model, field)| equipment_from_model(model, field.map(|f| f.name))))
    }

    async fn insert(&self, record: &Equipment) -> Result<(), ApiError> {
        equipment_active(record)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "insert equipment"))?;
        Ok(())
    }

    async fn update(&self, record: &Equipment) -> Result<(), ApiError> {
        equipment::Entity::update(equipment_active(record))
            .filter(equipment::Column::UserId.eq(record.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| update_error(e, ResourceKind::Equipment, "update equipment"))?;
        Ok(())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let result = equipment::Entity::delete_many()
            .filter(equipment::Column::Id.eq(id))
            .filter(equipment::Column::UserId.eq(owner))
            .exec(&self.db)
            .await
            .context("delete equipment")?;
        Ok(result.rows_affected > 0)
    }

    async fn owner_exists(&self, owner: Uuid) -> Result<bool, ApiError> {
        user_exists(&self.db, owner).await
    }

    async fn field_name(&self, owner: Uuid, field_id: Uuid) -> Result<Option<String>, ApiError> {
        owned_field_name(&self.db, owner, field_id).await
    }
}

fn equipment_from_model(model: equipment::Model, field_name: Option<String>) -> Equipment {
    Equipment {
        id: model.id,
        user_id: model.user_id,
        field_id: model.field_id,
        field_name,
        name: model.name,
        kind: model.kind,
        brand: model.brand,
        model: model.model,
        year: model.year,
        serial_number: model.serial_number,
        purchase_date: model.purchase_date,
        status: model.status,
        last_maintenance: model.last_maintenance,
        next_maintenance: model.next_maintenance,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn equipment_active(record: &Equipment) -> equipment::ActiveModel {
    equipment::ActiveModel {
        id: Set(record.id),
        user_id: Set(record.user_id),
        field_id: Set(record.field_id),
        name: Set(record.name.clone()),
        kind: Set(record.kind.clone()),
        brand: Set(record.brand.clone()),
        model: Set(record.model.clone()),
        year: Set(record.year),
        serial_number: Set(record.serial_number.clone()),
        purchase_date: Set(record.purchase_date),
        status: Set(record.status.clone()),
        last_maintenance: Set(record.last_maintenance),
        next_maintenance: Set(record.next_maintenance),
        notes: Set(record.notes.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

// ── Inventory repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInventoryRepository {
    pub db: DatabaseConnection,
}

impl OwnedRepository for DbInventoryRepository {
    type Record = InventoryItem;

    async fn list(&self, owner: Uuid) -> Result<Vec<InventoryItem>, ApiError> {
        let rows = inventory::Entity::find()
            .filter(inventory::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .order_by_asc(inventory::Column::Id)
            .all(&self.db)
            .await
            .context("list inventory")?;
        Ok(rows
            .into_iter()
            .map(|(model, field)| inventory_from_model(model, field.map(|f| f.name)))
            .collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<InventoryItem>, ApiError> {
        let row = inventory::Entity::find_by_id(id)
            .filter(inventory::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .one(&self.db)
            .await
            .context("find inventory item")?;
        Ok(row.map(|(model, field)| inventory_from_model(model, field.map(|f| f.name))))
    }

    async fn insert(&self, record: &InventoryItem) -> Result<(), ApiError> {
        inventory_active(record)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, "insert inventory item"))?;
        Ok(())
    }

    async fn update(&self, record: &InventoryItem) -> Result<(), ApiError> {
        inventory::Entity::update(inventory_active(record))
            .filter(inventory::Column::UserId.eq(record.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| update_error(e, ResourceKind::Inventory, "update inventory item"))?;
        Ok(())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let result = inventory::Entity::delete_many()
            .filter(inventory::Column::Id.eq(id))
            .filter(inventory::Column::UserId.eq(owner))
            .exec(&self.db)
            .await
            .context("delete inventory item")?;
        Ok(result.rows_affected > 0)
    }

    async fn owner_exists(&self, owner: Uuid) -> Result<bool, ApiError> {
        user_exists(&self.db, owner).await
    }

    async fn field_name(&self, owner: Uuid, field_id: Uuid) -> Result<Option<String>, ApiError> {
        owned_field_name(&self.db, owner, field_id).await
    }
}

fn inventory_from_model(model: inventory::Model, field_name: Option<String>) -> InventoryItem {
    InventoryItem {
        id: model.id,
        user_id: model.user_id,
        field_id: model.field_id,
        field_name,
        name: model.name,
        category: model.category,
        quantity: model.quantity,
        min_quantity: model.min_quantity,
        unit: model.unit,
        supplier: model.supplier,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn inventory_active(record: &InventoryItem) -> inventory::ActiveModel {
    inventory::ActiveModel {
        id: Set(record.id),
        user_id: Set(record.user_id),
        field_id: Set(record.field_id),
        name: Set(record.name.clone()),
        category: Set(record.category.clone()),
        quantity: Set(record.quantity),
        min_quantity: Set(record.min_quantity),
        unit: Set(record.unit.clone()),
        supplier: Set(record.supplier.clone()),
        notes: Set(record.notes.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

// ── Staff repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStaffRepository {
    pub db: DatabaseConnection,
}

fn staff_write_error(err: DbErr, context: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::StaffEmailAlreadyExists
    } else {
        write_error(err, context)
    }
}

impl OwnedRepository for DbStaffRepository {
    type Record = StaffMember;

    async fn list(&self, owner: Uuid) -> Result<Vec<StaffMember>, ApiError> {
        let rows = staff::Entity::find()
            .filter(staff::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .order_by_asc(staff::Column::Id)
            .all(&self.db)
            .await
            .context("list staff")?;
        Ok(rows
            .into_iter()
            .map(|(model, field)| staff_from_model(model, field.map(|f| f.name)))
            .collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> Result<Option<StaffMember>, ApiError> {
        let row = staff::Entity::find_by_id(id)
            .filter(staff::Column::UserId.eq(owner))
            .find_also_related(fields::Entity)
            .one(&self.db)
            .await
            .context("find staff member")?;
        Ok(row.map(|(model, field)| staff_from_model(model, field.map(|f| f.name))))
    }

    async fn insert(&self, record: &StaffMember) -> Result<(), ApiError> {
        staff_active(record)
            .insert(&self.db)
            .await
            .map_err(|e| staff_write_error(e, "insert staff member"))?;
        Ok(())
    }

    async fn update(&self, record: &StaffMember) -> Result<(), ApiError> {
        staff::Entity::update(staff_active(record))
            .filter(staff::Column::UserId.eq(record.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => ApiError::NotFound(ResourceKind::Staff),
                e => staff_write_error(e, "update staff member"),
            })?;
        Ok(())
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let result = staff::Entity::delete_many()
            .filter(staff::Column::Id.eq(id))
            .filter(staff::Column::UserId.eq(owner))
            .exec(&self.db)
            .await
            .context("delete staff member")?;
        Ok(result.rows_affected > 0)
    }

    async fn owner_exists(&self, owner: Uuid) -> Result<bool, ApiError> {
        user_exists(&self.db, owner).await
    }

    async fn field_name(&self, owner: Uuid, field_id: Uuid) -> Result<Option<String>, ApiError> {
        owned_field_name(&self.db, owner, field_id).await
    }
}

fn staff_from_model(model: staff::Model, field_name: Option<String>) -> StaffMember {
    StaffMember {
        id: model.id,
        user_id: model.user_id,
        field_id: model.field_id,
        field_name,
        name: model.name,
        email: model.email,
        phone: model.phone,
        position: model.position,
        hire_date: model.hire_date,
        salary: model.salary,
        status: model.status,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn staff_active(record: &StaffMember) -> staff::ActiveModel {
    staff::ActiveModel {
        id: Set(record.id),
        user_id: Set(record.user_id),
        field_id: Set(record.field_id),
        name: Set(record.name.clone()),
        email: Set(record.email.clone()),
        phone: Set(record.phone.clone()),
        position: Set(record.position.clone()),
        hire_date: Set(record.hire_date),
        salary: Set(record.salary),
        status: Set(record.status.clone()),
        notes: Set(record.notes.clone()),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    }
}

use sea_orm::DatabaseConnection;

use farmstead_auth_types::token::TokenService;

use crate::infra::db::{
    DbEquipmentRepository, DbFieldRepository, DbInventoryRepository, DbStaffRepository,
    DbUserRepository,
};
use crate::infra::password::Argon2SecretHasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenService,
    pub hasher: Argon2SecretHasher,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn field_repo(&self) -> DbFieldRepository {
        DbFieldRepository {
            db: self.db.clone(),
        }
    }

    pub fn equipment_repo(&self) -> DbEquipmentRepository {
        DbEquipmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn inventory_repo(&self) -> DbInventoryRepository {
        DbInventoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn staff_repo(&self) -> DbStaffRepository {
        DbStaffRepository {
            db: self.db.clone(),
        }
    }
}

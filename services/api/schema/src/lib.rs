//! sea-orm entities for the Farmstead API database.

pub mod equipment;
pub mod fields;
pub mod inventory;
pub mod staff;
pub mod users;

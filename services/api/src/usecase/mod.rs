pub mod credential;
pub mod equipment;
pub mod field;
pub mod inventory;
pub mod resource;
pub mod staff;
pub mod user;

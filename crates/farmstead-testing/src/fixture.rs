//! Canned request bodies.

use serde_json::{Value, json};

pub fn register_body(name: &str, email: &str, secret: &str) -> Value {
    json!({ "name": name, "email": email, "secret": secret })
}

pub fn login_body(email: &str, secret: &str) -> Value {
    json!({ "email": email, "secret": secret })
}

pub fn field_body(name: &str) -> Value {
    json!({
        "name": name,
        "crop": "wheat",
        "area": 12.5,
        "location": "North parcel",
        "city": "Ames",
        "latitude": 42.03,
        "longitude": -93.62,
    })
}

pub fn equipment_body(name: &str) -> Value {
    json!({
        "name": name,
        "type": "tractor",
        "brand": "Deere",
        "model": "5075E",
        "year": 2019,
    })
}

pub fn inventory_body(name: &str) -> Value {
    json!({
        "name": name,
        "category": "seed",
        "quantity": 40.0,
        "min_quantity": 10.0,
        "unit": "kg",
    })
}

pub fn staff_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "phone": "555-0100",
        "position": "operator",
    })
}

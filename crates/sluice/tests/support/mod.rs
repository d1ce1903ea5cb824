#![allow(dead_code)]

use sluice::{entity, RecordingLayer, ResolverCaches, Sluice};

entity! {
    pub struct Person in "person" {
        personal_no: String,
        last_name: String,
        age: i64,
        #[temporal(Date)]
        born: String,
        #[embedded]
        info: PersonInfo,
        #[collection]
        phones: Phone,
    }
}

entity! {
    pub struct PersonInfo in "person_info" {
        card_number: String,
        #[embedded]
        address: Address,
    }
}

entity! {
    pub struct Address in "address" {
        city: String,
    }
}

entity! {
    pub struct Phone in "phone" {
        phone_number: String,
        owner_no: String,
    }
}

/// A fresh compiler over a recording layer with isolated caches, so tests
/// never observe each other's resolver state.
pub fn fixture() -> (Sluice, RecordingLayer) {
    let layer = RecordingLayer::new();
    let db = Sluice::new(layer.clone()).with_caches(ResolverCaches::new());
    (db, layer)
}

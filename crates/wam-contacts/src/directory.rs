//! Directory fetch parsing and the built-in demo dataset.
//!
//! The two directory endpoints are fetched independently; when one
//! fails the console drops to a small demo dataset for that source so
//! the selection UI stays usable offline.

use crate::types::{Company, Contact, ContactStatus};
use wam_core::parse_rows;

/// Parse the contacts list response. Accepts a bare array or the
/// paged `{ "content": [...] }` / `{ "data": [...] }` wrappers the
/// backend uses in different versions.
pub fn parse_contacts(value: &serde_json::Value) -> Vec<Contact> {
    parse_rows(value, "contact")
}

/// Parse the companies list response, same wrapper tolerance.
pub fn parse_companies(value: &serde_json::Value) -> Vec<Company> {
    parse_rows(value, "company")
}

/// Built-in demo contacts, mixed so every filter has something to bite on.
pub fn demo_contacts() -> Vec<Contact> {
    let rows = [
        ("d1", "Maria", "Santos", Some("+351912000111"), Some("maria.santos@alfatech.pt"), Some("dc1")),
        ("d2", "João", "Ferreira", Some("+351913000222"), None, Some("dc1")),
        ("d3", "Ana", "Costa", None, Some("ana.costa@boreal.io"), Some("dc2")),
        ("d4", "Pedro", "Oliveira", Some("+351914000333"), Some("pedro@boreal.io"), Some("dc2")),
        ("d5", "Sofia", "Almeida", Some("+351915000444"), Some("sofia@cervo.com"), Some("dc3")),
        ("d6", "Miguel", "Rodrigues", None, None, None),
        ("d7", "Inês", "Martins", Some("+351916000555"), None, Some("dc3")),
        ("d8", "Carlos", "Pereira", Some("+351917000666"), Some("carlos@alfatech.pt"), Some("dc1")),
    ];
    let companies = demo_companies();

    rows.iter()
        .enumerate()
        .map(|(i, (id, first, last, phone, email, company_id))| Contact {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: phone.map(str::to_string),
            email: email.map(str::to_string),
            company_id: company_id.map(str::to_string),
            company_name: company_id.and_then(|cid| {
                companies.iter().find(|c| c.id == cid).map(|c| c.name.clone())
            }),
            status: if i == 5 {
                ContactStatus::Inactive
            } else {
                ContactStatus::Active
            },
            tags: vec![],
            created_at: None,
        })
        .collect()
}

/// Built-in demo companies.
pub fn demo_companies() -> Vec<Company> {
    vec![
        Company {
            id: "dc1".to_string(),
            name: "AlfaTech".to_string(),
        },
        Company {
            id: "dc2".to_string(),
            name: "Boreal Digital".to_string(),
        },
        Company {
            id: "dc3".to_string(),
            name: "Cervo Retail".to_string(),
        },
    ]
}

//! Composable directory filters.
//!
//! Three independent predicates joined with AND: free-text search,
//! company scope, and contact-method requirement. Each can change
//! without touching the others.

use crate::types::Contact;
use serde::{Deserialize, Serialize};

/// Which contact method(s) a send requires of its recipients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactRequirement {
    Any,
    HasPhone,
    HasEmail,
    HasBoth,
}

impl Default for ContactRequirement {
    fn default() -> Self {
        ContactRequirement::Any
    }
}

/// Directory filter state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub requirement: ContactRequirement,
}

impl ContactFilter {
    /// Whether a single contact passes every active predicate.
    pub fn matches(&self, contact: &Contact) -> bool {
        self.matches_search(contact) && self.matches_company(contact) && self.matches_requirement(contact)
    }

    /// Filter a dataset, preserving order.
    pub fn apply(&self, contacts: &[Contact]) -> Vec<Contact> {
        contacts
            .iter()
            .filter(|c| self.matches(c))
            .cloned()
            .collect()
    }

    fn matches_search(&self, contact: &Contact) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let mut haystack = contact.full_name().to_lowercase();
        if let Some(ref company) = contact.company_name {
            haystack.push(' ');
            haystack.push_str(&company.to_lowercase());
        }
        if let Some(ref email) = contact.email {
            haystack.push(' ');
            haystack.push_str(&email.to_lowercase());
        }
        if let Some(ref phone) = contact.phone {
            haystack.push(' ');
            haystack.push_str(phone);
        }
        haystack.contains(&needle)
    }

    fn matches_company(&self, contact: &Contact) -> bool {
        match self.company_id {
            Some(ref id) => contact.company_id.as_deref() == Some(id.as_str()),
            None => true,
        }
    }

    fn matches_requirement(&self, contact: &Contact) -> bool {
        match self.requirement {
            ContactRequirement::Any => true,
            ContactRequirement::HasPhone => contact.has_phone(),
            ContactRequirement::HasEmail => contact.has_email(),
            ContactRequirement::HasBoth => contact.has_phone() && contact.has_email(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContactStatus;

    fn contact(id: &str, first: &str, company: Option<&str>, phone: Option<&str>, email: Option<&str>) -> Contact {
        Contact {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Silva".to_string(),
            phone: phone.map(str::to_string),
            email: email.map(str::to_string),
            company_id: company.map(str::to_string),
            company_name: company.map(|c| format!("Company {}", c)),
            status: ContactStatus::Active,
            tags: vec![],
            created_at: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = ContactFilter {
            search: "mar".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&contact("1", "Maria", None, None, None)));
        assert!(filter.matches(&contact("2", "OMAR", None, None, None)));
        assert!(!filter.matches(&contact("3", "Joana", None, None, None)));
    }

    #[test]
    fn test_search_covers_email_and_phone() {
        let filter = ContactFilter {
            search: "912".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&contact("1", "Rui", None, Some("+351912000111"), None)));

        let filter = ContactFilter {
            search: "acme.pt".to_string(),
            ..Default::default()
        };
        assert!(filter.matches(&contact("2", "Rui", None, None, Some("rui@acme.pt"))));
    }

    #[test]
    fn test_company_predicate() {
        let filter = ContactFilter {
            company_id: Some("c1".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&contact("1", "Ana", Some("c1"), None, None)));
        assert!(!filter.matches(&contact("2", "Ana", Some("c2"), None, None)));
        assert!(!filter.matches(&contact("3", "Ana", None, None, None)));
    }

    #[test]
    fn test_requirement_predicate() {
        let both = contact("1", "Ana", None, Some("+351911"), Some("a@b.pt"));
        let phone_only = contact("2", "Bea", None, Some("+351922"), None);
        let email_only = contact("3", "Car", None, None, Some("c@d.pt"));

        let filter = ContactFilter {
            requirement: ContactRequirement::HasPhone,
            ..Default::default()
        };
        assert!(filter.matches(&both));
        assert!(filter.matches(&phone_only));
        assert!(!filter.matches(&email_only));

        let filter = ContactFilter {
            requirement: ContactRequirement::HasBoth,
            ..Default::default()
        };
        assert!(filter.matches(&both));
        assert!(!filter.matches(&phone_only));
    }

    #[test]
    fn test_predicates_compose_with_and() {
        let filter = ContactFilter {
            search: "ana".to_string(),
            company_id: Some("c1".to_string()),
            requirement: ContactRequirement::HasPhone,
        };
        let hit = contact("1", "Ana", Some("c1"), Some("+351911"), None);
        let wrong_company = contact("2", "Ana", Some("c2"), Some("+351911"), None);
        let no_phone = contact("3", "Ana", Some("c1"), None, None);

        let result = filter.apply(&[hit.clone(), wrong_company, no_phone]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, hit.id);
    }
}

//! Directory service: load state, filters, selection and paging in one
//! place, shared with the campaign wizard's recipients step.

use crate::directory::{demo_companies, demo_contacts, parse_companies, parse_contacts};
use crate::filter::ContactFilter;
use crate::selection::ContactSelection;
use crate::types::{Company, Contact, DirectorySource, DirectoryStatus};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use wam_core::{paginate, BackendClient, Notifier, PageInfo};

const CONTACTS_PATH: &str = "api/v1/contacts";
const COMPANIES_PATH: &str = "api/v1/companies/all";

/// Rows per directory page.
const PAGE_SIZE: usize = 10;
/// Pager buttons shown at once.
const PAGE_WINDOW: usize = 5;

/// Shared service state, managed by Tauri.
pub type ContactsServiceState = Arc<Mutex<ContactsService>>;

/// One rendered page of the directory table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub items: Vec<Contact>,
    pub page_info: PageInfo,
    pub page_numbers: Vec<usize>,
    pub range_label: String,
    pub all_on_page_selected: bool,
    pub selected_count: usize,
    pub max_selections: usize,
}

/// The contact directory service.
pub struct ContactsService {
    client: BackendClient,
    notifier: Arc<dyn Notifier>,
    contacts: Vec<Contact>,
    companies: Vec<Company>,
    contacts_source: DirectorySource,
    companies_source: DirectorySource,
    contacts_loading: bool,
    companies_loading: bool,
    filter: ContactFilter,
    selection: ContactSelection,
    page: usize,
}

impl ContactsService {
    /// Create a new service wrapped in an Arc<Mutex>.
    pub fn new(client: BackendClient, notifier: Arc<dyn Notifier>) -> ContactsServiceState {
        Arc::new(Mutex::new(Self {
            client,
            notifier,
            contacts: Vec::new(),
            companies: Vec::new(),
            contacts_source: DirectorySource::Backend,
            companies_source: DirectorySource::Backend,
            contacts_loading: false,
            companies_loading: false,
            filter: ContactFilter::default(),
            selection: ContactSelection::default(),
            page: 0,
        }))
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Fetch the contact list. On failure the built-in demo dataset is
    /// loaded instead and the source marked as fallback.
    pub async fn load_contacts(&mut self) {
        self.contacts_loading = true;
        match self.client.get(CONTACTS_PATH).await {
            Ok(value) => {
                self.contacts = parse_contacts(&value);
                self.contacts_source = DirectorySource::Backend;
                info!("Loaded {} contacts", self.contacts.len());
            }
            Err(err) => {
                self.contacts = demo_contacts();
                self.contacts_source = DirectorySource::Fallback;
                self.notifier.warning(
                    "Contacts unavailable",
                    &format!("{} (showing demo contacts)", err.message),
                );
            }
        }
        self.contacts_loading = false;
        self.page = 0;
    }

    /// Fetch the company list, independent of the contact fetch.
    pub async fn load_companies(&mut self) {
        self.companies_loading = true;
        match self.client.get(COMPANIES_PATH).await {
            Ok(value) => {
                self.companies = parse_companies(&value);
                self.companies_source = DirectorySource::Backend;
                info!("Loaded {} companies", self.companies.len());
            }
            Err(err) => {
                self.companies = demo_companies();
                self.companies_source = DirectorySource::Fallback;
                self.notifier.warning(
                    "Companies unavailable",
                    &format!("{} (showing demo companies)", err.message),
                );
            }
        }
        self.companies_loading = false;
    }

    /// Reload both directory sources. Each fetch fails independently.
    pub async fn refresh(&mut self) {
        self.load_contacts().await;
        self.load_companies().await;
    }

    pub fn status(&self) -> DirectoryStatus {
        DirectoryStatus {
            contacts_loading: self.contacts_loading,
            companies_loading: self.companies_loading,
            contacts_source: self.contacts_source,
            companies_source: self.companies_source,
            contact_count: self.contacts.len(),
            company_count: self.companies.len(),
        }
    }

    pub fn companies(&self) -> Vec<Company> {
        self.companies.clone()
    }

    // ── Filtering and paging ────────────────────────────────────────

    /// Replace the filter and jump back to the first page.
    pub fn set_filter(&mut self, filter: ContactFilter) {
        self.filter = filter;
        self.page = 0;
    }

    pub fn filter(&self) -> &ContactFilter {
        &self.filter
    }

    /// The full filtered dataset, in directory order.
    pub fn filtered(&self) -> Vec<Contact> {
        self.filter.apply(&self.contacts)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Render the current page of the filtered dataset.
    pub fn page_view(&self) -> ContactPage {
        let filtered = self.filtered();
        let page_info = PageInfo::compute(filtered.len(), self.page, PAGE_SIZE);
        let items: Vec<Contact> = paginate(&filtered, self.page, PAGE_SIZE).to_vec();
        let all_on_page_selected =
            !items.is_empty() && items.iter().all(|c| self.selection.contains(&c.id));
        ContactPage {
            page_numbers: page_info.window(PAGE_WINDOW),
            range_label: page_info.range_label(),
            all_on_page_selected,
            selected_count: self.selection.len(),
            max_selections: self.selection.max_selections(),
            items,
            page_info,
        }
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Toggle one row. A blocked over-cap addition raises a warning
    /// notice and leaves the selection unchanged.
    pub fn toggle_contact(&mut self, id: &str) -> bool {
        match self.selection.toggle(id) {
            Ok(selected) => selected,
            Err(err) => {
                self.notifier.warning("Selection limit", &err.message);
                false
            }
        }
    }

    /// Add the current page's rows to the selection (quota permitting).
    pub fn select_page(&mut self) -> usize {
        let ids: Vec<String> = self.page_view().items.iter().map(|c| c.id.clone()).collect();
        self.selection.select_page(&ids);
        self.selection.len()
    }

    /// Remove the current page's rows from the selection.
    pub fn deselect_page(&mut self) -> usize {
        let ids: Vec<String> = self.page_view().items.iter().map(|c| c.id.clone()).collect();
        self.selection.deselect_page(&ids);
        self.selection.len()
    }

    /// Replace the selection with the head of the entire filtered set.
    /// Warns when the filtered set exceeds the cap.
    pub fn select_all_visible(&mut self) -> usize {
        let ids: Vec<String> = self.filtered().iter().map(|c| c.id.clone()).collect();
        let capped = ids.len() > self.selection.max_selections();
        let count = self.selection.select_all_visible(&ids);
        if capped {
            self.notifier.warning(
                "Selection limit",
                &format!(
                    "Selected the first {} of {} matching contacts",
                    count,
                    ids.len()
                ),
            );
        }
        count
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.ids().to_vec()
    }

    /// Selected contacts in selection order, for the recipients review.
    pub fn selected_contacts(&self) -> Vec<Contact> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.contacts.iter().find(|c| &c.id == id).cloned())
            .collect()
    }
}

// ============================================================================
// Dashboard Core - Product List Controller
// File: crates/dashboard-core/src/services/product_list.rs
// ============================================================================
//! In-memory mirror of the remote product list for one dashboard page view.
//!
//! The mirror is written only after the remote service confirms a mutation,
//! so a failed request leaves it at the last known-good state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use dashboard_shared::constants::PAGE_SIZE;

use crate::domain::{AdminGrant, Product, ProductDraft, ProductForm, ProductId};
use crate::error::DomainError;
use crate::repositories::ProductRepository;

/// Kind of mutation currently pending for a product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Update,
    Remove,
}

/// Derived, render-ready state of the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot {
    pub query: String,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_filtered: usize,
    pub visible: Vec<Product>,
}

#[derive(Debug, Default)]
struct ListState {
    items: Vec<Product>,
    query: String,
    page: usize,
}

impl ListState {
    fn new(items: Vec<Product>) -> Self {
        Self {
            items,
            query: String::new(),
            page: 1,
        }
    }

    fn filtered(&self) -> Vec<&Product> {
        let needle = self.query.to_lowercase();
        self.items.iter().filter(|p| p.matches(&needle)).collect()
    }

    fn page_count(&self) -> usize {
        page_count_for(self.filtered().len())
    }

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.page_count().max(1));
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }
}

fn page_count_for(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Releases the in-flight slot for a product id when dropped.
struct InFlightGuard<'a> {
    in_flight: &'a DashMap<ProductId, PendingOp>,
    id: ProductId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.id);
    }
}

pub struct ProductListController {
    repository: Arc<dyn ProductRepository>,
    state: RwLock<ListState>,
    in_flight: DashMap<ProductId, PendingOp>,
    disposed: AtomicBool,
}

impl ProductListController {
    pub fn new(repository: Arc<dyn ProductRepository>, items: Vec<Product>) -> Self {
        Self {
            repository,
            state: RwLock::new(ListState::new(items)),
            in_flight: DashMap::new(),
            disposed: AtomicBool::new(false),
        }
    }

    /// Page-load: fetch the full list into a fresh mirror.
    pub async fn load(repository: Arc<dyn ProductRepository>) -> Result<Self, DomainError> {
        let items = repository.list().await?;
        info!("Loaded {} products into a new dashboard view", items.len());
        Ok(Self::new(repository, items))
    }

    pub fn items(&self) -> Vec<Product> {
        self.state.read().items.clone()
    }

    pub fn query(&self) -> String {
        self.state.read().query.clone()
    }

    pub fn page(&self) -> usize {
        self.state.read().page
    }

    /// Sets the search text and goes back to the first page.
    pub fn set_query(&self, query: impl Into<String>) {
        let mut state = self.state.write();
        state.query = query.into();
        state.page = 1;
    }

    /// Moves to `page`, clamped into `[1, max(1, page_count)]`. Returns the page applied.
    pub fn set_page(&self, page: usize) -> usize {
        let mut state = self.state.write();
        state.page = page;
        state.clamp_page();
        state.page
    }

    pub fn filtered(&self) -> Vec<Product> {
        self.state.read().filtered().into_iter().cloned().collect()
    }

    pub fn page_count(&self) -> usize {
        self.state.read().page_count()
    }

    pub fn visible(&self) -> Vec<Product> {
        self.snapshot().visible
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let state = self.state.read();
        let filtered = state.filtered();
        let page_count = page_count_for(filtered.len());
        let page = state.page.clamp(1, page_count.max(1));
        let visible = filtered
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|p| (*p).clone())
            .collect();

        ListSnapshot {
            query: state.query.clone(),
            page,
            page_count,
            page_size: PAGE_SIZE,
            total_items: state.items.len(),
            total_filtered: filtered.len(),
            visible,
        }
    }

    pub fn pending(&self, id: ProductId) -> Option<PendingOp> {
        self.in_flight.get(&id).map(|op| *op)
    }

    /// Unmounts the view. Responses that arrive afterwards are dropped.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub async fn create(&self, grant: &AdminGrant, form: ProductForm) -> Result<Product, DomainError> {
        self.ensure_open()?;
        let draft = ProductDraft::try_from(form)?;

        let created = self.repository.create(&draft).await.map_err(|e| {
            warn!("Create product '{}' failed: {}", draft.name, e);
            e
        })?;
        self.ensure_open()?;

        let mut state = self.state.write();
        match state.position(created.id) {
            Some(idx) => {
                warn!("Remote service returned existing id {} on create", created.id);
                state.items[idx] = created.clone();
            }
            None => state.items.push(created.clone()),
        }
        state.clamp_page();

        info!("Product {} created by admin {}", created.id, grant.user_id());
        Ok(created)
    }

    pub async fn update(
        &self,
        grant: &AdminGrant,
        id: ProductId,
        form: ProductForm,
    ) -> Result<Product, DomainError> {
        self.ensure_open()?;
        let draft = ProductDraft::try_from(form)?;
        self.ensure_known(id)?;
        let _guard = self.begin(id, PendingOp::Update)?;

        let updated = self
            .repository
            .update(&Product::from_draft(id, draft))
            .await
            .map_err(|e| {
                warn!("Update product {} failed: {}", id, e);
                e
            })?;
        self.ensure_open()?;

        let mut state = self.state.write();
        match state.position(id) {
            Some(idx) => state.items[idx] = updated.clone(),
            None => warn!("Product {} left the mirror while its update was pending", id),
        }
        state.clamp_page();

        info!("Product {} updated by admin {}", id, grant.user_id());
        Ok(updated)
    }

    /// Deletes a product. Nothing is sent unless `confirmed` is true.
    pub async fn remove(
        &self,
        grant: &AdminGrant,
        id: ProductId,
        confirmed: bool,
    ) -> Result<(), DomainError> {
        self.ensure_open()?;
        if !confirmed {
            return Err(DomainError::ConfirmationRequired);
        }
        self.ensure_known(id)?;
        let _guard = self.begin(id, PendingOp::Remove)?;

        self.repository.delete(id).await.map_err(|e| {
            warn!("Delete product {} failed: {}", id, e);
            e
        })?;
        self.ensure_open()?;

        let mut state = self.state.write();
        state.items.retain(|p| p.id != id);
        state.clamp_page();

        info!("Product {} deleted by admin {}", id, grant.user_id());
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_disposed() {
            debug!("Dropping work for a disposed dashboard view");
            return Err(DomainError::ViewDisposed);
        }
        Ok(())
    }

    fn ensure_known(&self, id: ProductId) -> Result<(), DomainError> {
        match self.state.read().position(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::ProductNotFound(id)),
        }
    }

    fn begin(&self, id: ProductId, op: PendingOp) -> Result<InFlightGuard<'_>, DomainError> {
        match self.in_flight.entry(id) {
            Entry::Occupied(existing) => {
                warn!(
                    "Rejecting {:?} on product {}: {:?} still pending",
                    op,
                    id,
                    existing.get()
                );
                Err(DomainError::MutationInFlight(id))
            }
            Entry::Vacant(slot) => {
                slot.insert(op);
                Ok(InFlightGuard {
                    in_flight: &self.in_flight,
                    id,
                })
            }
        }
    }
}

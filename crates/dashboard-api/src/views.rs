//! Registry of open dashboard page views
//!
//! Each `GET /dashboard` opens a fresh product mirror. The mirror lives here
//! until the page disposes it, its owner logs out, it sits idle past the TTL,
//! or the owner opens more views than the per-user cap allows.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use dashboard_core::services::ProductListController;

pub type ViewId = Uuid;

struct ViewEntry {
    owner: i64,
    controller: Arc<ProductListController>,
    last_seen: Mutex<Instant>,
}

impl ViewEntry {
    fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }
}

pub struct ViewRegistry {
    views: DashMap<ViewId, ViewEntry>,
    ttl: Duration,
    max_per_owner: usize,
}

impl ViewRegistry {
    pub fn new(ttl: Duration, max_per_owner: usize) -> Self {
        Self {
            views: DashMap::new(),
            ttl,
            max_per_owner: max_per_owner.max(1),
        }
    }

    /// Registers a new view, first disposing the owner's least recently used
    /// views so that at most `max_per_owner` stay open.
    pub fn open(&self, owner: i64, controller: ProductListController) -> (ViewId, Arc<ProductListController>) {
        self.evict_for(owner);

        let id = Uuid::new_v4();
        let controller = Arc::new(controller);
        self.views.insert(
            id,
            ViewEntry {
                owner,
                controller: controller.clone(),
                last_seen: Mutex::new(Instant::now()),
            },
        );
        debug!("Opened dashboard view {} for user {}", id, owner);
        (id, controller)
    }

    /// Views are only visible to the user that opened them.
    pub fn get(&self, id: ViewId, owner: i64) -> Option<Arc<ProductListController>> {
        let entry = self.views.get(&id)?;
        if entry.owner != owner {
            return None;
        }
        *entry.last_seen.lock() = Instant::now();
        Some(entry.controller.clone())
    }

    pub fn dispose(&self, id: ViewId, owner: i64) -> bool {
        match self.views.remove_if(&id, |_, entry| entry.owner == owner) {
            Some((_, entry)) => {
                entry.controller.dispose();
                debug!("Disposed dashboard view {}", id);
                true
            }
            None => false,
        }
    }

    pub fn dispose_owned_by(&self, owner: i64) -> usize {
        self.dispose_where(|entry| entry.owner == owner)
    }

    pub fn sweep_expired(&self) -> usize {
        let ttl = self.ttl;
        self.dispose_where(|entry| entry.idle_for() >= ttl)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn evict_for(&self, owner: i64) {
        let mut owned: Vec<(ViewId, Instant)> = self
            .views
            .iter()
            .filter(|entry| entry.owner == owner)
            .map(|entry| (*entry.key(), *entry.last_seen.lock()))
            .collect();
        if owned.len() < self.max_per_owner {
            return;
        }

        owned.sort_by_key(|(_, seen)| *seen);
        let excess = owned.len() + 1 - self.max_per_owner;
        for (id, _) in owned.into_iter().take(excess) {
            if let Some((_, entry)) = self.views.remove(&id) {
                entry.controller.dispose();
                debug!("Evicted dashboard view {} of user {}", id, owner);
            }
        }
    }

    fn dispose_where(&self, predicate: impl Fn(&ViewEntry) -> bool) -> usize {
        let mut disposed = 0;
        self.views.retain(|_, entry| {
            if predicate(entry) {
                entry.controller.dispose();
                disposed += 1;
                false
            } else {
                true
            }
        });
        disposed
    }
}

/// Periodically drops idle views.
pub fn spawn_sweeper(registry: Arc<ViewRegistry>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let swept = registry.sweep_expired();
            if swept > 0 {
                info!("Swept {} idle dashboard views ({} open)", swept, registry.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dashboard_core::repositories::ProductRepository;
    use dashboard_core::{DomainError, Product, ProductDraft, ProductId};

    struct NoRemote;

    #[async_trait]
    impl ProductRepository for NoRemote {
        async fn list(&self) -> Result<Vec<Product>, DomainError> {
            Ok(vec![])
        }
        async fn create(&self, _: &ProductDraft) -> Result<Product, DomainError> {
            Err(DomainError::Transport("offline".into()))
        }
        async fn update(&self, _: &Product) -> Result<Product, DomainError> {
            Err(DomainError::Transport("offline".into()))
        }
        async fn delete(&self, _: ProductId) -> Result<(), DomainError> {
            Err(DomainError::Transport("offline".into()))
        }
    }

    fn controller() -> ProductListController {
        ProductListController::new(Arc::new(NoRemote), vec![])
    }

    #[test]
    fn test_views_are_scoped_to_owner() {
        let registry = ViewRegistry::new(Duration::from_secs(60), 5);
        let (id, _) = registry.open(1, controller());

        assert!(registry.get(id, 1).is_some());
        assert!(registry.get(id, 2).is_none());
        assert!(!registry.dispose(id, 2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_dispose_marks_controller() {
        let registry = ViewRegistry::new(Duration::from_secs(60), 5);
        let (id, view) = registry.open(1, controller());

        assert!(registry.dispose(id, 1));
        assert!(view.is_disposed());
        assert!(registry.get(id, 1).is_none());
        assert!(!registry.dispose(id, 1));
    }

    #[test]
    fn test_dispose_owned_by_leaves_other_users() {
        let registry = ViewRegistry::new(Duration::from_secs(60), 5);
        registry.open(1, controller());
        registry.open(1, controller());
        let (other, _) = registry.open(2, controller());

        assert_eq!(registry.dispose_owned_by(1), 2);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(other, 2).is_some());
    }

    #[test]
    fn test_sweep_expired() {
        let fresh = ViewRegistry::new(Duration::from_secs(3600), 5);
        fresh.open(1, controller());
        assert_eq!(fresh.sweep_expired(), 0);

        let stale = ViewRegistry::new(Duration::ZERO, 5);
        let (_, view) = stale.open(1, controller());
        assert_eq!(stale.sweep_expired(), 1);
        assert!(view.is_disposed());
        assert!(stale.is_empty());
    }

    #[test]
    fn test_open_evicts_least_recently_used_view_of_owner() {
        let registry = ViewRegistry::new(Duration::from_secs(60), 2);
        let (first, first_view) = registry.open(1, controller());
        std::thread::sleep(Duration::from_millis(5));
        let (second, _) = registry.open(1, controller());
        std::thread::sleep(Duration::from_millis(5));
        let (other, _) = registry.open(2, controller());
        std::thread::sleep(Duration::from_millis(5));

        // Touching the first view makes the second the oldest.
        assert!(registry.get(first, 1).is_some());
        std::thread::sleep(Duration::from_millis(5));

        let (third, _) = registry.open(1, controller());
        assert!(registry.get(second, 1).is_none());
        assert!(registry.get(first, 1).is_some());
        assert!(registry.get(third, 1).is_some());
        assert!(registry.get(other, 2).is_some());
        assert!(!first_view.is_disposed());
        assert_eq!(registry.len(), 3);

        // Reloading over and over never grows past the cap.
        for _ in 0..10 {
            registry.open(1, controller());
        }
        assert_eq!(registry.len(), 3);
    }
}

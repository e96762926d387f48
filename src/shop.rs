//! Main `LaundryShop` struct tying all components together.

use crate::backend::{FileBackend, KeyValueStore, MemoryBackend};
use crate::clock::{Clock, IdGenerator, SystemClock};
use crate::config::{ShopConfig, StoreConfig};
use crate::error::{Result, StoreError};
use crate::records::RecordStore;
use crate::reports::{
    export_file_name, newest_first, render_orders_csv, search_customers, search_orders,
    AdminDashboard, CsvExport, CustomerDashboard, DateRange, ReportSummary,
};
use crate::repository::Repository;
use crate::session::Session;
use crate::subscriptions::{SubscriptionConfig, SubscriptionHandle, SubscriptionId};
use crate::types::{Order, OrderStatus, Package, Transaction, User};
use crate::workflow::Workflow;
use chrono::NaiveDate;
use std::sync::Arc;

/// The laundry shop core.
///
/// Provides a unified interface for:
/// - Record access through the [`Repository`]
/// - Login state through the [`Session`]
/// - Order and payment flows through the [`Workflow`]
/// - Dashboards, reports and exports
pub struct LaundryShop {
    config: ShopConfig,
    records: Arc<RecordStore>,
    repo: Repository,
    ids: Arc<IdGenerator>,
    session: Session,
    workflow: Workflow,
}

impl LaundryShop {
    /// Open (or create) a file-backed shop.
    pub fn open(store: StoreConfig, config: ShopConfig) -> Result<Self> {
        let backend = FileBackend::open_or_create(&store)?;
        Self::with_backend(Arc::new(backend), Arc::new(SystemClock), config, store.seed_defaults)
    }

    /// Fresh, seeded shop held entirely in memory.
    pub fn in_memory() -> Result<Self> {
        Self::with_backend(
            Arc::new(MemoryBackend::new()),
            Arc::new(SystemClock),
            ShopConfig::default(),
            true,
        )
    }

    /// Assemble a shop over any backend and clock.
    ///
    /// Seeds defaults when `seed` is set, then restores a persisted session.
    pub fn with_backend(
        backend: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: ShopConfig,
        seed: bool,
    ) -> Result<Self> {
        let records = Arc::new(RecordStore::new(backend));
        if seed {
            records.initialize(clock.now())?;
        }

        let repo = Repository::new(Arc::clone(&records));
        let ids = Arc::new(IdGenerator::new(Arc::clone(&clock)));
        let session = Session::new(repo.clone(), Arc::clone(&clock), Arc::clone(&ids));
        let workflow = Workflow::new(repo.clone(), clock, Arc::clone(&ids), config.turnaround_days);

        session.restore()?;

        Ok(Self {
            config,
            records,
            repo,
            ids,
            session,
            workflow,
        })
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    // --- Packages ---

    /// Add a package under a fresh id from the shop's generator.
    pub fn add_package(&self, name: &str, price: f64, description: &str) -> Result<Package> {
        let package = Package {
            id: self.ids.plain(),
            name: name.to_string(),
            price,
            description: description.to_string(),
        };
        self.repo.packages().add(package.clone())?;
        tracing::info!(package = %package.id, name, "package added");
        Ok(package)
    }

    // --- Subscriptions ---

    /// Receive change events from now on.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.records.events().subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.records.events().unsubscribe(id)
    }

    // --- Reports ---

    pub fn admin_dashboard(&self) -> Result<AdminDashboard> {
        Ok(AdminDashboard::compute(
            &self.repo.users().get_all()?,
            &self.repo.orders().get_all()?,
            &self.repo.transactions().get_all()?,
            self.config.recent_transactions,
        ))
    }

    pub fn customer_dashboard(&self, customer_id: &str) -> Result<CustomerDashboard> {
        Ok(CustomerDashboard::compute(
            &self.repo.orders().get_by_customer_id(customer_id)?,
            &self.repo.transactions().get_by_customer_id(customer_id)?,
            self.config.recent_orders,
        ))
    }

    pub fn report_summary(&self, range: &DateRange) -> Result<ReportSummary> {
        Ok(ReportSummary::compute(
            &self.repo.orders().get_all()?,
            range,
            self.config.top_packages,
        ))
    }

    /// Export orders placed from midnight UTC of `start` up to midnight UTC
    /// of `end`, both instants included.
    ///
    /// Both days are required.
    pub fn export_orders_csv(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<CsvExport> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(StoreError::MissingDateRange);
        };

        let range = DateRange::days(Some(start), Some(end));
        let orders = range.filter(&self.repo.orders().get_all()?);
        tracing::debug!(%start, %end, rows = orders.len(), "exporting orders");

        Ok(CsvExport {
            file_name: export_file_name(start, end),
            content: render_orders_csv(&orders),
        })
    }

    /// Order table for admins: search term plus optional status, newest first.
    pub fn search_orders(&self, term: &str, status: Option<OrderStatus>) -> Result<Vec<Order>> {
        Ok(search_orders(&self.repo.orders().get_all()?, term, status))
    }

    /// Customer table for admins.
    pub fn search_customers(&self, term: &str) -> Result<Vec<User>> {
        Ok(search_customers(&self.repo.users().customers()?, term))
    }

    pub fn customer_order_count(&self, customer_id: &str) -> Result<usize> {
        Ok(self.repo.orders().get_by_customer_id(customer_id)?.len())
    }

    /// A customer's orders, newest first.
    pub fn order_history(&self, customer_id: &str) -> Result<Vec<Order>> {
        Ok(newest_first(self.repo.orders().get_by_customer_id(customer_id)?))
    }

    /// A customer's transactions within `range`, newest first.
    pub fn transaction_history(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Result<Vec<Transaction>> {
        let mut history = range.filter(&self.repo.transactions().get_by_customer_id(customer_id)?);
        history.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(history)
    }
}

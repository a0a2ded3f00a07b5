use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use spendwise_core::budget::{BudgetRepository, BudgetService, BudgetServiceTrait};
use spendwise_core::categories::{CategoryRepository, CategoryService, CategoryServiceTrait};
use spendwise_core::db::{self, write_actor};
use spendwise_core::documents::{DocumentRepository, DocumentService, DocumentServiceTrait};
use spendwise_core::expenses::{ExpenseRepository, ExpenseService, ExpenseServiceTrait};
use spendwise_core::users::{UserRepository, UserService, UserServiceTrait};

use crate::auth::AuthManager;
use crate::cache::OverviewCache;
use crate::config::Config;

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub expense_service: Arc<dyn ExpenseServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub document_service: Arc<dyn DocumentServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub overview_cache: OverviewCache,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("SW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let document_repo = Arc::new(DocumentRepository::new(pool.clone(), writer.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repo.clone(),
        category_repo.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        category_repo,
        expense_repo,
    ));
    let document_service = Arc::new(DocumentService::new(document_repo));
    let user_service = Arc::new(UserService::new(user_repo));

    let auth = Arc::new(AuthManager::new(
        &config.secret_key,
        config.token_ttl_hours,
    ));

    Ok(Arc::new(AppState {
        category_service,
        expense_service,
        budget_service,
        document_service,
        user_service,
        auth,
        overview_cache: OverviewCache::new(),
        db_path,
    }))
}

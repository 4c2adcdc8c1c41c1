pub mod analytics;
pub mod cache;
pub mod dashboard;
pub mod fee;
pub mod notifier;
pub mod store;
pub mod top_up;
pub mod tx_hash;
pub mod validator;

pub use analytics::Analytics;
pub use cache::CacheService;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use fee::{FeeCalculator, FeePolicy};
pub use notifier::TelegramNotifier;
pub use store::{CardStore, MemoryStore, RestStore, StoreError};
pub use top_up::TopUpService;

pub mod dashboard;
pub mod market;
pub mod settings;

pub use dashboard::DashboardPage;
pub use market::MarketPage;
pub use settings::SettingsPage;

pub mod average_table;
pub mod kpi_card;
pub mod listing_card;
pub mod price_chart;
pub mod toast;

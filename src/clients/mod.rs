pub mod asset_client;
pub mod report_client;

pub use asset_client::{AssetFetcher, HttpAssetFetcher};
pub use report_client::{Credentials, HttpReportSource, ReportSource};

//! # Gatewayエンドポイント

pub mod upload;
pub mod list;
pub mod delete;
pub mod signed_url;
pub mod download;

pub use upload::handle_upload;
pub use list::handle_list;
pub use delete::handle_delete;
pub use signed_url::handle_signed_url;
pub use download::handle_download;

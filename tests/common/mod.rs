//! Common test utilities
//!
//! ```rust,ignore
//! use crate::common::{TestApp, fixtures};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let app = TestApp::new(RecordingConnection::new().with_rows(vec![fixtures::system_user(&[])])).await;
//!     // ...
//! }
//! ```

pub mod app;
pub mod fixtures;

pub use app::{MemoryStore, TestApp, bearer};

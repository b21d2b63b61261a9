//! `issueflow-lib` — Issue tracking core for issueflow.
//!
//! A single JSON document holds all users and issues. The repository loads
//! it, mutates a copy and writes it back whole; the view model derives the
//! filtered and sorted list shown to the current user.
//!
//! # Quick Start
//!
//! ```no_run
//! use issueflow_lib::{IssueDraft, IssuePatch, IssueRepository, JsonFileStore, Status};
//! use issueflow_lib::{derive_view, FilterType, ViewOptions};
//!
//! // Seeds the file with the default dataset on first access
//! let repo = IssueRepository::new(JsonFileStore::new(".issueflow/issues.json"));
//!
//! // Create
//! let issue = repo.create_issue(&IssueDraft {
//!     title: "Login fails".into(),
//!     description: "Submit button does nothing".into(),
//!     author_id: "u2".into(),
//!     ..Default::default()
//! }).unwrap();
//!
//! // Update
//! repo.update_issue(&issue.id, &IssuePatch { status: Some(Status::InProgress), ..Default::default() }).unwrap();
//!
//! // Query
//! let issues = repo.list_issues().unwrap();
//! let options = ViewOptions {
//!     filter: Some(FilterType::Created),
//!     current_user_id: Some("u2".into()),
//!     ..Default::default()
//! };
//! let mine = derive_view(&issues, &options);
//! ```

pub mod error;
pub mod model;
pub mod query;
pub mod repository;
pub mod seed;
pub mod session;
pub mod store;
pub mod util;
pub mod validation;
pub mod view;

pub use error::{IssueFlowError, Result};
pub use model::{Document, Issue, Role, Status, User};
pub use query::{FilterType, IssueDraft, IssuePatch, SortBy, ViewOptions};
pub use repository::IssueRepository;
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, Store};
pub use view::{derive_view, tag_vocabulary};

//! Tasks Domain
//!
//! Task records, the stores that hold them, and the GraphQL surface that
//! lists, creates and updates them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   GraphQL   │  ← Query / Mutation / Subscription roots
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────┐   ┌──────────┐
//! │   Service   │ ───► │  PubSub  │   │ Notifier │ ← best-effort webhook
//! └──────┬──────┘      └──────────┘   └──────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or PostgreSQL
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{
//!     build_schema, InMemoryTaskRepository, SlackConfig, SlackNotifier, TaskService,
//! };
//!
//! let notifier = SlackNotifier::new(SlackConfig::disabled());
//! let service = TaskService::new(InMemoryTaskRepository::new(), notifier);
//! let schema = build_schema(service);
//! ```

pub mod entity;
pub mod error;
pub mod fixtures;
pub mod graphql;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod notifier;
pub mod pagination;
pub mod postgres;
pub mod pubsub;
pub mod repository;
pub mod service;

pub use error::{NotificationError, NotificationResult, TaskError, TaskResult};
pub use graphql::{build_schema, TaskSchema};
pub use memory::InMemoryTaskRepository;
pub use models::{CreateTask, Patch, Task, TaskStatus, UpdateTask};
pub use notifier::{SlackConfig, SlackNotifier, TaskNotifier};
pub use pagination::{Page, PageArgs, PageInfo};
pub use postgres::PgTaskRepository;
pub use pubsub::{EventStream, PubSub, TASK_UPDATED};
pub use repository::TaskRepository;
pub use service::TaskService;

//! PhishGuard Detection Core
//!
//! Multi-signal risk scoring for URLs, email content, QR payloads and
//! candidate domains.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   DETECTION CORE                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌───────────┐  ┌────────────┐  ┌─────────┐ │
//! │  │  Feature   │  │  Signal   │  │ Aggregator │  │ Verdict │ │
//! │  │ Extractors │─▶│  Scorers  │─▶│ (weighted) │─▶│  Cache  │ │
//! │  └────────────┘  └───────────┘  └────────────┘  └─────────┘ │
//! │        │                                                     │
//! │        ▼                                                     │
//! │  ┌────────────┐  ┌───────────┐                              │
//! │  │ DomainIntel│  │ BrandSet  │                              │
//! │  │ (RDAP/test)│  │ (snapshot)│                              │
//! │  └────────────┘  └───────────┘                              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every pipeline stage is deterministic: identical input against the same
//! brand-set snapshot and intel answer produces a bit-identical verdict.

pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod intel;
pub mod scoring;
pub mod service;
pub mod verdict;

pub use config::DetectionConfig;
pub use error::{DetectError, DetectResult};
pub use features::Modality;
pub use service::DetectionService;
pub use verdict::Verdict;

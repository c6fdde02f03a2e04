//! Orchestrator domain types.
//!
//! Everything here is plain data plus decoding: resource events and their
//! typed specs, stack descriptions, apps and rack capacity. Nothing in this
//! module performs I/O.

pub mod app;
pub mod environment;
pub mod event;
pub mod id;
pub mod outcome;
pub mod property;
pub mod rack;
pub mod service;
pub mod stack;
pub mod task;

pub use app::{App, Formation, FormationEntry, Manifest, ManifestEntry, Release};
pub use environment::Environment;
pub use event::{
    Action, CustomResourceRequest, CustomResourceResponse, ResourceEvent, ResourceKind,
    ResponseStatus,
};
pub use id::PhysicalId;
pub use outcome::{Disposition, Outcome};
pub use property::PropertyBag;
pub use rack::{RackScaleRequest, RackSystem};
pub use service::{LoadBalancerBinding, ServiceRef, ServiceSpec, ServiceUpdate};
pub use stack::{ParameterUpdate, Stack, StackDescription, StackTemplate, StackUpdate};
pub use task::{ContainerSpec, PortMapping, TaskDefinitionId, TaskSpec};

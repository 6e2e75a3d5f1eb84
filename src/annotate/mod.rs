//! Annotation Engine
//!
//! Syntax, spelling and grammar spans recomputed over the whole buffer.

pub mod engine;
pub mod span;
pub mod spelling;
pub mod syntax;

pub use engine::AnnotationEngine;
pub use span::{Annotations, Span, SpanKind};
pub use spelling::{ForgetList, Redundancy};

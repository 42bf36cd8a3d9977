//! Table model and row annotations.
//!
//! [`TabularModel`] answers the cell and annotation queries a table view
//! needs and notifies subscribers when things change. [`Projection`] builds
//! sorted/filtered views on top of it without disturbing row identity.
//!
//! # Example
//!
//! ```
//! use csvnote::data::io_csv::from_csv_str;
//! use csvnote::table::{Annotation, Emphasis, TabularModel};
//!
//! let mut model = TabularModel::with_dataset(from_csv_str("id,value\n1,10\n2,20\n"));
//! model.set_annotation(1usize, Annotation::new("looks off", "Critical"));
//!
//! assert_eq!(model.cell_value(1usize, 1), Some("20"));
//! assert_eq!(model.row_display(1usize).emphasis, Emphasis::Strong);
//! ```

mod annotation;
mod events;
mod model;
mod projection;

pub use annotation::{
    Annotation, AnnotationStore, Emphasis, RowDisplay, Severity, DEFAULT_SEVERITY,
};
pub use events::{ModelEvent, SubscriptionId};
pub use model::TabularModel;
pub use projection::{Projection, ProjectionSpec, SortKey, SortOrder};

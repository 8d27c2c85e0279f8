pub mod form;
pub mod geometry;
pub mod plot;

pub use form::{split_field_list, FieldMapping};
pub use geometry::{BoundingBox, LatLng};
pub use plot::{ApprovalStatus, Plot, PlotStatus};

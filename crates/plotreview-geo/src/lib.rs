//! Plotreview Geo - Polygon codecs, validation, and spatial predicates
//!
//! This crate handles the geometry of plot boundaries: the display WKT codec,
//! the ODK geoshape codec, boundary validation, and overlap detection.

pub mod codec;
pub mod geoshape;
pub mod index;
pub mod models;
pub mod spatial;
pub mod validation;

pub use codec::{
    bounding_box, parse_optional_wkt, parse_wkt_polygon, parse_wkt_polygon_report,
    to_optional_wkt, to_wkt_polygon, ParsedRing,
};
pub use geoshape::{parse_odk_geoshape, to_odk_geoshape, wkt_to_odk_geoshape};
pub use index::OverlapIndex;
pub use spatial::{bboxes_intersect, polygons_overlap};
pub use validation::{area_sq_meters, validate_polygon, ValidationError, ValidationResult};

pub mod validation;

pub use validation::{evaluate_itinerary, is_truthy, parse_itinerary, strip_code_fences};

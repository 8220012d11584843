pub mod itinerary;
pub mod result;
pub mod trip;

pub use itinerary::{deserialize_itinerary, Activity, BudgetPlan, DayPlan, Itinerary};
pub use result::{ItineraryEval, TripPlan};
pub use trip::{TripRequest, Vibe};

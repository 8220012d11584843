use crate::types::TripRequest;

/// Budgeting prompt: pick a destination and allocate the whole budget
pub fn budgeting_prompt(request: &TripRequest) -> String {
    format!(
        "You are an expert travel budgeter. Choose a travel destination based on the inputted criteria. \
         Always try to max out the budget and give the best and most expensive recommendations based on \
         the inputted criteria. Return JSON {{destination, totalCost, note}} for the following trip.\n\
         Budget: {}\nLength: {}\nVibe: {}",
        request.budget, request.length, request.vibe
    )
}

/// Itinerary prompt: expand the budgeting output into a day-by-day JSON list
pub fn itinerary_prompt(budgeting_json: &str) -> String {
    format!(
        "Given the following travel budget JSON, create a day-by-day itinerary in JSON format. \
         For each day, list activities as an array of objects, each with a name and an estimated \
         number of hours (as a number). Output only valid JSON in the following format:\n\
         [\n  {{\n    \"day\": 1,\n    \"activities\": [\n      {{\"name\": \"Activity name\", \"hours\": 2}},\n      ...\n    ]\n  }},\n  ...\n]\n\
         Budget JSON: {}",
        budgeting_json
    )
}

/// Summary prompt: one brochure paragraph from the itinerary text
pub fn summary_prompt(itinerary_markdown: &str) -> String {
    format!(
        "Summarize the following travel itinerary in 1 paragraph for a travel brochure.\nItinerary:\n{}",
        itinerary_markdown
    )
}

//! Prompt text and worked examples for the two completion calls.
//!
//! Each call carries one worked input/output pair to anchor the response
//! format; only the latest user message is ever data.

pub(crate) const SPLIT_INSTRUCTION: &str = r#"You are tasked with splitting a large text into individual blocks, each describing a single music event.

Rules:
1. Ensure no information is omitted. Include all text as it appears in the file.
2. Produce the output in valid JSON format: an array of strings, each string a single event's description, directly parsable as such."#;

pub(crate) const WORKED_EXAMPLE_EVENT: &str = "In the heart of the city's pulse, on the imminent 10th of September, 2024, amidst the hollowed grounds of Soldier Field under the mesmerizing guise of midnight, there unfolds an ethereal spectacle - 'Nightfall Nexus', an impeccable cosmic symphony crafted by none other than the celestial artisan, Earth Wind & Fire, for the privileged witnesses able to spare a sum of $121.";

pub(crate) const SPLIT_EXAMPLE_OUTPUT: &str = r#"[
    "Event description text for the first event"
]"#;

pub(crate) const EXTRACT_INSTRUCTION: &str = r#"You are tasked with converting a user's description of a music event into a structured JSON format.
Only the description provided in the latest user input should be processed into the output. Ignore all previous interactions and outputs.
Follow this template:
{
    "artist": {
        "name": "extracted artist name",
        "genre": "extracted genre if available, otherwise null"
    },
    "name": "extracted event name",
    "venue": "extracted event location",
    "date": "date in YYYY-MM-DD format",
    "description": "concise event description",
    "price": extracted price as an integer amount of US dollars
}
If the price is quoted in a currency other than US dollars, use the convert_currency tool to normalize it."#;

pub(crate) const EXTRACT_EXAMPLE_OUTPUT: &str = r#"{
    "artist": {
        "name": "Earth Wind & Fire",
        "genre": null
    },
    "name": "Nightfall Nexus",
    "venue": "Soldier Field",
    "date": "2024-09-10",
    "description": "an impeccable cosmic symphony crafted by none other than the celestial artisan, Earth Wind & Fire",
    "price": 121
}"#;

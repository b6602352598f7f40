pub mod prompts;
pub mod render;

pub use prompts::{prompt_extras, prompt_ingredients, prompt_salad_choice, prompt_yes_no};
pub use render::{
    display_menu, display_receipt_saved, display_recommendation, receipt_saved_message,
    recommendation_message,
};

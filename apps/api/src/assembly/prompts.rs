// Generation prompt templates, one per block kind.
// Replace `{prompt}` with the caller's description before sending.

pub const ABOUT_US_TEMPLATE: &str = "Write an about us section based on: {prompt}";

pub const FEATURES_TEMPLATE: &str =
    "Generate a list of features for a product with these characteristics: {prompt}";

pub const PRICING_TEMPLATE: &str = "Describe the pricing structure based on: {prompt}";

pub const TESTIMONIALS_TEMPLATE: &str = "Generate customer testimonials based on: {prompt}";

pub const CALL_TO_ACTION_TEMPLATE: &str = "Write a compelling call to action: {prompt}";

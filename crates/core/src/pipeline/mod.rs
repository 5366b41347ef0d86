pub mod analyze_photo_use_case;
pub mod budgets;
pub mod feedback;
pub mod vision_fallback;

pub mod collaborate;

pub use collaborate::{
    CourseExtractor, InstitutionExtractor, LaunchExtractor, RecordingExtractor, SessionsExtractor,
};

use crate::core::ExtractorEngine;

/// Register every built-in extractor. More specific URL shapes go first so
/// the engine's first-match dispatch picks the right one.
pub fn register_all(engine: &mut ExtractorEngine) {
    engine.register_extractor(Box::new(RecordingExtractor::new()));
    engine.register_extractor(Box::new(LaunchExtractor::new()));
    engine.register_extractor(Box::new(SessionsExtractor::new()));
    engine.register_extractor(Box::new(CourseExtractor::new()));
    engine.register_extractor(Box::new(InstitutionExtractor::new()));
}

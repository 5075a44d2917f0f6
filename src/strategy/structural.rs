//! Structure-preserving strategy: one chunk per markdown section

use super::{ChunkingStrategy, StrategyKind};
use crate::config::ChunkingConfig;
use crate::document::DocumentInput;
use crate::error::Result;
use crate::text::{Segment, SectionDetector};

pub struct StructuralStrategy {
    detector: SectionDetector,
}

impl StructuralStrategy {
    pub fn new() -> Result<Self> {
        Ok(Self {
            detector: SectionDetector::new()?,
        })
    }
}

impl ChunkingStrategy for StructuralStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Structural
    }

    fn detect(&self, document: &DocumentInput, _config: &ChunkingConfig) -> Result<Vec<Segment>> {
        Ok(self.detector.detect(&document.markdown))
    }
}

//! Metric prober backed by the shared font database.
//!
//! Emulates how a layout engine renders a single unwrapped line in a
//! `font-family` chain: each character takes the first face in the chain
//! that has a glyph for it, and missing glyphs fall back to the primary
//! face's `.notdef` advance.

use fontdb::ID;
use ttf_parser::{Face, GlyphId};

use fontscout_core::{
    FontFamily, FontStack, Measurement, MetricProberPort, ProbeError, ProbeResult,
};

use crate::context::{FontContext, FontState};

/// Advance and line metrics of one face for one probe string, in em units.
struct FaceMetrics {
    advances: Vec<Option<f32>>,
    notdef: f32,
    line_height: f32,
}

impl FaceMetrics {
    fn parse(data: &[u8], index: u32, text: &str) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let upem = f32::from(face.units_per_em());
        if upem <= 0.0 {
            return None;
        }

        let advances = text
            .chars()
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| f32::from(advance) / upem)
            })
            .collect();
        let notdef = face
            .glyph_hor_advance(GlyphId(0))
            .map_or(0.5, |advance| f32::from(advance) / upem);
        let line_height = (f32::from(face.ascender()) - f32::from(face.descender())
            + f32::from(face.line_gap()))
            / upem;

        Some(Self {
            advances,
            notdef,
            line_height,
        })
    }
}

/// `MetricProberPort` implementation over a [`FontContext`].
#[derive(Debug, Clone)]
pub struct FontdbProber {
    context: FontContext,
}

impl FontdbProber {
    pub const fn new(context: FontContext) -> Self {
        Self { context }
    }

    fn resolve(state: &FontState, stack: &FontStack) -> Vec<ID> {
        let mut ids: Vec<ID> = Vec::new();
        for family in stack.families() {
            let id = match family {
                FontFamily::Named(name) => state.resolve_named(name),
                FontFamily::Generic(generic) => state.resolve_generic(*generic),
            };
            if let Some(id) = id.filter(|id| !ids.contains(id)) {
                ids.push(id);
            }
        }
        ids
    }
}

impl MetricProberPort for FontdbProber {
    fn measure(&self, stack: &FontStack, text: &str, size_px: f32) -> ProbeResult<Measurement> {
        let failed = |reason: String| ProbeError::MeasurementFailed {
            stack: stack.to_string(),
            reason,
        };

        if stack.families().is_empty() {
            return Err(ProbeError::InvalidStack(stack.to_string()));
        }

        let state = self.context.read().map_err(|e| failed(e.to_string()))?;
        let ids = Self::resolve(&state, stack);

        let faces: Vec<FaceMetrics> = ids
            .iter()
            .filter_map(|id| {
                state
                    .db
                    .with_face_data(*id, |data, index| FaceMetrics::parse(data, index, text))
                    .flatten()
            })
            .collect();

        let Some(primary) = faces.first() else {
            return Err(failed("no face in the stack could be loaded".to_string()));
        };

        let mut width = 0.0;
        let mut line_height = primary.line_height;
        for index in 0..text.chars().count() {
            let hit = faces.iter().find_map(|face| {
                face.advances
                    .get(index)
                    .copied()
                    .flatten()
                    .map(|advance| (advance, face))
            });
            match hit {
                Some((advance, face)) => {
                    width += advance;
                    line_height = line_height.max(face.line_height);
                }
                None => width += primary.notdef,
            }
        }

        Ok(Measurement::new(
            (width * size_px).round(),
            (line_height * size_px).round(),
        ))
    }
}

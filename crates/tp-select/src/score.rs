//! Track scores used to rank audio and text tracks.
//!
//! Scores are plain values with an [`Ord`] implementation; a track replaces
//! the current best only when its score compares strictly greater.

use std::cmp::Ordering;

use tp_core::language::{language_match_score, normalize_undetermined};
use tp_core::{Capabilities, Format, RoleFlags};

use crate::parameters::Parameters;

/// Bonus added to fixed-selection scores for tracks the renderer fully handles.
pub const WITHIN_RENDERER_CAPABILITIES_BONUS: u32 = 1000;

/// Whether a known value is within an inclusive maximum. Unknown values
/// always are.
pub fn is_within_limit(value: Option<u32>, max: u32) -> bool {
    value.map_or(true, |v| v <= max)
}

/// Compare two optional format values; unknown sorts lowest.
pub fn compare_format_values<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    a.cmp(&b)
}

// ---------------------------------------------------------------------------
// AudioTrackScore
// ---------------------------------------------------------------------------

/// Ranking of one audio track.
#[derive(Debug, Clone)]
pub struct AudioTrackScore {
    pub within_renderer_capabilities: bool,
    pub preferred_language_score: u8,
    pub within_constraints: bool,
    pub is_default: bool,
    /// Index of the first system language matching the track, if any.
    pub locale_language_index: Option<usize>,
    pub locale_language_score: u8,
    pub channel_count: Option<u32>,
    pub sample_rate: Option<u32>,
    pub bitrate: Option<u32>,
    pub language: Option<String>,
    force_lowest_bitrate: bool,
}

impl AudioTrackScore {
    pub fn new(
        format: &Format,
        params: &Parameters,
        capabilities: Capabilities,
        system_languages: &[String],
    ) -> Self {
        let language = format.language.as_deref();
        let (locale_language_index, locale_language_score) = system_languages
            .iter()
            .enumerate()
            .map(|(i, locale)| (i, language_match_score(language, Some(locale), false)))
            .find(|&(_, score)| score > 0)
            .map_or((None, 0), |(i, score)| (Some(i), score));

        Self {
            within_renderer_capabilities: capabilities.is_supported(false),
            preferred_language_score: language_match_score(
                language,
                params.preferred_audio_language.as_deref(),
                false,
            ),
            within_constraints: is_within_limit(format.bitrate, params.max_audio_bitrate)
                && is_within_limit(format.channel_count, params.max_audio_channel_count),
            is_default: format.is_default(),
            locale_language_index,
            locale_language_score,
            channel_count: format.channel_count,
            sample_rate: format.sample_rate,
            bitrate: format.bitrate,
            language: normalize_undetermined(language).map(str::to_owned),
            force_lowest_bitrate: params.force_lowest_bitrate,
        }
    }
}

impl Ord for AudioTrackScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // Quality prefers higher values only when this track is playable
        // within all constraints; otherwise lower values are safer.
        let quality = |ordering: Ordering| {
            if self.within_constraints && self.within_renderer_capabilities {
                ordering
            } else {
                ordering.reverse()
            }
        };
        self.within_renderer_capabilities
            .cmp(&other.within_renderer_capabilities)
            .then(self.preferred_language_score.cmp(&other.preferred_language_score))
            .then(self.within_constraints.cmp(&other.within_constraints))
            .then_with(|| {
                if self.force_lowest_bitrate {
                    compare_format_values(other.bitrate, self.bitrate)
                } else {
                    Ordering::Equal
                }
            })
            .then(self.is_default.cmp(&other.is_default))
            .then_with(|| {
                // Earlier system languages win; no match sorts last.
                let index = |i: Option<usize>| i.unwrap_or(usize::MAX);
                index(other.locale_language_index).cmp(&index(self.locale_language_index))
            })
            .then(self.locale_language_score.cmp(&other.locale_language_score))
            .then_with(|| quality(compare_format_values(self.channel_count, other.channel_count)))
            .then_with(|| quality(compare_format_values(self.sample_rate, other.sample_rate)))
            .then_with(|| {
                if self.language == other.language {
                    quality(compare_format_values(self.bitrate, other.bitrate))
                } else {
                    Ordering::Equal
                }
            })
    }
}

impl PartialOrd for AudioTrackScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AudioTrackScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AudioTrackScore {}

// ---------------------------------------------------------------------------
// TextTrackScore
// ---------------------------------------------------------------------------

/// Ranking of one text track.
#[derive(Debug, Clone)]
pub struct TextTrackScore {
    pub within_renderer_capabilities: bool,
    pub is_default: bool,
    pub is_forced: bool,
    pub preferred_language_score: u8,
    pub preferred_role_flags_score: u32,
    pub has_caption_role_flags: bool,
    pub selected_audio_language_score: u8,
    /// Only tracks within constraints are eligible for selection.
    pub within_constraints: bool,
}

impl TextTrackScore {
    pub fn new(
        format: &Format,
        params: &Parameters,
        capabilities: Capabilities,
        selected_audio_language: Option<&str>,
    ) -> Self {
        let language = format.language.as_deref();
        let flags = format.selection_flags & !params.disabled_text_track_selection_flags;
        let is_default = flags.contains(tp_core::SelectionFlags::DEFAULT);
        let is_forced = flags.contains(tp_core::SelectionFlags::FORCED);
        let preferred_language_score = language_match_score(
            language,
            params.preferred_text_language.as_deref(),
            params.select_undetermined_text_language,
        );
        let preferred_role_flags_score =
            (format.role_flags & params.preferred_text_role_flags).bits().count_ones();
        let has_caption_role_flags = format
            .role_flags
            .intersects(RoleFlags::CAPTION | RoleFlags::DESCRIBES_MUSIC_AND_SOUND);
        let selected_audio_language_undetermined =
            normalize_undetermined(selected_audio_language).is_none();
        let selected_audio_language_score = language_match_score(
            language,
            selected_audio_language,
            selected_audio_language_undetermined,
        );
        let within_constraints = preferred_language_score > 0
            || (params.preferred_text_language.is_none() && preferred_role_flags_score > 0)
            || is_default
            || (is_forced && selected_audio_language_score > 0);

        Self {
            within_renderer_capabilities: capabilities.is_supported(false),
            is_default,
            is_forced,
            preferred_language_score,
            preferred_role_flags_score,
            has_caption_role_flags,
            selected_audio_language_score,
            within_constraints,
        }
    }

    /// Forced tracks are preferred only when no language preference matched.
    fn preferred_forcedness(&self) -> bool {
        (self.preferred_language_score > 0 && !self.is_forced)
            || (self.preferred_language_score == 0 && self.is_forced)
    }
}

impl Ord for TextTrackScore {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = self
            .within_renderer_capabilities
            .cmp(&other.within_renderer_capabilities)
            .then(self.preferred_language_score.cmp(&other.preferred_language_score))
            .then(self.preferred_role_flags_score.cmp(&other.preferred_role_flags_score))
            .then(self.is_default.cmp(&other.is_default))
            .then(self.preferred_forcedness().cmp(&other.preferred_forcedness()))
            .then(
                self.selected_audio_language_score
                    .cmp(&other.selected_audio_language_score),
            );
        if self.preferred_role_flags_score == 0 {
            ordering.then(other.has_caption_role_flags.cmp(&self.has_caption_role_flags))
        } else {
            ordering
        }
    }
}

impl PartialOrd for TextTrackScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TextTrackScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TextTrackScore {}

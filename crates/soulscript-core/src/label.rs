// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of mental-health classification labels.
//!
//! Every journal entry carries exactly one label from this set. The wire
//! strings match what the external sentiment server emits, including the
//! space in "Personality disorder".

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Mental-health classification assigned to a journal entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum MentalHealthLabel {
    Anxiety,
    Bipolar,
    Depression,
    Normal,
    #[strum(serialize = "Personality disorder")]
    #[serde(rename = "Personality disorder")]
    PersonalityDisorder,
    Stress,
    Suicidal,
}

impl MentalHealthLabel {
    /// All seven labels, in the order the original model defines them.
    pub const ALL: [MentalHealthLabel; 7] = [
        MentalHealthLabel::Anxiety,
        MentalHealthLabel::Bipolar,
        MentalHealthLabel::Depression,
        MentalHealthLabel::Normal,
        MentalHealthLabel::PersonalityDisorder,
        MentalHealthLabel::Stress,
        MentalHealthLabel::Suicidal,
    ];
}

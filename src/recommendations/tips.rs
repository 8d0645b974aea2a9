//! Fixed lifestyle tips.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HYDRATION_TIPS: [&str; 5] = [
    "Buvez au moins 2L d'eau par jour.",
    "Essayez de boire un verre d'eau chaque matin.",
    "Évitez les boissons sucrées, préférez l'eau.",
    "Buvez un peu d'eau avant chaque repas.",
    "Assurez-vous d'avoir une bouteille d'eau à portée de main.",
];

pub const MEDITATION_TIPS: [&str; 7] = [
    "Prenez quelques minutes chaque matin pour respirer profondément et vous recentrer avant de commencer votre journée.",
    "Essayez de méditer en pleine conscience pendant 10 minutes avant de vous coucher pour apaiser votre esprit.",
    "Écoutez de la musique calme ou des sons naturels pour accompagner votre session de méditation.",
    "Commencez avec des méditations guidées si vous êtes débutant pour vous aider à rester concentré.",
    "Pratiquez la méditation en marchant pour intégrer la pleine conscience à vos déplacements quotidiens.",
    "Méditez régulièrement pour améliorer votre bien-être mental et physique à long terme.",
    "Lorsque des pensées distrayantes apparaissent, acceptez-les sans jugement et ramenez doucement votre attention à votre respiration.",
];

pub const EXERCISE_TIPS: [&str; 6] = [
    "Faites 30 minutes de cardio (course, vélo) trois fois par semaine.",
    "Pratiquez des exercices de renforcement musculaire (pompes, squats) au moins deux fois par semaine.",
    "Incorporez des étirements après chaque séance d'exercice pour améliorer la flexibilité.",
    "Essayez le yoga pour améliorer la force, l'équilibre et la flexibilité.",
    "Faites des marches rapides ou des promenades en plein air pour améliorer votre endurance.",
    "Incluez des exercices de respiration pour réduire le stress et améliorer votre bien-être mental.",
];

/// Tip categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Hydration,
    Meditation,
    Exercise,
}

impl TipCategory {
    pub const ALL: [TipCategory; 3] = [
        TipCategory::Hydration,
        TipCategory::Meditation,
        TipCategory::Exercise,
    ];

    /// The tips of this category, in display order.
    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            TipCategory::Hydration => &HYDRATION_TIPS,
            TipCategory::Meditation => &MEDITATION_TIPS,
            TipCategory::Exercise => &EXERCISE_TIPS,
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipCategory::Hydration => write!(f, "Hydration"),
            TipCategory::Meditation => write!(f, "Meditation"),
            TipCategory::Exercise => write!(f, "Exercise"),
        }
    }
}

impl FromStr for TipCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hydration" => Ok(TipCategory::Hydration),
            "meditation" => Ok(TipCategory::Meditation),
            "exercise" | "exercises" => Ok(TipCategory::Exercise),
            other => Err(format!("Unknown tip category: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sizes() {
        assert_eq!(TipCategory::Hydration.tips().len(), 5);
        assert_eq!(TipCategory::Meditation.tips().len(), 7);
        assert_eq!(TipCategory::Exercise.tips().len(), 6);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("Hydration".parse::<TipCategory>(), Ok(TipCategory::Hydration));
        assert_eq!(" exercises ".parse::<TipCategory>(), Ok(TipCategory::Exercise));
        assert!("yoga".parse::<TipCategory>().is_err());
    }
}

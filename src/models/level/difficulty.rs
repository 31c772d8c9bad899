use crate::models::{DemonDifficulty, Difficulty};

const BASE: u8 = 10;

/// The raw fields a saved level stores its difficulty as. The face shown is
/// `numerator / denominator`, overridden by the auto and demon flags.
///
/// ```
/// use robtop::models::{Difficulty, DifficultyParameters};
///
/// let parameters = DifficultyParameters::from_difficulty(Difficulty::InsaneDemon);
/// assert_eq!(parameters.numerator, 40);
/// assert_eq!(parameters.demon_value, 5);
/// assert_eq!(parameters.into_difficulty(), Difficulty::InsaneDemon);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "derive", derive(serde::Serialize))]
pub struct DifficultyParameters {
    pub numerator: u8,
    pub denominator: u8,
    pub demon_value: u8,
    pub auto: bool,
    pub demon: bool,
}

fn level_value(difficulty: Difficulty) -> u8 {
    match difficulty {
        Difficulty::Easy => 1,
        Difficulty::Normal => 2,
        Difficulty::Hard => 3,
        Difficulty::Harder => 4,
        Difficulty::Insane => 5,
        Difficulty::EasyDemon => 6,
        Difficulty::MediumDemon => 7,
        Difficulty::HardDemon => 8,
        Difficulty::InsaneDemon => 9,
        Difficulty::ExtremeDemon => 10,
        Difficulty::Unknown | Difficulty::Auto | Difficulty::Demon => 0,
    }
}

fn from_level_value(value: u8) -> Difficulty {
    match value {
        1 => Difficulty::Easy,
        2 => Difficulty::Normal,
        3 => Difficulty::Hard,
        4 => Difficulty::Harder,
        5 => Difficulty::Insane,
        6 => Difficulty::EasyDemon,
        7 => Difficulty::MediumDemon,
        8 => Difficulty::HardDemon,
        9 => Difficulty::InsaneDemon,
        10 => Difficulty::ExtremeDemon,
        _ => Difficulty::Unknown,
    }
}

/// Demons borrow the face of the regular difficulty at the same rank
fn demon_face(demon: DemonDifficulty) -> Difficulty {
    match demon {
        DemonDifficulty::Demon => Difficulty::Demon,
        DemonDifficulty::EasyDemon => Difficulty::Easy,
        DemonDifficulty::MediumDemon => Difficulty::Normal,
        DemonDifficulty::HardDemon => Difficulty::Hard,
        DemonDifficulty::InsaneDemon => Difficulty::Harder,
        DemonDifficulty::ExtremeDemon => Difficulty::Insane,
    }
}

/// Hard demons have no value of their own and are what every unlisted
/// value decodes as
fn demon_from_value(value: u8) -> DemonDifficulty {
    match value {
        3 => DemonDifficulty::EasyDemon,
        4 => DemonDifficulty::MediumDemon,
        5 => DemonDifficulty::InsaneDemon,
        6 => DemonDifficulty::ExtremeDemon,
        _ => DemonDifficulty::HardDemon,
    }
}

fn demon_value(demon: DemonDifficulty) -> u8 {
    match demon {
        DemonDifficulty::EasyDemon => 3,
        DemonDifficulty::MediumDemon => 4,
        DemonDifficulty::InsaneDemon => 5,
        DemonDifficulty::ExtremeDemon => 6,
        DemonDifficulty::Demon | DemonDifficulty::HardDemon => 0,
    }
}

impl DifficultyParameters {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Unknown => DifficultyParameters::default(),
            // auto levels show the insane face
            Difficulty::Auto => DifficultyParameters {
                numerator: level_value(Difficulty::Insane) * BASE,
                denominator: BASE,
                auto: true,
                ..DifficultyParameters::default()
            },
            Difficulty::Demon => DifficultyParameters {
                demon: true,
                ..DifficultyParameters::default()
            },
            _ => match DemonDifficulty::from_difficulty(difficulty) {
                Some(demon) => DifficultyParameters {
                    numerator: level_value(demon_face(demon)) * BASE,
                    denominator: BASE,
                    demon_value: demon_value(demon),
                    auto: false,
                    demon: true,
                },
                None => DifficultyParameters {
                    numerator: level_value(difficulty) * BASE,
                    denominator: BASE,
                    ..DifficultyParameters::default()
                },
            },
        }
    }

    /// The face shown when neither flag is set
    pub fn level_difficulty(&self) -> Difficulty {
        match self.numerator.checked_div(self.denominator) {
            Some(value) => from_level_value(value),
            None => Difficulty::Unknown,
        }
    }

    pub fn demon_difficulty(&self) -> DemonDifficulty {
        demon_from_value(self.demon_value)
    }

    pub fn into_difficulty(self) -> Difficulty {
        if self.auto {
            Difficulty::Auto
        } else if self.demon {
            self.demon_difficulty().into_difficulty()
        } else {
            self.level_difficulty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Difficulty::Unknown)]
    #[case(Difficulty::Auto)]
    #[case(Difficulty::Easy)]
    #[case(Difficulty::Insane)]
    #[case(Difficulty::EasyDemon)]
    #[case(Difficulty::HardDemon)]
    #[case(Difficulty::ExtremeDemon)]
    fn parameters_keep_difficulty(#[case] difficulty: Difficulty) {
        let parameters = DifficultyParameters::from_difficulty(difficulty);
        assert_eq!(parameters.into_difficulty(), difficulty);
    }

    #[test]
    fn auto_uses_insane_face() {
        let parameters = DifficultyParameters::from_difficulty(Difficulty::Auto);
        assert_eq!(parameters.numerator, 50);
        assert_eq!(parameters.denominator, 10);
        assert!(parameters.auto);
    }

    #[test]
    fn unspecified_demon_reads_back_as_hard() {
        let parameters = DifficultyParameters::from_difficulty(Difficulty::Demon);
        assert!(parameters.demon);
        assert_eq!(parameters.numerator, 0);
        assert_eq!(parameters.into_difficulty(), Difficulty::HardDemon);
    }

    #[test]
    fn zero_denominator_is_unknown() {
        let parameters = DifficultyParameters {
            numerator: 30,
            ..DifficultyParameters::default()
        };
        assert_eq!(parameters.into_difficulty(), Difficulty::Unknown);
    }
}

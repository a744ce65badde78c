use std::fmt;

use serde::{Deserialize, Serialize};

/// Household life stage, derived from the eldest child's age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    YoungChild,
    Elementary,
    JuniorHigh,
    HighSchool,
    University,
    EmptyNest,
}

impl LifeStage {
    pub const ALL: [LifeStage; 6] = [
        LifeStage::YoungChild,
        LifeStage::Elementary,
        LifeStage::JuniorHigh,
        LifeStage::HighSchool,
        LifeStage::University,
        LifeStage::EmptyNest,
    ];

    /// Stage for a child of the given age. `None` (no children) is an empty nest.
    #[must_use]
    pub fn from_child_age(age: Option<f64>) -> Self {
        match age {
            None => LifeStage::EmptyNest,
            Some(a) if a < 6.0 => LifeStage::YoungChild,
            Some(a) if a < 12.0 => LifeStage::Elementary,
            Some(a) if a < 15.0 => LifeStage::JuniorHigh,
            Some(a) if a < 18.0 => LifeStage::HighSchool,
            Some(a) if a < 22.0 => LifeStage::University,
            Some(_) => LifeStage::EmptyNest,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LifeStage::YoungChild => "young_child",
            LifeStage::Elementary => "elementary",
            LifeStage::JuniorHigh => "junior_high",
            LifeStage::HighSchool => "high_school",
            LifeStage::University => "university",
            LifeStage::EmptyNest => "empty_nest",
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per life stage.
///
/// Used for annual base expenses, additional-child surcharges, discretionary
/// ratios and category budgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTable<T> {
    pub young_child: T,
    pub elementary: T,
    pub junior_high: T,
    pub high_school: T,
    pub university: T,
    pub empty_nest: T,
}

impl<T> StageTable<T> {
    #[must_use]
    pub fn get(&self, stage: LifeStage) -> &T {
        match stage {
            LifeStage::YoungChild => &self.young_child,
            LifeStage::Elementary => &self.elementary,
            LifeStage::JuniorHigh => &self.junior_high,
            LifeStage::HighSchool => &self.high_school,
            LifeStage::University => &self.university,
            LifeStage::EmptyNest => &self.empty_nest,
        }
    }

    /// Build a table by evaluating `f` for every stage
    pub fn from_fn(mut f: impl FnMut(LifeStage) -> T) -> Self {
        Self {
            young_child: f(LifeStage::YoungChild),
            elementary: f(LifeStage::Elementary),
            junior_high: f(LifeStage::JuniorHigh),
            high_school: f(LifeStage::HighSchool),
            university: f(LifeStage::University),
            empty_nest: f(LifeStage::EmptyNest),
        }
    }

    /// Fallible variant of [`StageTable::from_fn`]
    pub fn try_from_fn<E>(mut f: impl FnMut(LifeStage) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            young_child: f(LifeStage::YoungChild)?,
            elementary: f(LifeStage::Elementary)?,
            junior_high: f(LifeStage::JuniorHigh)?,
            high_school: f(LifeStage::HighSchool)?,
            university: f(LifeStage::University)?,
            empty_nest: f(LifeStage::EmptyNest)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifeStage, &T)> {
        LifeStage::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

impl StageTable<f64> {
    /// Same value for every stage
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::from_fn(|_| value)
    }
}

use crate::{
    data::roster::Roster,
    data::student::{BloodStatus, Gender, House, Student},
    error::{RosterError, UnknownFilterSnafu, UnknownSortDirSnafu, UnknownSortKeySnafu},
};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Expelled,
    House(House),
    Gender(Gender),
    Blood(BloodStatus),
    /// Substring match against the responsibilities text, lowercased.
    Responsibility(&'static str),
}

impl Filter {
    fn matches(&self, student: &Student) -> bool {
        match self {
            Self::All => true,
            // Handled by wholesale substitution in `build_list`.
            Self::Expelled => false,
            Self::House(house) => student.house == *house,
            Self::Gender(gender) => student.gender == *gender,
            Self::Blood(blood) => student.blood_status == *blood,
            Self::Responsibility(keyword) => student
                .responsibilities()
                .to_lowercase()
                .contains(keyword),
        }
    }
}

impl FromStr for Filter {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "*" => Self::All,
            "expelled" => Self::Expelled,
            "gryffindor" => Self::House(House::Gryffindor),
            "hufflepuff" => Self::House(House::Hufflepuff),
            "ravenclaw" => Self::House(House::Ravenclaw),
            "slytherin" => Self::House(House::Slytherin),
            "witch" => Self::Gender(Gender::Witch),
            "wizard" => Self::Gender(Gender::Wizard),
            "pure blood" => Self::Blood(BloodStatus::PureBlood),
            "half blood" => Self::Blood(BloodStatus::HalfBlood),
            "muggle born" => Self::Blood(BloodStatus::MuggleBorn),
            "prefect" => Self::Responsibility("prefect"),
            "inquisitorial" => Self::Responsibility("inquisitorial"),
            _ => return UnknownFilterSnafu { got: s }.fail(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    FirstName,
    MiddleName,
    NickName,
    LastName,
    Gender,
    House,
    BloodStatus,
    Responsibilities,
}

impl SortKey {
    /// The display string the comparison runs over.
    fn key(self, student: &Student) -> String {
        match self {
            Self::FirstName => student.first_name.clone(),
            Self::MiddleName => student.middle_name.clone(),
            Self::NickName => student.nick_name.clone(),
            Self::LastName => student.last_name.clone(),
            Self::Gender => student.gender.as_str().to_string(),
            Self::House => student.house.name().to_string(),
            Self::BloodStatus => student.blood_status.as_str().to_string(),
            Self::Responsibilities => student.responsibilities().to_string(),
        }
    }
}

impl FromStr for SortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "first_name" => Self::FirstName,
            "middle_name" => Self::MiddleName,
            "nick_name" => Self::NickName,
            "last_name" => Self::LastName,
            "gender" => Self::Gender,
            "house" => Self::House,
            "blood_status" => Self::BloodStatus,
            "responsibilities" => Self::Responsibilities,
            _ => return UnknownSortKeySnafu { got: s }.fail(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDir {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => return UnknownSortDirSnafu { got: s }.fail(),
        })
    }
}

/// The current list settings. In-memory only; reset on restart.
#[derive(Debug, Clone)]
pub struct ListSettings {
    pub filter_by: Filter,
    pub sort_by: SortKey,
    pub sort_dir: SortDir,
    pub search_by: String,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            filter_by: Filter::All,
            sort_by: SortKey::FirstName,
            sort_dir: SortDir::Asc,
            search_by: String::new(),
        }
    }
}

/// Applies filter, then sort, then search, in that fixed order. The
/// `expelled` filter substitutes the expelled collection wholesale.
pub fn build_list(roster: &Roster) -> Vec<&Student> {
    let settings = &roster.settings;

    let mut list: Vec<&Student> = match &settings.filter_by {
        Filter::Expelled => roster.expelled().iter().collect(),
        filter => roster
            .active()
            .iter()
            .filter(|student| filter.matches(student))
            .collect(),
    };

    list.sort_by(|a, b| {
        let ordering = settings.sort_by.key(a).cmp(&settings.sort_by.key(b));
        match settings.sort_dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    });

    if !settings.search_by.is_empty() {
        let needle = settings.search_by.to_lowercase();
        list.retain(|student| {
            student.first_name.to_lowercase().contains(&needle)
                || student.last_name.to_lowercase().contains(&needle)
        });
    }

    list
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub gryffindor: usize,
    pub hufflepuff: usize,
    pub ravenclaw: usize,
    pub slytherin: usize,
    pub expelled: usize,
}

/// House membership is prefix-matched on the four-letter house code, so
/// feed oddities still land in the right bucket.
pub fn summarize(roster: &Roster) -> Summary {
    let count = |code: &str| {
        roster
            .active()
            .iter()
            .filter(|student| student.house.name().to_lowercase().starts_with(code))
            .count()
    };

    Summary {
        total: roster.active().len(),
        gryffindor: count("gryf"),
        hufflepuff: count("huff"),
        ravenclaw: count("rave"),
        slytherin: count("slyt"),
        expelled: roster.expelled().len(),
    }
}
